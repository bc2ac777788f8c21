// Replays counters captured in a TOML recording

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::time::Duration;
use tracing::instrument;

use super::{
    ClassCounts, PoolUsage, RawBufferPool, RawCollector, RawUsage, RuntimeIntrospector,
    ThreadCounts,
};
use crate::error::IntrospectError;

/// A set of raw counters as a runtime reported them at one point.
#[derive(Debug, Clone, Deserialize)]
pub struct Recording {
    /// Wall-clock time of the capture, as a TOML datetime or an RFC 3339
    /// string; replay uses the current time when absent.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    pub uptime_ms: u64,
    pub heap: RawUsage,
    #[serde(default = "unknown_usage")]
    pub non_heap: RawUsage,
    #[serde(default)]
    pub threads: ThreadCounts,
    #[serde(default)]
    pub classes: ClassCounts,
    #[serde(default)]
    pub memory_pools: Vec<RecordedPool>,
    #[serde(default)]
    pub garbage_collectors: Vec<RecordedCollector>,
    /// `None` means the runtime had no buffer pool facility.
    #[serde(default)]
    pub buffer_pools: Option<Vec<RawBufferPool>>,
}

fn unknown_usage() -> RawUsage {
    RawUsage::UNKNOWN
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match toml::Value::deserialize(deserializer)? {
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::String(s) => s,
        other => {
            return Err(D::Error::custom(format!(
                "timestamp must be a datetime, got {}",
                other.type_str()
            )));
        }
    };
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|e| D::Error::custom(format!("timestamp '{}': {}", text, e)))
}

/// One memory pool. Either `usage` is present, or `error` records why the
/// runtime refused to report the pool.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedPool {
    pub name: String,
    #[serde(default)]
    pub usage: Option<RawUsage>,
    /// Defaults to `usage` when not recorded.
    #[serde(default)]
    pub peak: Option<RawUsage>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordedCollector {
    pub name: String,
    pub collection_count: u64,
    pub collection_time_ms: u64,
}

impl Recording {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("recording {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate a recording from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let recording: Recording = toml::from_str(s)?;
        recording.validate()?;
        Ok(recording)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for pool in &self.memory_pools {
            anyhow::ensure!(
                !pool.name.is_empty(),
                "memory_pools.name must be non-empty"
            );
            anyhow::ensure!(
                seen.insert(pool.name.as_str()),
                "memory_pools '{}' is listed more than once",
                pool.name
            );
            anyhow::ensure!(
                pool.usage.is_some() || pool.error.is_some(),
                "memory_pools '{}' needs either usage or error",
                pool.name
            );
        }
        for collector in &self.garbage_collectors {
            anyhow::ensure!(
                !collector.name.is_empty(),
                "garbage_collectors.name must be non-empty"
            );
        }
        if let Some(buffer_pools) = &self.buffer_pools {
            for pool in buffer_pools {
                anyhow::ensure!(
                    !pool.name.is_empty(),
                    "buffer_pools.name must be non-empty"
                );
            }
        }
        Ok(())
    }
}

/// Introspector that serves a fixed [`Recording`]. Every read returns the same
/// values, which makes snapshots of it reproducible.
#[derive(Debug, Clone)]
pub struct RecordedIntrospector {
    recording: Recording,
}

impl RecordedIntrospector {
    pub fn new(recording: Recording) -> Self {
        Self { recording }
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        Ok(Self::new(Recording::load(path)?))
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }
}

impl RuntimeIntrospector for RecordedIntrospector {
    fn wall_clock(&self) -> DateTime<Utc> {
        self.recording.timestamp.unwrap_or_else(Utc::now)
    }

    fn uptime(&self) -> Duration {
        Duration::from_millis(self.recording.uptime_ms)
    }

    fn heap_usage(&self) -> RawUsage {
        self.recording.heap
    }

    fn non_heap_usage(&self) -> RawUsage {
        self.recording.non_heap
    }

    fn memory_pool_names(&self) -> Vec<String> {
        self.recording
            .memory_pools
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    #[instrument(skip(self), fields(repo = "recording", operation = "memory_pool_usage"))]
    fn memory_pool_usage(&self, name: &str) -> Result<PoolUsage, IntrospectError> {
        let pool = self
            .recording
            .memory_pools
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| IntrospectError::PoolUnavailable {
                pool: name.to_string(),
                reason: "memory pool not found".into(),
            })?;
        if let Some(reason) = &pool.error {
            return Err(IntrospectError::PoolUnavailable {
                pool: name.to_string(),
                reason: reason.clone(),
            });
        }
        let usage = pool.usage.ok_or_else(|| IntrospectError::PoolUnavailable {
            pool: name.to_string(),
            reason: "no usage recorded".into(),
        })?;
        Ok(PoolUsage {
            usage,
            peak: pool.peak.unwrap_or(usage),
        })
    }

    fn thread_counts(&self) -> ThreadCounts {
        self.recording.threads
    }

    fn garbage_collectors(&self) -> Vec<RawCollector> {
        self.recording
            .garbage_collectors
            .iter()
            .map(|c| RawCollector {
                name: c.name.clone(),
                collection_count: c.collection_count,
                collection_time: Duration::from_millis(c.collection_time_ms),
            })
            .collect()
    }

    fn buffer_pools(&self) -> Result<Vec<RawBufferPool>, IntrospectError> {
        self.recording.buffer_pools.clone().ok_or_else(|| {
            IntrospectError::Unsupported("recording has no buffer pools".into())
        })
    }

    fn class_counts(&self) -> ClassCounts {
        self.recording.classes
    }
}
