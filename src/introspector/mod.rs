// Boundary with the runtime introspection facility

mod recorded;

pub use recorded::{Recording, RecordedIntrospector};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::IntrospectError;

/// Raw usage as reported by the runtime. Negative values mean "unknown".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUsage {
    pub used: i64,
    pub committed: i64,
    pub max: i64,
}

impl RawUsage {
    pub const UNKNOWN: RawUsage = RawUsage {
        used: -1,
        committed: -1,
        max: -1,
    };
}

/// Current and peak usage of one memory pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolUsage {
    pub usage: RawUsage,
    pub peak: RawUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadCounts {
    pub count: u32,
    pub peak_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCollector {
    pub name: String,
    pub collection_count: u64,
    pub collection_time: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBufferPool {
    pub name: String,
    pub count: u64,
    pub total_capacity: u64,
    pub used: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub loaded: u64,
    pub total_loaded: u64,
    pub unloaded: u64,
}

/// Read-only access to a runtime's counters.
///
/// Every method is an independent read; nothing ties two calls to the same
/// instant. Implementations must be safe to call from several threads at once.
pub trait RuntimeIntrospector: Send + Sync {
    fn wall_clock(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn uptime(&self) -> Duration;

    fn heap_usage(&self) -> RawUsage;

    fn non_heap_usage(&self) -> RawUsage;

    /// Raw names of all memory pools, in the runtime's order.
    fn memory_pool_names(&self) -> Vec<String>;

    /// Reads one pool. May fail transiently for an individual pool.
    fn memory_pool_usage(&self, name: &str) -> Result<PoolUsage, IntrospectError>;

    fn thread_counts(&self) -> ThreadCounts;

    fn garbage_collectors(&self) -> Vec<RawCollector>;

    /// Buffer pools, or `Err` when the facility is unavailable on this host.
    fn buffer_pools(&self) -> Result<Vec<RawBufferPool>, IntrospectError>;

    fn class_counts(&self) -> ClassCounts;
}
