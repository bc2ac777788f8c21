// Point-in-time runtime snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{BufferPool, ClassStats, GcStats, Memory, Threads};

/// One capture of the runtime's resource counters.
///
/// Every section is read within a single `collect()` call, but the reads are
/// sequential and not atomic as a group: under heavy activity, sections may
/// reflect states a few microseconds apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Wall-clock time, read before any other counter.
    pub timestamp: DateTime<Utc>,
    pub uptime: Duration,
    pub memory: Memory,
    pub threads: Threads,
    pub gc: GcStats,
    pub buffer_pools: Vec<BufferPool>,
    pub classes: ClassStats,
}

impl Snapshot {
    /// Pool and collector names, in reported order. Two snapshots of a
    /// runtime under static load share the same shape.
    pub fn shape(&self) -> (Vec<&str>, Vec<&str>) {
        let pools = self.memory.pools.iter().map(|p| p.name.as_str()).collect();
        let collectors = self.gc.collectors.iter().map(|c| c.name.as_str()).collect();
        (pools, collectors)
    }
}
