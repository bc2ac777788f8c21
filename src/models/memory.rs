// Heap, non-heap and per-pool memory models

use serde::{Deserialize, Serialize};

use crate::names::PoolCategory;
use crate::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryPool {
    pub name: PoolCategory,
    pub used: u64,
    pub max: u64,
    pub committed: u64,
    pub peak_used: u64,
    pub peak_max: u64,
}

/// Aggregate heap/non-heap usage plus the recognized memory pools, in the
/// order the runtime reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub heap_used: u64,
    pub heap_committed: u64,
    /// 0 bytes signals an unknown max.
    pub heap_max: u64,
    pub non_heap_used: u64,
    pub non_heap_committed: u64,
    pub pools: Vec<MemoryPool>,
}

impl Memory {
    /// Heap usage in percent. -1 signals unknown.
    pub fn heap_used_percent(&self) -> i16 {
        normalize::heap_used_percent(self.heap_used, self.heap_max)
    }

    /// First pool in the given category, if the runtime reported one.
    pub fn pool(&self, category: PoolCategory) -> Option<&MemoryPool> {
        self.pools.iter().find(|p| p.name == category)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemoryPool> {
        self.pools.iter()
    }
}

impl<'a> IntoIterator for &'a Memory {
    type Item = &'a MemoryPool;
    type IntoIter = std::slice::Iter<'a, MemoryPool>;

    fn into_iter(self) -> Self::IntoIter {
        self.pools.iter()
    }
}
