// Garbage collector models

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarbageCollector {
    /// Canonical name ("young"/"old") when recognized, otherwise the raw name.
    pub name: String,
    pub collection_count: u64,
    /// Cumulative time spent collecting.
    pub collection_time: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcStats {
    pub collectors: Vec<GarbageCollector>,
}

impl GcStats {
    pub fn collector(&self, name: &str) -> Option<&GarbageCollector> {
        self.collectors.iter().find(|c| c.name == name)
    }

    pub fn total_collection_count(&self) -> u64 {
        self.collectors
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.collection_count))
    }

    pub fn total_collection_time(&self) -> Duration {
        self.collectors
            .iter()
            .fold(Duration::ZERO, |acc, c| acc.saturating_add(c.collection_time))
    }
}

impl<'a> IntoIterator for &'a GcStats {
    type Item = &'a GarbageCollector;
    type IntoIter = std::slice::Iter<'a, GarbageCollector>;

    fn into_iter(self) -> Self::IntoIter {
        self.collectors.iter()
    }
}
