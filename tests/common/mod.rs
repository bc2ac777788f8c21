// Shared test helpers: a scriptable introspector

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use vmstats::IntrospectError;
use vmstats::introspector::{
    ClassCounts, PoolUsage, RawBufferPool, RawCollector, RawUsage, RuntimeIntrospector,
    ThreadCounts,
};

pub fn usage(used: i64, committed: i64, max: i64) -> RawUsage {
    RawUsage {
        used,
        committed,
        max,
    }
}

/// Introspector with fixed counters, optional failing pools and an optional
/// missing buffer pool facility. Counts reads so tests can check call order.
pub struct FakeIntrospector {
    pub heap: RawUsage,
    pub non_heap: RawUsage,
    pub pools: Vec<(String, PoolUsage)>,
    pub failing_pools: HashSet<String>,
    pub threads: ThreadCounts,
    pub collectors: Vec<RawCollector>,
    pub buffer_pools: Option<Vec<RawBufferPool>>,
    pub classes: ClassCounts,
    pub reads: AtomicUsize,
}

impl FakeIntrospector {
    pub fn g1() -> Self {
        let pool = |name: &str, used: i64| {
            (
                name.to_string(),
                PoolUsage {
                    usage: usage(used, used * 2, used * 4),
                    peak: usage(used + 1, used * 2, used * 4),
                },
            )
        };
        Self {
            heap: usage(500, 800, 1000),
            non_heap: usage(64, 128, -1),
            pools: vec![
                pool("CodeHeap 'non-nmethods'", 10),
                pool("Metaspace", 20),
                pool("G1 Eden Space", 100),
                pool("G1 Old Gen", 300),
                pool("G1 Survivor Space", 50),
            ],
            failing_pools: HashSet::new(),
            threads: ThreadCounts {
                count: 12,
                peak_count: 20,
            },
            collectors: vec![
                RawCollector {
                    name: "G1 Young Generation".into(),
                    collection_count: 9,
                    collection_time: Duration::from_millis(120),
                },
                RawCollector {
                    name: "G1 Old Generation".into(),
                    collection_count: 0,
                    collection_time: Duration::ZERO,
                },
            ],
            buffer_pools: Some(vec![RawBufferPool {
                name: "direct".into(),
                count: 3,
                total_capacity: 4096,
                used: 4096,
            }]),
            classes: ClassCounts {
                loaded: 900,
                total_loaded: 950,
                unloaded: 50,
            },
            reads: AtomicUsize::new(0),
        }
    }

    pub fn with_failing_pool(mut self, name: &str) -> Self {
        self.failing_pools.insert(name.to_string());
        self
    }

    pub fn without_buffer_pools(mut self) -> Self {
        self.buffer_pools = None;
        self
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

impl RuntimeIntrospector for FakeIntrospector {
    fn uptime(&self) -> Duration {
        self.read();
        Duration::from_secs(3600)
    }

    fn heap_usage(&self) -> RawUsage {
        self.read();
        self.heap
    }

    fn non_heap_usage(&self) -> RawUsage {
        self.read();
        self.non_heap
    }

    fn memory_pool_names(&self) -> Vec<String> {
        self.read();
        self.pools.iter().map(|(n, _)| n.clone()).collect()
    }

    fn memory_pool_usage(&self, name: &str) -> Result<PoolUsage, IntrospectError> {
        self.read();
        if self.failing_pools.contains(name) {
            return Err(IntrospectError::PoolUnavailable {
                pool: name.to_string(),
                reason: "Memory Pool not found".into(),
            });
        }
        self.pools
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, u)| *u)
            .ok_or_else(|| IntrospectError::PoolUnavailable {
                pool: name.to_string(),
                reason: "unknown".into(),
            })
    }

    fn thread_counts(&self) -> ThreadCounts {
        self.read();
        self.threads
    }

    fn garbage_collectors(&self) -> Vec<RawCollector> {
        self.read();
        self.collectors.clone()
    }

    fn buffer_pools(&self) -> Result<Vec<RawBufferPool>, IntrospectError> {
        self.read();
        self.buffer_pools
            .clone()
            .ok_or_else(|| IntrospectError::Unsupported("no buffer pool beans".into()))
    }

    fn class_counts(&self) -> ClassCounts {
        self.read();
        self.classes
    }
}
