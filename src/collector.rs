// Snapshot assembly: reads the introspector, normalizes, canonicalizes

use std::sync::Arc;
use tracing::instrument;

use crate::error::IntrospectError;
use crate::introspector::{RawUsage, RuntimeIntrospector};
use crate::models::{
    BufferPool, ClassStats, GarbageCollector, GcStats, Memory, MemoryPool, Snapshot, Threads,
};
use crate::names;
use crate::normalize::clamp_unknown;

/// Something the collector recovered from while building a snapshot.
#[derive(Debug)]
pub enum Diagnostic {
    /// A memory pool could not be read and was left out.
    PoolSkipped {
        pool: String,
        error: IntrospectError,
    },
    /// Buffer pool introspection failed; the snapshot has no buffer pools.
    BufferPoolsUnavailable { error: IntrospectError },
}

pub type DiagnosticHook = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// Builds [`Snapshot`]s from one injected introspector. Holds no mutable
/// state, so one collector can be shared across threads.
pub struct SnapshotCollector {
    introspector: Arc<dyn RuntimeIntrospector>,
    diagnostics: Option<DiagnosticHook>,
}

impl SnapshotCollector {
    pub fn new(introspector: Arc<dyn RuntimeIntrospector>) -> Self {
        Self {
            introspector,
            diagnostics: None,
        }
    }

    /// Install a hook called for every item the collector recovers from.
    pub fn with_diagnostics(mut self, hook: DiagnosticHook) -> Self {
        self.diagnostics = Some(hook);
        self
    }

    /// Take one best-effort snapshot. Never fails: unreadable pools are left
    /// out, a missing buffer pool facility yields no buffer pools.
    ///
    /// Sections are read one after another, not atomically.
    #[instrument(skip(self), fields(operation = "collect"))]
    pub fn collect(&self) -> Snapshot {
        let timestamp = self.introspector.wall_clock();
        let uptime = self.introspector.uptime();

        let memory = self.collect_memory();
        let threads = self.collect_threads();
        let gc = self.collect_gc();
        let buffer_pools = self.collect_buffer_pools();
        let classes = self.collect_classes();

        tracing::debug!(
            pools = memory.pools.len(),
            collectors = gc.collectors.len(),
            buffer_pools = buffer_pools.len(),
            "Snapshot collected"
        );

        Snapshot {
            timestamp,
            uptime,
            memory,
            threads,
            gc,
            buffer_pools,
            classes,
        }
    }

    fn collect_memory(&self) -> Memory {
        let heap = self.introspector.heap_usage();
        let non_heap = self.introspector.non_heap_usage();
        Memory {
            heap_used: clamp_unknown(heap.used),
            heap_committed: clamp_unknown(heap.committed),
            heap_max: clamp_unknown(heap.max),
            non_heap_used: clamp_unknown(non_heap.used),
            non_heap_committed: clamp_unknown(non_heap.committed),
            pools: self.collect_pools(),
        }
    }

    fn collect_pools(&self) -> Vec<MemoryPool> {
        let mut pools = Vec::new();
        for raw_name in self.introspector.memory_pool_names() {
            let usage = match self.introspector.memory_pool_usage(&raw_name) {
                Ok(usage) => usage,
                Err(error) => {
                    tracing::debug!(pool = %raw_name, error = %error, "Skipping memory pool");
                    self.report(Diagnostic::PoolSkipped {
                        pool: raw_name,
                        error,
                    });
                    continue;
                }
            };
            let Some(name) = names::resolve_pool_name(&raw_name) else {
                continue;
            };
            pools.push(pool_from(name, usage.usage, usage.peak));
        }
        pools
    }

    fn collect_threads(&self) -> Threads {
        let counts = self.introspector.thread_counts();
        Threads {
            count: counts.count,
            peak_count: counts.peak_count,
        }
    }

    fn collect_gc(&self) -> GcStats {
        let collectors = self
            .introspector
            .garbage_collectors()
            .into_iter()
            .map(|c| GarbageCollector {
                name: names::resolve_gc_name(&c.name),
                collection_count: c.collection_count,
                collection_time: c.collection_time,
            })
            .collect();
        GcStats { collectors }
    }

    fn collect_buffer_pools(&self) -> Vec<BufferPool> {
        match self.introspector.buffer_pools() {
            Ok(pools) => pools
                .into_iter()
                .map(|p| BufferPool {
                    name: p.name,
                    count: p.count,
                    total_capacity: p.total_capacity,
                    used: p.used,
                })
                .collect(),
            Err(error) => {
                tracing::debug!(error = %error, "Buffer pools not available");
                self.report(Diagnostic::BufferPoolsUnavailable { error });
                Vec::new()
            }
        }
    }

    fn collect_classes(&self) -> ClassStats {
        let counts = self.introspector.class_counts();
        ClassStats {
            loaded_count: counts.loaded,
            total_loaded_count: counts.total_loaded,
            unloaded_count: counts.unloaded,
        }
    }

    fn report(&self, diagnostic: Diagnostic) {
        if let Some(hook) = &self.diagnostics {
            hook(&diagnostic);
        }
    }
}

fn pool_from(name: names::PoolCategory, usage: RawUsage, peak: RawUsage) -> MemoryPool {
    MemoryPool {
        name,
        used: clamp_unknown(usage.used),
        max: clamp_unknown(usage.max),
        committed: clamp_unknown(usage.committed),
        peak_used: clamp_unknown(peak.used),
        peak_max: clamp_unknown(peak.max),
    }
}
