// Host process counters via sysinfo

mod linux;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::instrument;

use crate::error::IntrospectError;
use crate::introspector::{
    ClassCounts, PoolUsage, RawBufferPool, RawCollector, RawUsage, RuntimeIntrospector,
    ThreadCounts,
};

/// Introspects the current native process. There is no managed heap here:
/// resident memory stands in for heap used, virtual size for committed and
/// total system memory for max. Pools, collectors, buffer pools and class
/// loading do not exist for a native process and are reported empty.
pub struct SysinfoIntrospector {
    pid: Pid,
    sys: Mutex<System>,
    peak_threads: AtomicU32,
}

impl SysinfoIntrospector {
    pub fn new() -> anyhow::Result<Self> {
        let pid = sysinfo::get_current_pid().map_err(|e| anyhow::anyhow!("current pid: {}", e))?;
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        Ok(Self {
            pid,
            sys: Mutex::new(sys),
            peak_threads: AtomicU32::new(0),
        })
    }

    fn lock(&self) -> MutexGuard<'_, System> {
        self.sys.lock().unwrap_or_else(|e| {
            tracing::warn!("sysinfo lock poisoned, reusing state");
            e.into_inner()
        })
    }

    fn refreshed(&self) -> MutexGuard<'_, System> {
        let mut sys = self.lock();
        sys.refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);
        sys
    }
}

impl RuntimeIntrospector for SysinfoIntrospector {
    fn uptime(&self) -> Duration {
        let sys = self.refreshed();
        let secs = sys.process(self.pid).map(|p| p.run_time()).unwrap_or(0);
        Duration::from_secs(secs)
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "heap_usage"))]
    fn heap_usage(&self) -> RawUsage {
        let sys = self.refreshed();
        let Some(process) = sys.process(self.pid) else {
            tracing::debug!(pid = %self.pid, "Current process not found");
            return RawUsage::UNKNOWN;
        };
        let total = sys.total_memory();
        RawUsage {
            used: to_signed(process.memory()),
            committed: to_signed(process.virtual_memory()),
            max: if total > 0 { to_signed(total) } else { -1 },
        }
    }

    fn non_heap_usage(&self) -> RawUsage {
        RawUsage::UNKNOWN
    }

    fn memory_pool_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn memory_pool_usage(&self, name: &str) -> Result<PoolUsage, IntrospectError> {
        Err(IntrospectError::PoolUnavailable {
            pool: name.to_string(),
            reason: "native processes have no memory pools".into(),
        })
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "thread_counts"))]
    fn thread_counts(&self) -> ThreadCounts {
        let count = linux::read_thread_count_linux().or_else(|| {
            let sys = self.refreshed();
            sys.process(self.pid)
                .and_then(|p| p.tasks().map(|t| t.len().min(u32::MAX as usize) as u32))
        });
        if count.is_none() {
            tracing::debug!(pid = %self.pid, "Thread count unavailable");
        }
        observe_threads(&self.peak_threads, count)
    }

    fn garbage_collectors(&self) -> Vec<RawCollector> {
        Vec::new()
    }

    fn buffer_pools(&self) -> Result<Vec<RawBufferPool>, IntrospectError> {
        Err(IntrospectError::Unsupported(
            "buffer pools are not tracked for native processes".into(),
        ))
    }

    fn class_counts(&self) -> ClassCounts {
        ClassCounts::default()
    }
}

fn to_signed(bytes: u64) -> i64 {
    i64::try_from(bytes).unwrap_or(i64::MAX)
}

/// Records `count` in the high-water mark. An unreadable count is reported as
/// 0 and leaves the mark untouched.
fn observe_threads(peak: &AtomicU32, count: Option<u32>) -> ThreadCounts {
    let count = count.unwrap_or(0);
    let previous = peak.fetch_max(count, Ordering::Relaxed);
    ThreadCounts {
        count,
        peak_count: previous.max(count),
    }
}
