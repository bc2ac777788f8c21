// Snapshot data model: immutable values built by the collector

mod gc;
mod memory;
mod runtime;
mod snapshot;

pub use crate::names::PoolCategory;
pub use gc::{GarbageCollector, GcStats};
pub use memory::{Memory, MemoryPool};
pub use runtime::{BufferPool, ClassStats, Threads};
pub use snapshot::Snapshot;
