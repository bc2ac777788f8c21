// Canonical names for vendor-specific memory pool and collector names

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical memory pool category; serializes to lowercase JSON (e.g. "young").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolCategory {
    Young,
    Survivor,
    Old,
}

impl PoolCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PoolCategory::Young => YOUNG,
            PoolCategory::Survivor => SURVIVOR,
            PoolCategory::Old => OLD,
        }
    }
}

impl fmt::Display for PoolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const YOUNG: &str = "young";
pub const SURVIVOR: &str = "survivor";
pub const OLD: &str = "old";

const YOUNG_POOLS: &[&str] = &["Eden Space", "PS Eden Space", "Par Eden Space", "G1 Eden Space"];
const SURVIVOR_POOLS: &[&str] = &[
    "Survivor Space",
    "PS Survivor Space",
    "Par Survivor Space",
    "G1 Survivor Space",
];
const OLD_POOLS: &[&str] = &["Tenured Gen", "PS Old Gen", "CMS Old Gen", "G1 Old Gen"];

const YOUNG_COLLECTORS: &[&str] = &["Copy", "PS Scavenge", "ParNew", "G1 Young Generation"];
const OLD_COLLECTORS: &[&str] = &[
    "MarkSweepCompact",
    "PS MarkSweep",
    "ConcurrentMarkSweep",
    "G1 Old Generation",
];

/// Resolve a raw memory pool name. `None` means the pool is not interesting
/// (code cache, metaspace, perm gen, ...) and callers drop it.
pub fn resolve_pool_name(raw: &str) -> Option<PoolCategory> {
    if YOUNG_POOLS.contains(&raw) {
        Some(PoolCategory::Young)
    } else if SURVIVOR_POOLS.contains(&raw) {
        Some(PoolCategory::Survivor)
    } else if OLD_POOLS.contains(&raw) {
        Some(PoolCategory::Old)
    } else {
        None
    }
}

/// Resolve a raw collector name, falling back to the raw name when unknown.
/// Collectors are never dropped.
pub fn resolve_gc_name(raw: &str) -> String {
    canonical_gc_name(raw).unwrap_or(raw).to_string()
}

fn canonical_gc_name(raw: &str) -> Option<&'static str> {
    if YOUNG_COLLECTORS.contains(&raw) {
        Some(YOUNG)
    } else if OLD_COLLECTORS.contains(&raw) {
        Some(OLD)
    } else {
        None
    }
}
