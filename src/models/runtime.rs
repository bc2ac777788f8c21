// Thread, buffer pool and class loading models

use serde::{Deserialize, Serialize};

/// Live and peak thread counts, as reported. Peak >= count is not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threads {
    pub count: u32,
    pub peak_count: u32,
}

/// Direct/mapped buffer pool; the name is kept as reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferPool {
    pub name: String,
    pub count: u64,
    pub total_capacity: u64,
    pub used: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStats {
    pub loaded_count: u64,
    pub total_loaded_count: u64,
    pub unloaded_count: u64,
}
