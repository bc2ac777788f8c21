// Value normalization: sentinel clamping and derived percentages

/// Clamp a raw counter where a negative value means "unknown" to 0.
pub fn clamp_unknown(raw: i64) -> u64 {
    if raw < 0 { 0 } else { raw as u64 }
}

/// Heap usage in percent, truncated. -1 signals an unknown max (0 bytes).
/// Expects already-clamped inputs.
pub fn heap_used_percent(used: u64, max: u64) -> i16 {
    if max == 0 {
        return -1;
    }
    let percent = (used as u128 * 100) / max as u128;
    percent.min(100) as i16
}
