// Human-readable text rendering of a snapshot

use std::fmt;
use std::time::Duration;

use crate::models::Snapshot;

const UNITS: [&str; 6] = ["b", "kb", "mb", "gb", "tb", "pb"];

/// Byte count with a binary unit suffix and at most one decimal, e.g. "1.5mb".
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        return format!("{}{}", bytes, UNITS[0]);
    }
    trim_decimal(value, UNITS[unit])
}

/// Duration in the largest fitting unit with at most one decimal, e.g. "1.2s".
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis < 1000 {
        return format!("{}ms", millis);
    }
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        trim_decimal(secs, "s")
    } else if secs < 3600.0 {
        trim_decimal(secs / 60.0, "m")
    } else if secs < 86400.0 {
        trim_decimal(secs / 3600.0, "h")
    } else {
        trim_decimal(secs / 86400.0, "d")
    }
}

fn trim_decimal(value: f64, suffix: &str) -> String {
    let s = format!("{:.1}", value);
    let s = s.strip_suffix(".0").unwrap_or(&s);
    format!("{}{}", s, suffix)
}

/// Text view of a [`Snapshot`]; the model itself carries no formatting.
pub struct SnapshotReport<'a>(pub &'a Snapshot);

impl fmt::Display for SnapshotReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(
            f,
            "timestamp: {}, uptime: {}",
            s.timestamp.to_rfc3339(),
            format_duration(s.uptime)
        )?;

        let mem = &s.memory;
        let percent = match mem.heap_used_percent() {
            -1 => "unknown".to_string(),
            p => format!("{}%", p),
        };
        writeln!(
            f,
            "heap committed: {}, heap used: {} ({}), heap max: {}, non heap committed: {}, non heap used: {}",
            format_bytes(mem.heap_committed),
            format_bytes(mem.heap_used),
            percent,
            format_bytes(mem.heap_max),
            format_bytes(mem.non_heap_committed),
            format_bytes(mem.non_heap_used)
        )?;
        for pool in mem {
            writeln!(
                f,
                "  pool {}: used: {}, max: {}, committed: {}, peak used: {}, peak max: {}",
                pool.name,
                format_bytes(pool.used),
                format_bytes(pool.max),
                format_bytes(pool.committed),
                format_bytes(pool.peak_used),
                format_bytes(pool.peak_max)
            )?;
        }

        writeln!(
            f,
            "threads: count: {}, peak count: {}",
            s.threads.count, s.threads.peak_count
        )?;

        for gc in &s.gc {
            writeln!(
                f,
                "gc {}: collection count: {}, collection time: {}",
                gc.name,
                gc.collection_count,
                format_duration(gc.collection_time)
            )?;
        }

        for pool in &s.buffer_pools {
            writeln!(
                f,
                "buffer pool {}: count: {}, total capacity: {}, used: {}",
                pool.name,
                pool.count,
                format_bytes(pool.total_capacity),
                format_bytes(pool.used)
            )?;
        }

        write!(
            f,
            "classes: loaded: {}, total loaded: {}, unloaded: {}",
            s.classes.loaded_count, s.classes.total_loaded_count, s.classes.unloaded_count
        )
    }
}
