// Linux-specific helpers: /proc/self/status.

#[cfg(target_os = "linux")]
const SELF_STATUS: &str = "/proc/self/status";

/// Thread count of the current process from /proc/self/status (Linux).
pub(super) fn read_thread_count_linux() -> Option<u32> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string(SELF_STATUS).ok()?;
        parse_status_field(&content, "Threads")?.parse().ok()
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Value of a `Key:\tvalue` line, trimmed.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(super) fn parse_status_field<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        (k == key).then(|| v.trim())
    })
}
