//! Human-readable duration formatting
//!
//! Display-only breakdown with fixed conversion constants: a year is always
//! exactly 365 days here, which deliberately undercounts leap years. Not
//! calendar-aware, unlike the interval resolver.

/// Unit table, largest first. 31,536,000 s = 365 days.
const UNITS: [(u64, &str); 5] = [
    (31_536_000, "year"),
    (604_800, "week"),
    (86_400, "day"),
    (3_600, "hour"),
    (60, "minute"),
];

/// Format a non-negative second count as at most the two largest non-zero
/// units, e.g. "2 weeks 3 days". Zero units are skipped entirely; a duration
/// under a minute renders as the empty string.
pub fn format_duration(seconds: f64) -> String {
    let mut remaining = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };

    let mut parts: Vec<String> = Vec::new();
    for (unit_seconds, name) in UNITS {
        let count = remaining / unit_seconds;
        remaining %= unit_seconds;
        match count {
            0 => {}
            1 => parts.push(format!("1 {name}")),
            n => parts.push(format!("{n} {name}s")),
        }
    }

    parts.truncate(2);
    parts.join(" ")
}
