//! Human-readable rendering of sizes and timestamps.

use chrono::{DateTime, Local, Utc};

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const UNIT_BASE: f64 = 1024.0;

/// Formats a byte count using the largest unit (base 1024, up to TB) that
/// keeps the value at or above 1, rounded to two decimals.
///
/// Trailing zeros are dropped: `1024` is `"1 KB"`, `1536` is `"1.5 KB"`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit_index = 0;
    while value >= UNIT_BASE && unit_index < UNITS.len() - 1 {
        value /= UNIT_BASE;
        unit_index += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit_index])
}

/// Formats a timestamp in local time for card captions.
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => "Unknown".to_string(),
    }
}
