//! Elapsed-time formatting.

use std::time::Duration;

/// Format an elapsed duration as fixed-width `HH:MM:SS`.
///
/// Sub-second precision is truncated; hours keep growing past 99.
pub fn format_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (hours, remainder) = (secs / 3600, secs % 3600);
    let (minutes, seconds) = (remainder / 60, remainder % 60);
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
