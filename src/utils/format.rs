//! Human-readable time formatting

use std::time::Duration;

/// Format a number of seconds as `MM:SS`. Minutes are unbounded, so an hour
/// and a bit renders as `61:01`.
pub fn format_elapsed(seconds: u64) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Format a duration as a compact uptime string (`1h 2m 3s`, `4m 5s`, `6s`)
pub fn format_uptime(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
