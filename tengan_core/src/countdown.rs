//! Countdown helpers for the next-drop display.

use chrono::{DateTime, Local};

/// Shown when the next dose is already due
pub const READY: &str = "READY";

/// Whole seconds until `next_drop`; negative once the dose is overdue
pub fn remaining_seconds(next_drop: DateTime<Local>, now: DateTime<Local>) -> i64 {
    (next_drop - now).num_seconds()
}

/// Format a remaining-seconds value the way the countdown is displayed:
/// `H:MM:SS` when an hour or more remains, `M:SS` below that, and
/// `READY` at or past zero.
pub fn format_countdown(secs: i64) -> String {
    if secs <= 0 {
        return READY.to_string();
    }

    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;

    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
