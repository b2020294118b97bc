//! ---
//! ranklog_section: "01-core-functionality"
//! ranklog_subsection: "module"
//! ranklog_type: "source"
//! ranklog_scope: "code"
//! ranklog_description: "Shared primitives and utilities for the logging engine."
//! ranklog_version: "v0.0.0-prealpha"
//! ranklog_owner: "tbd"
//! ---
use std::time::Duration;

use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Capture the wall-clock time used for timer start/stop lines.
pub fn wall_clock_now() -> DateTime<Local> {
    Local::now()
}

/// Render a wall-clock timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Render an elapsed duration as `HH:MM:SS.mmm`. Hours do not wrap.
pub fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        hours,
        minutes,
        seconds,
        elapsed.subsec_millis()
    )
}
