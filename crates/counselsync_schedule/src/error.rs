// --- File: crates/counselsync_schedule/src/error.rs ---
use chrono::NaiveTime;
use thiserror::Error;

/// Errors raised while constructing scheduling domain values.
///
/// All of these are local validation failures; they are rejected before any
/// provider call is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid time range: start {start} is not before end {end}")]
    InvalidRange { start: String, end: String },

    #[error("invalid working-hours rule for {weekday}: start {start} is not before end {end}")]
    InvalidRule {
        weekday: String,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("overlapping working-hours rules on {weekday}")]
    OverlappingRules { weekday: String },

    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("unknown weekday: {0}")]
    UnknownWeekday(String),
}
