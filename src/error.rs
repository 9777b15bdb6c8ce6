//! Error types for timetable construction and search.

use std::fmt;

use chrono::NaiveTime;
use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for timetable operations.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// A section whose end time is not after its start time.
    #[error("Invalid time range: end {} must be after start {}", .end.format("%H:%M"), .start.format("%H:%M"))]
    InvalidTimeRange { start: NaiveTime, end: NaiveTime },

    /// A time-of-day string that is not `HH:mm` (or `HH:mm:ss`).
    #[error("Invalid time of day '{0}', expected HH:mm")]
    InvalidTime(String),

    /// A day-of-week name that could not be recognized.
    #[error("Unknown day of week '{0}'")]
    UnknownDay(String),

    /// A preference tag outside the supported set.
    #[error("Unknown preference '{0}'")]
    UnknownPreference(String),

    /// A catalog rejected at ingestion, with every problem found.
    #[error("Invalid catalog: {} problem(s), first: {}", .0.len(), first_message(.0))]
    InvalidCatalog(Vec<ValidationError>),

    /// The search hit a limit or was cancelled before completing.
    #[error("Search aborted: {0}")]
    SearchAborted(AbortReason),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Why a search stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The caller's cancellation flag was raised.
    Cancelled,
    /// Wall-clock limit exceeded.
    TimeLimit { limit_ms: u64 },
    /// More complete schedules than allowed.
    ScheduleLimit { limit: usize },
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Cancelled => write!(f, "cancelled"),
            AbortReason::TimeLimit { limit_ms } => write!(f, "time limit of {limit_ms}ms exceeded"),
            AbortReason::ScheduleLimit { limit } => {
                write!(f, "more than {limit} schedules")
            }
        }
    }
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}

/// Result type alias for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
