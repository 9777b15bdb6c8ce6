//! Weekly class timetable engine for the U-Engine ecosystem.
//!
//! Given a catalog of class sections (several time slots per subject), the
//! engine enumerates every conflict-free way to take exactly one section per
//! subject, scores each schedule against weighted soft preferences, and
//! returns the schedules that tie for the best score.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ClassSection`, `Catalog`, `Schedule`,
//!   `Preference`, `PreferenceSet`
//! - **`scheduler`**: Conflict checking, backtracking generation, selection
//! - **`scoring`**: Schedule metrics and the weighted preference model
//! - **`validation`**: Catalog record checks (bad times, unknown days, ...)
//! - **`config`**: TOML engine configuration (limits, parallel scoring)
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveTime, Weekday};
//! use u_timetable::models::{Catalog, ClassSection, Preference, PreferenceSet};
//!
//! let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
//! let catalog = Catalog::new()
//!     .with_section(ClassSection::new("Math", "Lee", Weekday::Thu, t(8), t(10), "A1").unwrap())
//!     .with_section(ClassSection::new("Math", "Kim", Weekday::Tue, t(13), t(15), "A2").unwrap())
//!     .with_section(ClassSection::new("Art", "Choi", Weekday::Tue, t(10), t(12), "B1").unwrap());
//!
//! let prefs = PreferenceSet::new().with(Preference::NoGapDays);
//! let best = u_timetable::generate_schedules(&catalog, &prefs);
//! assert_eq!(best.len(), 1);
//! assert_eq!(best[0].section_for("Math").unwrap().lecturer_name(), "Kim");
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod validation;

pub use error::{AbortReason, Result, TimetableError};

use models::{Catalog, PreferenceSet, Schedule};
use scoring::Score;

/// Tied-optimal schedules for a catalog.
///
/// Empty when the catalog is empty, a subject has no section, or every
/// combination conflicts. The order is deterministic for a given input.
pub fn generate_schedules(catalog: &Catalog, preferences: &PreferenceSet) -> Vec<Schedule> {
    scheduler::select_best(catalog, preferences).into_schedules()
}

/// Scores one schedule, e.g. one picked by the caller, without searching.
pub fn score_schedule(schedule: &Schedule, preferences: &PreferenceSet) -> Score {
    scoring::score_schedule(schedule, preferences)
}
