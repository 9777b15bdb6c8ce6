//! Preference scoring for schedules.
//!
//! Scoring is split in two steps: [`ScheduleMetrics`] measures the shape of
//! a schedule (morning sections, gap days, idle hours, ...), then each active
//! [`Preference`] turns those measurements into a weighted contribution.
//! The clamped sum is the schedule's score.
//!
//! Scoring is pure, so schedules can be scored in any order or in parallel.
//!
//! [`Preference`]: crate::models::Preference

mod metrics;
mod scorer;

pub use metrics::ScheduleMetrics;
pub use scorer::{
    contribution, score_metrics, score_schedule, Score, ScoreBreakdown, SCORE_BOUND,
};
