//! Weighted preference scoring.
//!
//! Each active preference contributes according to its rule; the sum is
//! clamped to `[-SCORE_BOUND, SCORE_BOUND]`.
//!
//! | Preference | Weight | Contribution |
//! |---|---|---|
//! | NoMorningClasses | 2.5 | `max(-10, -w * morning)` |
//! | NoEveningClasses | 2.5 | `max(-10, -w * evening)` |
//! | PreferMorningClasses | 2.0 | `w * morning` |
//! | PreferEveningClasses | 2.0 | `w * evening` |
//! | NoGapDays | 3.0 | `w * sections` if no gap day, else `max(-15, -w * gap_days)` |
//! | NoGapHours | 3.0 | `w * sections` if no gap hour, else `max(-15, -w * gap_hours)` |
//! | LeastClassDays | 1.5 | `max(-10, -w * class_days)` |
//! | MostClassDays | 1.5 | `w * class_days` |
//! | MinimizeEarlyMorningClasses | 2.0 | `max(-10, -w * early_morning)` |
//! | MaximizeBreakTimeBetweenClasses | 2.5 | `w * break_hours` |

use super::ScheduleMetrics;
use crate::models::{Preference, PreferenceSet, Schedule};

/// Score of a schedule. Higher is better.
pub type Score = f64;

/// Absolute bound of any score.
pub const SCORE_BOUND: Score = 100.0;

const COUNT_PENALTY_FLOOR: f64 = -10.0;
const GAP_PENALTY_FLOOR: f64 = -15.0;

/// Contribution of one preference to a schedule's score.
pub fn contribution(preference: Preference, metrics: &ScheduleMetrics) -> Score {
    let w = preference.weight();
    match preference {
        Preference::NoMorningClasses => penalty(w, metrics.morning_count as f64),
        Preference::NoEveningClasses => penalty(w, metrics.evening_count as f64),
        Preference::PreferMorningClasses => w * metrics.morning_count as f64,
        Preference::PreferEveningClasses => w * metrics.evening_count as f64,
        Preference::NoGapDays => gap_rule(w, metrics.gap_days, metrics.section_count),
        Preference::NoGapHours => gap_rule(w, metrics.gap_hours, metrics.section_count),
        Preference::LeastClassDays => penalty(w, metrics.class_days as f64),
        Preference::MostClassDays => w * metrics.class_days as f64,
        Preference::MinimizeEarlyMorningClasses => {
            penalty(w, metrics.early_morning_count as f64)
        }
        Preference::MaximizeBreakTimeBetweenClasses => w * metrics.total_break_hours,
    }
}

fn penalty(weight: f64, count: f64) -> Score {
    (-weight * count).max(COUNT_PENALTY_FLOOR)
}

// A compact schedule earns a reward proportional to its size.
fn gap_rule(weight: f64, gaps: u32, sections: usize) -> Score {
    if gaps == 0 {
        weight * sections as f64
    } else {
        (-weight * gaps as f64).max(GAP_PENALTY_FLOOR)
    }
}

/// Scores precomputed metrics against a preference set.
pub fn score_metrics(metrics: &ScheduleMetrics, preferences: &PreferenceSet) -> Score {
    let raw: Score = preferences.iter().map(|p| contribution(p, metrics)).sum();
    raw.clamp(-SCORE_BOUND, SCORE_BOUND)
}

/// Scores a schedule against a preference set.
///
/// Deterministic and side-effect free. An empty set scores zero.
pub fn score_schedule(schedule: &Schedule, preferences: &PreferenceSet) -> Score {
    if preferences.is_empty() {
        return 0.0;
    }
    score_metrics(&ScheduleMetrics::calculate(schedule), preferences)
}

/// Per-preference view of a score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Contribution of each active preference, in set order.
    pub contributions: Vec<(Preference, Score)>,
    /// Sum before clamping.
    pub raw: Score,
    /// Final clamped score.
    pub total: Score,
}

impl ScoreBreakdown {
    /// Explains how a schedule's score is composed.
    pub fn calculate(schedule: &Schedule, preferences: &PreferenceSet) -> Self {
        let metrics = ScheduleMetrics::calculate(schedule);
        let contributions: Vec<(Preference, Score)> = preferences
            .iter()
            .map(|p| (p, contribution(p, &metrics)))
            .collect();
        let raw: Score = contributions.iter().map(|(_, c)| c).sum();

        Self {
            contributions,
            raw,
            total: raw.clamp(-SCORE_BOUND, SCORE_BOUND),
        }
    }

    /// Whether the raw sum fell outside the score bounds.
    pub fn is_clamped(&self) -> bool {
        self.raw != self.total
    }
}
