//! Schedule shape metrics.
//!
//! Computes the counts every preference rule is defined over, once per
//! schedule, so scoring a schedule against any preference set is a cheap
//! lookup.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Morning | Sections starting before 12:00 |
//! | Evening | Sections starting at 18:00 or later |
//! | Early morning | Sections starting in [06:00, 09:00) |
//! | Class days | Distinct days with a section |
//! | Gap days | Skipped days between the first and last class day |
//! | Gap hours | Per day, sum of `floor(gap - 1h)` over gaps longer than 1h |
//! | Break hours | Per day, sum of raw gaps longer than 1h |

use std::collections::BTreeMap;

use crate::models::{minutes_between, ClassSection, Schedule};

const NOON: u32 = 12;
const EVENING: u32 = 18;
const EARLY_MORNING: std::ops::Range<u32> = 6..9;
const MINUTES_PER_HOUR: i64 = 60;

/// Shape indicators of a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleMetrics {
    /// Number of sections.
    pub section_count: usize,
    /// Sections starting before noon.
    pub morning_count: usize,
    /// Sections starting at 18:00 or later.
    pub evening_count: usize,
    /// Sections starting from 06:00 up to (not including) 09:00.
    pub early_morning_count: usize,
    /// Distinct days with at least one section.
    pub class_days: usize,
    /// Fully skipped days between the earliest and latest class day.
    pub gap_days: u32,
    /// Whole idle hours beyond the first hour of each long gap.
    pub gap_hours: u32,
    /// Total length of gaps longer than one hour, in hours.
    pub total_break_hours: f64,
}

impl ScheduleMetrics {
    /// Computes metrics for a schedule.
    ///
    /// Days are ordered Sunday (0) through Saturday (6) for gap counting.
    pub fn calculate(schedule: &Schedule) -> Self {
        let sections = schedule.sections();

        let mut by_day: BTreeMap<u32, Vec<&ClassSection>> = BTreeMap::new();
        for s in sections {
            by_day.entry(s.day().num_days_from_sunday()).or_default().push(s);
        }

        let days: Vec<u32> = by_day.keys().copied().collect();
        let gap_days: u32 = days.windows(2).map(|w| w[1] - w[0] - 1).sum();

        let mut gap_hours: u32 = 0;
        let mut break_minutes: i64 = 0;
        for day in by_day.values_mut() {
            day.sort_by_key(|s| s.start_time());
            for pair in day.windows(2) {
                let gap = minutes_between(pair[0].end_time(), pair[1].start_time());
                if gap > MINUTES_PER_HOUR {
                    gap_hours += ((gap - MINUTES_PER_HOUR) / MINUTES_PER_HOUR) as u32;
                    break_minutes += gap;
                }
            }
        }

        Self {
            section_count: sections.len(),
            morning_count: sections.iter().filter(|s| s.start_hour() < NOON).count(),
            evening_count: sections.iter().filter(|s| s.start_hour() >= EVENING).count(),
            early_morning_count: sections
                .iter()
                .filter(|s| EARLY_MORNING.contains(&s.start_hour()))
                .count(),
            class_days: days.len(),
            gap_days,
            gap_hours,
            total_break_hours: break_minutes as f64 / MINUTES_PER_HOUR as f64,
        }
    }
}
