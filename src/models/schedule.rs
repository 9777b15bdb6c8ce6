//! Schedule (solution) model.
//!
//! A schedule picks exactly one section per subject. Schedules produced by
//! the generator never contain two sections that overlap on the same day;
//! schedules assembled by a caller are not checked on construction, use
//! [`Schedule::has_conflicts`] for that.

use chrono::Weekday;
use serde::{Serialize, Serializer};

use super::{ClassSection, SectionRecord};

/// An ordered selection of sections, one per subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Schedule {
    sections: Vec<ClassSection>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps sections in the given order.
    pub fn from_sections(sections: Vec<ClassSection>) -> Self {
        Self { sections }
    }

    /// Sections in selection order (subject search order for generated schedules).
    pub fn sections(&self) -> &[ClassSection] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section chosen for a subject (case-insensitive).
    pub fn section_for(&self, subject: &str) -> Option<&ClassSection> {
        self.sections.iter().find(|s| s.is_subject(subject))
    }

    /// Sections on a given day, ordered by start time.
    pub fn sections_on(&self, day: Weekday) -> Vec<&ClassSection> {
        let mut on_day: Vec<&ClassSection> =
            self.sections.iter().filter(|s| s.day() == day).collect();
        on_day.sort_by_key(|s| s.start_time());
        on_day
    }

    /// Distinct days with at least one section, Sunday first.
    pub fn days(&self) -> Vec<Weekday> {
        let mut days: Vec<Weekday> = Vec::new();
        for s in &self.sections {
            if !days.contains(&s.day()) {
                days.push(s.day());
            }
        }
        days.sort_by_key(|d| d.num_days_from_sunday());
        days
    }

    /// Whether any two sections overlap.
    pub fn has_conflicts(&self) -> bool {
        self.sections
            .iter()
            .enumerate()
            .any(|(i, a)| self.sections[i + 1..].iter().any(|b| a.overlaps(b)))
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let records: Vec<SectionRecord> = self.sections.iter().map(SectionRecord::from).collect();
        records.serialize(serializer)
    }
}
