//! Class section model.
//!
//! A section is one concrete weekly time slot in which a subject is taught:
//! a day, a half-open time interval `[start, end)`, a lecturer and a room.
//! Sections that share a subject are mutually exclusive alternatives.
//!
//! # Time Representation
//! Times are `chrono::NaiveTime` with minute resolution. Days are
//! `chrono::Weekday`; Sunday is accepted but the usual catalog only uses
//! Monday through Saturday.

use std::fmt;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// One offering of a subject at a fixed weekly slot.
///
/// Immutable once constructed. `end_time > start_time` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassSection {
    subject: String,
    lecturer_name: String,
    day: Weekday,
    start_time: NaiveTime,
    end_time: NaiveTime,
    room: String,
}

impl ClassSection {
    /// Creates a section, rejecting empty or inverted time ranges.
    ///
    /// # Errors
    /// `InvalidTimeRange` if `end_time <= start_time`.
    pub fn new(
        subject: impl Into<String>,
        lecturer_name: impl Into<String>,
        day: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
        room: impl Into<String>,
    ) -> Result<Self> {
        // Minute resolution.
        let start_time = truncate_to_minute(start_time);
        let end_time = truncate_to_minute(end_time);
        if end_time <= start_time {
            return Err(TimetableError::InvalidTimeRange {
                start: start_time,
                end: end_time,
            });
        }

        Ok(Self {
            subject: subject.into(),
            lecturer_name: lecturer_name.into(),
            day,
            start_time,
            end_time,
            room: room.into(),
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn lecturer_name(&self) -> &str {
        &self.lecturer_name
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Hour-of-day the section starts in (0..24).
    #[inline]
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Length of the section in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        minutes_between(self.start_time, self.end_time)
    }

    /// Whether the subject label matches, ignoring case.
    pub fn is_subject(&self, subject: &str) -> bool {
        self.subject.to_lowercase() == subject.to_lowercase()
    }

    /// Whether two sections share a day and their intervals intersect.
    ///
    /// Intervals are half-open, so back-to-back sections do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && !(self.end_time <= other.start_time || self.start_time >= other.end_time)
    }
}

impl fmt::Display for ClassSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} {}-{}",
            self.subject,
            self.lecturer_name,
            day_name(self.day),
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
        )
    }
}

/// Persisted shape of a section: every field is plain text.
///
/// Days use full English names, times use 24-hour `HH:mm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub subject: String,
    #[serde(default)]
    pub lecturer_name: String,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, alias = "auditory")]
    pub room: String,
}

impl SectionRecord {
    /// Creates a record from text fields.
    pub fn new(
        subject: impl Into<String>,
        lecturer_name: impl Into<String>,
        day_of_week: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            lecturer_name: lecturer_name.into(),
            day_of_week: day_of_week.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            room: room.into(),
        }
    }
}

impl TryFrom<&SectionRecord> for ClassSection {
    type Error = TimetableError;

    fn try_from(record: &SectionRecord) -> Result<Self> {
        ClassSection::new(
            record.subject.trim(),
            record.lecturer_name.trim(),
            parse_day(&record.day_of_week)?,
            parse_time(&record.start_time)?,
            parse_time(&record.end_time)?,
            record.room.trim(),
        )
    }
}

impl TryFrom<SectionRecord> for ClassSection {
    type Error = TimetableError;

    fn try_from(record: SectionRecord) -> Result<Self> {
        ClassSection::try_from(&record)
    }
}

impl From<&ClassSection> for SectionRecord {
    fn from(section: &ClassSection) -> Self {
        Self {
            subject: section.subject.clone(),
            lecturer_name: section.lecturer_name.clone(),
            day_of_week: day_name(section.day).to_string(),
            start_time: section.start_time.format("%H:%M").to_string(),
            end_time: section.end_time.format("%H:%M").to_string(),
            room: section.room.clone(),
        }
    }
}

/// Parses a 24-hour `HH:mm` time, also accepting `HH:mm:ss`.
pub fn parse_time(text: &str) -> Result<NaiveTime> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .map_err(|_| TimetableError::InvalidTime(text.to_string()))
}

/// Parses a day name (`"Monday"`, `"mon"`, case-insensitive).
pub fn parse_day(text: &str) -> Result<Weekday> {
    text.trim()
        .parse::<Weekday>()
        .map_err(|_| TimetableError::UnknownDay(text.trim().to_string()))
}

/// Full English name of a day.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Signed minutes from `from` to `to`.
#[inline]
pub(crate) fn minutes_between(from: NaiveTime, to: NaiveTime) -> i64 {
    to.signed_duration_since(from).num_minutes()
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}
