//! Timetable domain models.
//!
//! Provides the value types for describing what can be taken (sections in a
//! catalog), what the student wants (preferences) and what the engine
//! produces (schedules).
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Language School | Sports Club |
//! |-------------|-----------|-----------------|-------------|
//! | Subject | Course | Level | Discipline |
//! | ClassSection | Lecture Slot | Group Lesson | Training Session |
//! | Catalog | Course Offering | Term Programme | Season Plan |
//! | Schedule | Weekly Timetable | Lesson Plan | Training Week |

mod catalog;
mod preference;
mod schedule;
mod section;

pub use catalog::Catalog;
pub use preference::{Preference, PreferenceSet};
pub use schedule::Schedule;
pub use section::{day_name, parse_day, parse_time, ClassSection, SectionRecord};

pub(crate) use section::minutes_between;
