//! Input validation for class catalogs.
//!
//! Checks persisted section records before they become a [`Catalog`].
//! Every record is inspected so a caller can show all problems at once.
//! Detects:
//! - Empty subject labels
//! - Unparseable days or times
//! - Sections that do not end after they start
//! - Declared subjects with no section (infeasible, but not malformed)
//!
//! [`Catalog`]: crate::models::Catalog

use std::collections::HashSet;

use crate::error::TimetableError;
use crate::models::{ClassSection, SectionRecord};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Position of the offending record, if the problem belongs to one.
    pub index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A record has a blank subject.
    EmptySubject,
    /// A start or end time is not `HH:mm`.
    InvalidTime,
    /// A day name is not recognized.
    UnknownDay,
    /// End time is not after start time.
    InvalidTimeRange,
    /// A declared subject has no section in the catalog.
    MissingSections,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            message: message.into(),
        }
    }

    /// Whether this problem prevents building a catalog.
    pub fn is_fatal(&self) -> bool {
        self.kind != ValidationErrorKind::MissingSections
    }
}

/// Validates section records and declared subjects.
///
/// Checks:
/// 1. Every record has a non-blank subject
/// 2. Every record's day and times parse
/// 3. Every record ends after it starts
/// 4. Every declared subject has at least one record
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_records(records: &[SectionRecord], required_subjects: &[String]) -> ValidationResult {
    let mut errors = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        if record.subject.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySubject,
                Some(idx),
                format!("Class #{idx} has an empty subject"),
            ));
        }

        match ClassSection::try_from(record) {
            Ok(_) => {}
            Err(TimetableError::UnknownDay(day)) => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDay,
                Some(idx),
                format!("Class #{idx} has unknown day '{day}'"),
            )),
            Err(TimetableError::InvalidTime(time)) => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTime,
                Some(idx),
                format!("Class #{idx} has invalid time '{time}'"),
            )),
            Err(err) => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeRange,
                Some(idx),
                format!("Class #{idx}: {err}"),
            )),
        }
    }

    // Declared subjects must be offered
    let offered: HashSet<String> = records
        .iter()
        .map(|r| r.subject.trim().to_lowercase())
        .collect();
    for subject in required_subjects {
        if !offered.contains(&subject.trim().to_lowercase()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingSections,
                None,
                format!("Subject '{}' has no sections", subject.trim()),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
