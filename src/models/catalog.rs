//! Catalog of offerable class sections.
//!
//! The catalog is the only input to schedule generation. Subjects are
//! derived from the sections in first-occurrence order; the order decides
//! search order (and so enumeration order), never correctness.
//!
//! A catalog may also declare subjects up front. A declared subject with
//! no section makes the catalog infeasible: generation yields nothing.
//!
//! # Persisted Format
//!
//! ```json
//! {
//!   "subjects": ["Math"],
//!   "classes": [
//!     { "subject": "Math", "lecturer_name": "Dr. Lee", "day_of_week": "Monday",
//!       "start_time": "09:00", "end_time": "10:30", "room": "A101" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ClassSection, SectionRecord};
use crate::error::{Result, TimetableError};
use crate::validation::validate_records;

/// Ordered collection of class sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    sections: Vec<ClassSection>,
    required_subjects: Vec<String>,
}

/// On-disk catalog shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subjects: Vec<String>,
    #[serde(default)]
    classes: Vec<SectionRecord>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from already-validated sections.
    pub fn from_sections(sections: Vec<ClassSection>) -> Self {
        Self {
            sections,
            required_subjects: Vec::new(),
        }
    }

    /// Builds a catalog from text records, rejecting it if any record is bad.
    ///
    /// Every record is checked before failing, so the error lists all problems.
    /// Declared subjects without sections are not an error here.
    pub fn from_records(records: &[SectionRecord], required_subjects: &[String]) -> Result<Self> {
        if let Err(errors) = validate_records(records, required_subjects) {
            let fatal: Vec<_> = errors.into_iter().filter(|e| e.is_fatal()).collect();
            if !fatal.is_empty() {
                return Err(TimetableError::InvalidCatalog(fatal));
            }
        }

        let sections = records
            .iter()
            .map(ClassSection::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut catalog = Self::from_sections(sections);
        for subject in required_subjects {
            catalog.require_subject(subject.trim());
        }
        Ok(catalog)
    }

    /// Declares a subject every schedule must contain.
    pub fn with_required_subject(mut self, subject: impl Into<String>) -> Self {
        self.require_subject(subject);
        self
    }

    fn require_subject(&mut self, subject: impl Into<String>) {
        let subject = subject.into();
        let exists = self
            .required_subjects
            .iter()
            .any(|s| s.to_lowercase() == subject.to_lowercase());
        if !exists {
            self.required_subjects.push(subject);
        }
    }

    /// Appends a section.
    pub fn add(&mut self, section: ClassSection) {
        self.sections.push(section);
    }

    /// Adds a section, builder style.
    pub fn with_section(mut self, section: ClassSection) -> Self {
        self.add(section);
        self
    }

    /// Removes the first section equal to `section`. Returns whether one was removed.
    pub fn remove(&mut self, section: &ClassSection) -> bool {
        match self.sections.iter().position(|s| s == section) {
            Some(idx) => {
                self.sections.remove(idx);
                true
            }
            None => false,
        }
    }

    /// All sections in catalog order.
    pub fn sections(&self) -> &[ClassSection] {
        &self.sections
    }

    /// Declared subjects.
    pub fn required_subjects(&self) -> &[String] {
        &self.required_subjects
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Distinct subjects in search order.
    ///
    /// Declared subjects come first, then subjects seen in the sections.
    /// Labels are compared case-insensitively; the first spelling wins.
    pub fn subjects(&self) -> Vec<&str> {
        let mut seen: Vec<String> = Vec::new();
        let mut subjects = Vec::new();

        let labels = self
            .required_subjects
            .iter()
            .map(String::as_str)
            .chain(self.sections.iter().map(ClassSection::subject));

        for label in labels {
            let key = label.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                subjects.push(label);
            }
        }
        subjects
    }

    /// Sections offered for a subject (case-insensitive), in catalog order.
    pub fn sections_for(&self, subject: &str) -> Vec<&ClassSection> {
        self.sections
            .iter()
            .filter(|s| s.is_subject(subject))
            .collect()
    }

    /// Sections ordered by subject, lecturer, day (Monday first), start time.
    pub fn sorted(&self) -> Vec<&ClassSection> {
        let mut sorted: Vec<&ClassSection> = self.sections.iter().collect();
        sorted.sort_by(|a, b| {
            a.subject()
                .cmp(b.subject())
                .then_with(|| a.lecturer_name().cmp(b.lecturer_name()))
                .then_with(|| {
                    a.day()
                        .num_days_from_monday()
                        .cmp(&b.day().num_days_from_monday())
                })
                .then_with(|| a.start_time().cmp(&b.start_time()))
        });
        sorted
    }

    /// Parses a catalog from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_records(&file.classes, &file.subjects)
    }

    /// Serializes the catalog to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        let file = CatalogFile {
            subjects: self.required_subjects.clone(),
            classes: self.sections.iter().map(SectionRecord::from).collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON, or
    /// contains invalid records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Writes the catalog as JSON, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

impl FromIterator<ClassSection> for Catalog {
    fn from_iter<I: IntoIterator<Item = ClassSection>>(iter: I) -> Self {
        Self::from_sections(iter.into_iter().collect())
    }
}
