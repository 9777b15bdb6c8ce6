//! Soft scheduling preferences.
//!
//! A closed set of ten criteria, each with a fixed weight. Callers activate
//! any subset through a [`PreferenceSet`]; duplicates collapse and the set
//! iterates in declaration order, so scores never depend on how the caller
//! listed its preferences.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;

/// A named soft criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Preference {
    NoMorningClasses,
    NoEveningClasses,
    PreferMorningClasses,
    PreferEveningClasses,
    NoGapDays,
    NoGapHours,
    LeastClassDays,
    MostClassDays,
    MinimizeEarlyMorningClasses,
    MaximizeBreakTimeBetweenClasses,
}

impl Preference {
    /// Every preference, in declaration order.
    pub const ALL: [Preference; 10] = [
        Preference::NoMorningClasses,
        Preference::NoEveningClasses,
        Preference::PreferMorningClasses,
        Preference::PreferEveningClasses,
        Preference::NoGapDays,
        Preference::NoGapHours,
        Preference::LeastClassDays,
        Preference::MostClassDays,
        Preference::MinimizeEarlyMorningClasses,
        Preference::MaximizeBreakTimeBetweenClasses,
    ];

    /// Fixed weight of this preference.
    pub fn weight(self) -> f64 {
        match self {
            Preference::NoMorningClasses | Preference::NoEveningClasses => 2.5,
            Preference::PreferMorningClasses | Preference::PreferEveningClasses => 2.0,
            Preference::NoGapDays | Preference::NoGapHours => 3.0,
            Preference::LeastClassDays | Preference::MostClassDays => 1.5,
            Preference::MinimizeEarlyMorningClasses => 2.0,
            Preference::MaximizeBreakTimeBetweenClasses => 2.5,
        }
    }

    /// Tag name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Preference::NoMorningClasses => "NoMorningClasses",
            Preference::NoEveningClasses => "NoEveningClasses",
            Preference::PreferMorningClasses => "PreferMorningClasses",
            Preference::PreferEveningClasses => "PreferEveningClasses",
            Preference::NoGapDays => "NoGapDays",
            Preference::NoGapHours => "NoGapHours",
            Preference::LeastClassDays => "LeastClassDays",
            Preference::MostClassDays => "MostClassDays",
            Preference::MinimizeEarlyMorningClasses => "MinimizeEarlyMorningClasses",
            Preference::MaximizeBreakTimeBetweenClasses => "MaximizeBreakTimeBetweenClasses",
        }
    }

    /// Human-readable label.
    pub fn description(self) -> &'static str {
        match self {
            Preference::NoMorningClasses => "No classes starting before noon",
            Preference::NoEveningClasses => "No classes starting at 18:00 or later",
            Preference::PreferMorningClasses => "Prefer classes starting before noon",
            Preference::PreferEveningClasses => "Prefer classes starting at 18:00 or later",
            Preference::NoGapDays => "No free weekdays between class days",
            Preference::NoGapHours => "No idle hours between classes on a day",
            Preference::LeastClassDays => "Fewest days with classes",
            Preference::MostClassDays => "Spread classes over most days",
            Preference::MinimizeEarlyMorningClasses => "Avoid classes starting 06:00-09:00",
            Preference::MaximizeBreakTimeBetweenClasses => "Long breaks between classes",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preference {
    type Err = TimetableError;

    /// Accepts the tag name in any case, with or without `_`/`-` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        Preference::ALL
            .into_iter()
            .find(|p| p.name().to_lowercase() == key)
            .ok_or_else(|| TimetableError::UnknownPreference(s.trim().to_string()))
    }
}

/// The active preferences for one scoring run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceSet(BTreeSet<Preference>);

impl PreferenceSet {
    /// Creates an empty set (every schedule scores zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a preference, builder style.
    pub fn with(mut self, preference: Preference) -> Self {
        self.0.insert(preference);
        self
    }

    /// Adds a preference. Returns `false` if it was already active.
    pub fn insert(&mut self, preference: Preference) -> bool {
        self.0.insert(preference)
    }

    pub fn contains(&self, preference: Preference) -> bool {
        self.0.contains(&preference)
    }

    /// Active preferences in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Preference> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses tag names, failing on the first unknown one.
    pub fn parse<I, S>(names: I) -> Result<Self, TimetableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|n| n.as_ref().parse::<Preference>())
            .collect()
    }
}

impl FromIterator<Preference> for PreferenceSet {
    fn from_iter<I: IntoIterator<Item = Preference>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Preference; N]> for PreferenceSet {
    fn from(prefs: [Preference; N]) -> Self {
        prefs.into_iter().collect()
    }
}
