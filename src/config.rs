//! Engine configuration.
//!
//! Load search limits, scoring options and default preferences from TOML
//! so callers can tune the engine without code changes.
//!
//! ```
//! use u_timetable::config::EngineConfig;
//! use u_timetable::models::Preference;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     parallel_scoring = false
//!     preferences = ["NoGapDays", "NoMorningClasses"]
//!
//!     [search]
//!     time_limit_ms = 2000
//!     max_schedules = 50000
//! "#).unwrap();
//!
//! assert_eq!(config.search.time_limit_ms, Some(2000));
//! assert!(config.preferences.contains(Preference::NoGapDays));
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::PreferenceSet;

/// Limits guarding the backtracking search.
///
/// Exceeding a limit aborts the search with `SearchAborted`; no partial
/// result is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Wall-clock limit for the search, in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Maximum number of complete schedules to enumerate.
    pub max_schedules: Option<usize>,
}

impl SearchLimits {
    /// No limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_time_limit_ms(mut self, limit_ms: u64) -> Self {
        self.time_limit_ms = Some(limit_ms);
        self
    }

    pub fn with_max_schedules(mut self, limit: usize) -> Self {
        self.max_schedules = Some(limit);
        self
    }

    /// Time limit as a `Duration`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    pub fn is_unlimited(&self) -> bool {
        self.time_limit_ms.is_none() && self.max_schedules.is_none()
    }
}

/// Main engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Score completed schedules on the rayon thread pool.
    pub parallel_scoring: bool,
    /// Search limits.
    pub search: SearchLimits,
    /// Preferences used when the caller supplies none.
    pub preferences: PreferenceSet,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel_scoring: true,
            search: SearchLimits::default(),
            preferences: PreferenceSet::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_parallel_scoring(mut self, parallel: bool) -> Self {
        self.parallel_scoring = parallel;
        self
    }

    pub fn with_search_limits(mut self, limits: SearchLimits) -> Self {
        self.search = limits;
        self
    }

    pub fn with_preferences(mut self, preferences: PreferenceSet) -> Self {
        self.preferences = preferences;
        self
    }
}
