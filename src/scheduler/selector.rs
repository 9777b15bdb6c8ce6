//! Tied-optimal schedule selection.
//!
//! Runs the generator, scores every schedule, and keeps exactly those that
//! share the highest score. Ties keep their generation order, so repeated
//! calls with the same catalog and preferences return the same sequence and
//! "next / previous" navigation over the result is stable.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::info;

use super::{generate_all, ScheduleGenerator};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{Catalog, PreferenceSet, Schedule};
use crate::scoring::{score_schedule, Score};

/// The tied-optimal schedules of one selection run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    schedules: Vec<Schedule>,
    score: Option<Score>,
    candidates: usize,
}

impl Selection {
    /// Schedules sharing the best score, in generation order.
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn into_schedules(self) -> Vec<Schedule> {
        self.schedules
    }

    /// The shared best score; `None` when nothing was generated.
    pub fn best_score(&self) -> Option<Score> {
        self.score
    }

    /// Number of conflict-free schedules that were scored.
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Schedule> {
        self.schedules.get(index)
    }

    /// Index after `current`, wrapping to the first schedule.
    pub fn next_index(&self, current: usize) -> Option<usize> {
        match self.len() {
            0 => None,
            n => Some((current % n + 1) % n),
        }
    }

    /// Index before `current`, wrapping to the last schedule.
    pub fn previous_index(&self, current: usize) -> Option<usize> {
        match self.len() {
            0 => None,
            n => Some((current % n + n - 1) % n),
        }
    }
}

/// Keeps the schedules whose score equals the maximum.
///
/// Each schedule is paired with its score. Order is preserved. An empty
/// input produces an empty selection.
pub fn select_tied(scored: Vec<(Schedule, Score)>) -> Selection {
    let candidates = scored.len();
    let Some(best) = scored.iter().map(|(_, score)| *score).reduce(Score::max) else {
        return Selection::default();
    };

    let tied = scored
        .into_iter()
        .filter(|(_, score)| *score == best)
        .map(|(schedule, _)| schedule)
        .collect();

    Selection {
        schedules: tied,
        score: Some(best),
        candidates,
    }
}

fn rank(schedules: Vec<Schedule>, preferences: &PreferenceSet, parallel: bool) -> Selection {
    let scored: Vec<(Schedule, Score)> = if parallel {
        schedules
            .into_par_iter()
            .map(|s| {
                let score = score_schedule(&s, preferences);
                (s, score)
            })
            .collect()
    } else {
        schedules
            .into_iter()
            .map(|s| {
                let score = score_schedule(&s, preferences);
                (s, score)
            })
            .collect()
    };

    let selection = select_tied(scored);
    info!(
        candidates = selection.candidates(),
        tied = selection.len(),
        best_score = ?selection.best_score(),
        "schedule selection complete"
    );
    selection
}

/// Generates, scores and filters schedules under an engine configuration.
///
/// # Example
///
/// ```
/// use chrono::{NaiveTime, Weekday};
/// use u_timetable::models::{Catalog, ClassSection, Preference, PreferenceSet};
/// use u_timetable::scheduler::ScheduleSelector;
///
/// let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let catalog = Catalog::new()
///     .with_section(ClassSection::new("Math", "Lee", Weekday::Mon, t(8), t(9), "A1").unwrap())
///     .with_section(ClassSection::new("Math", "Kim", Weekday::Mon, t(14), t(15), "A2").unwrap());
///
/// let prefs = PreferenceSet::new().with(Preference::NoMorningClasses);
/// let selection = ScheduleSelector::new().select(&catalog, &prefs).unwrap();
/// assert_eq!(selection.len(), 1);
/// assert_eq!(selection.best_score(), Some(0.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleSelector {
    config: EngineConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl ScheduleSelector {
    /// Creates a selector with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets a cancellation flag for the search phase.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the tied-optimal schedules for `preferences`.
    ///
    /// # Errors
    /// `SearchAborted` if the configured limits are exceeded or the search
    /// is cancelled.
    pub fn select(&self, catalog: &Catalog, preferences: &PreferenceSet) -> Result<Selection> {
        let mut generator = ScheduleGenerator::new().with_limits(self.config.search.clone());
        if let Some(cancel) = &self.cancel {
            generator = generator.with_cancel(Arc::clone(cancel));
        }

        let outcome = generator.generate(catalog)?;
        Ok(rank(
            outcome.schedules,
            preferences,
            self.config.parallel_scoring,
        ))
    }

    /// Like [`select`](Self::select), using the configured preferences.
    pub fn select_configured(&self, catalog: &Catalog) -> Result<Selection> {
        self.select(catalog, &self.config.preferences)
    }
}

/// Tied-optimal schedules without search limits, scored in parallel.
pub fn select_best(catalog: &Catalog, preferences: &PreferenceSet) -> Selection {
    rank(generate_all(catalog), preferences, true)
}
