//! Exhaustive conflict-free schedule generation.
//!
//! # Algorithm
//!
//! Depth-first backtracking over subjects in catalog order:
//! 1. At depth `i`, the partial schedule holds one section for each of the
//!    first `i` subjects.
//! 2. Try each section of subject `i` in catalog order; skip it if it
//!    conflicts with the partial schedule.
//! 3. Otherwise push it, recurse to depth `i + 1`, then pop it.
//! 4. At depth == subject count, snapshot the partial schedule.
//!
//! Only completed schedules are copied, so search memory is O(subjects).
//! Each depth draws from a disjoint section list, so no schedule is produced
//! twice.
//!
//! # Complexity
//! O(product of per-subject section counts) in the worst case.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use super::has_conflict;
use crate::config::SearchLimits;
use crate::error::{AbortReason, Result, TimetableError};
use crate::models::{Catalog, ClassSection, Schedule};

// Nodes between wall-clock and cancellation checks.
const CHECK_INTERVAL: u64 = 256;

/// Schedules found by one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutcome {
    /// Every conflict-free schedule, in enumeration order.
    pub schedules: Vec<Schedule>,
    /// Search nodes visited (partial schedules considered).
    pub nodes_visited: u64,
}

/// Backtracking schedule generator.
///
/// # Example
///
/// ```
/// use chrono::{NaiveTime, Weekday};
/// use u_timetable::models::{Catalog, ClassSection};
/// use u_timetable::scheduler::ScheduleGenerator;
///
/// let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
/// let catalog = Catalog::new()
///     .with_section(ClassSection::new("Math", "Lee", Weekday::Mon, t(9), t(10), "A1").unwrap())
///     .with_section(ClassSection::new("Math", "Kim", Weekday::Tue, t(9), t(10), "A2").unwrap())
///     .with_section(ClassSection::new("Art", "Choi", Weekday::Mon, t(10), t(12), "B1").unwrap());
///
/// let outcome = ScheduleGenerator::new().generate(&catalog).unwrap();
/// assert_eq!(outcome.schedules.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    limits: SearchLimits,
    cancel: Option<Arc<AtomicBool>>,
}

impl ScheduleGenerator {
    /// Creates a generator without limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets search limits.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets a cancellation flag, checked periodically during search.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Enumerates every conflict-free schedule with one section per subject.
    ///
    /// An empty catalog, or one where a subject has no section, yields no
    /// schedules.
    ///
    /// # Errors
    /// `SearchAborted` if a limit is exceeded or the search is cancelled.
    pub fn generate(&self, catalog: &Catalog) -> Result<GenerationOutcome> {
        let subjects = catalog.subjects();
        if subjects.is_empty() {
            return Ok(GenerationOutcome::default());
        }

        let groups: Vec<Vec<&ClassSection>> =
            subjects.iter().map(|s| catalog.sections_for(s)).collect();
        if let Some(idx) = groups.iter().position(Vec::is_empty) {
            debug!(subject = subjects[idx], "subject has no sections, catalog is infeasible");
            return Ok(GenerationOutcome::default());
        }

        debug!(
            subjects = groups.len(),
            sections = catalog.len(),
            "starting schedule search"
        );

        let mut search = Search {
            groups: &groups,
            partial: Vec::with_capacity(groups.len()),
            schedules: Vec::new(),
            nodes: 0,
            limits: &self.limits,
            cancel: self.cancel.as_deref(),
            started: Instant::now(),
        };

        if let Err(err) = search.check_interrupts().and_then(|_| search.descend(0)) {
            warn!(
                nodes = search.nodes,
                found = search.schedules.len(),
                "schedule search aborted: {err}"
            );
            return Err(err);
        }

        debug!(
            schedules = search.schedules.len(),
            nodes = search.nodes,
            elapsed_ms = search.started.elapsed().as_millis() as u64,
            "schedule search finished"
        );

        Ok(GenerationOutcome {
            schedules: search.schedules,
            nodes_visited: search.nodes,
        })
    }
}

/// Every conflict-free schedule, without limits.
pub fn generate_all(catalog: &Catalog) -> Vec<Schedule> {
    // No limits and no cancel flag, so the search cannot abort.
    ScheduleGenerator::new()
        .generate(catalog)
        .map(|outcome| outcome.schedules)
        .unwrap_or_default()
}

struct Search<'a> {
    groups: &'a [Vec<&'a ClassSection>],
    partial: Vec<&'a ClassSection>,
    schedules: Vec<Schedule>,
    nodes: u64,
    limits: &'a SearchLimits,
    cancel: Option<&'a AtomicBool>,
    started: Instant,
}

impl<'a> Search<'a> {
    fn descend(&mut self, depth: usize) -> Result<()> {
        self.nodes += 1;
        if self.nodes % CHECK_INTERVAL == 0 {
            self.check_interrupts()?;
        }

        let groups = self.groups;
        if depth == groups.len() {
            return self.record();
        }

        for &candidate in &groups[depth] {
            if has_conflict(&self.partial, candidate) {
                continue;
            }
            self.partial.push(candidate);
            let result = self.descend(depth + 1);
            self.partial.pop();
            result?;
        }
        Ok(())
    }

    fn record(&mut self) -> Result<()> {
        if let Some(limit) = self.limits.max_schedules {
            if self.schedules.len() >= limit {
                return Err(TimetableError::SearchAborted(AbortReason::ScheduleLimit {
                    limit,
                }));
            }
        }
        let snapshot = self.partial.iter().map(|s| (*s).clone()).collect();
        self.schedules.push(Schedule::from_sections(snapshot));
        Ok(())
    }

    fn check_interrupts(&self) -> Result<()> {
        if let Some(flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(TimetableError::SearchAborted(AbortReason::Cancelled));
            }
        }
        if let Some(limit) = self.limits.time_limit() {
            if self.started.elapsed() >= limit {
                return Err(TimetableError::SearchAborted(AbortReason::TimeLimit {
                    limit_ms: self.limits.time_limit_ms.unwrap_or_default(),
                }));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};

    fn section(subject: &str, day: Weekday, start: u32, end: u32) -> ClassSection {
        ClassSection::new(
            subject,
            "",
            day,
            NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
            "",
        )
        .unwrap()
    }

    fn subjects_of(schedule: &Schedule) -> Vec<&str> {
        schedule.sections().iter().map(|s| s.subject()).collect()
    }

    #[test]
    fn test_completeness() {
        let catalog = Catalog::new()
            .with_section(section("S1", Weekday::Mon, 8, 9))
            .with_section(section("S1", Weekday::Tue, 8, 9))
            .with_section(section("S2", Weekday::Wed, 8, 9));

        let schedules = generate_all(&catalog);
        assert_eq!(schedules.len(), 2);
        for s in &schedules {
            assert_eq!(s.len(), 2);
            assert_eq!(subjects_of(s), vec!["S1", "S2"]);
        }
        assert_eq!(schedules[0].sections()[0].day(), Weekday::Mon);
        assert_eq!(schedules[1].sections()[0].day(), Weekday::Tue);
    }

    #[test]
    fn test_conflicting_combinations_pruned() {
        let catalog = Catalog::new()
            .with_section(section("Math", Weekday::Mon, 9, 11))
            .with_section(section("Math", Weekday::Tue, 9, 11))
            .with_section(section("Art", Weekday::Mon, 10, 12))
            .with_section(section("Art", Weekday::Mon, 11, 13));

        let schedules = generate_all(&catalog);
        // (Mon9, Mon11), (Tue9, Mon10), (Tue9, Mon11)
        assert_eq!(schedules.len(), 3);
        assert!(schedules.iter().all(|s| !s.has_conflicts()));
    }

    #[test]
    fn test_all_combinations_conflict() {
        let catalog = Catalog::new()
            .with_section(section("Math", Weekday::Mon, 9, 11))
            .with_section(section("Art", Weekday::Mon, 10, 12));
        assert!(generate_all(&catalog).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let outcome = ScheduleGenerator::new().generate(&Catalog::new()).unwrap();
        assert!(outcome.schedules.is_empty());
        assert_eq!(outcome.nodes_visited, 0);
    }

    #[test]
    fn test_subject_without_sections_is_infeasible() {
        let catalog = Catalog::new()
            .with_required_subject("Chemistry")
            .with_section(section("Math", Weekday::Mon, 9, 10));
        assert!(generate_all(&catalog).is_empty());
    }

    #[test]
    fn test_subject_case_folding() {
        let catalog = Catalog::new()
            .with_section(section("Math", Weekday::Mon, 9, 10))
            .with_section(section("MATH", Weekday::Tue, 9, 10))
            .with_section(section("Art", Weekday::Wed, 9, 10));

        let schedules = generate_all(&catalog);
        assert_eq!(schedules.len(), 2);
        assert!(schedules.iter().all(|s| s.len() == 2));
    }

    #[test]
    fn test_nodes_visited() {
        let catalog = Catalog::new()
            .with_section(section("A", Weekday::Mon, 9, 10))
            .with_section(section("A", Weekday::Tue, 9, 10))
            .with_section(section("B", Weekday::Wed, 9, 10));
        let outcome = ScheduleGenerator::new().generate(&catalog).unwrap();
        // root + 2 at depth 1 + 2 leaves
        assert_eq!(outcome.nodes_visited, 5);
    }

    #[test]
    fn test_schedule_limit_aborts() {
        let catalog = Catalog::new()
            .with_section(section("A", Weekday::Mon, 9, 10))
            .with_section(section("A", Weekday::Tue, 9, 10))
            .with_section(section("B", Weekday::Wed, 9, 10))
            .with_section(section("B", Weekday::Thu, 9, 10));

        let limited = ScheduleGenerator::new()
            .with_limits(SearchLimits::unlimited().with_max_schedules(3));
        assert!(matches!(
            limited.generate(&catalog),
            Err(TimetableError::SearchAborted(AbortReason::ScheduleLimit { limit: 3 }))
        ));

        let enough = ScheduleGenerator::new()
            .with_limits(SearchLimits::unlimited().with_max_schedules(4));
        assert_eq!(enough.generate(&catalog).unwrap().schedules.len(), 4);
    }

    #[test]
    fn test_cancelled_before_start() {
        let catalog = Catalog::new().with_section(section("A", Weekday::Mon, 9, 10));
        let cancel = Arc::new(AtomicBool::new(true));
        let result = ScheduleGenerator::new().with_cancel(cancel).generate(&catalog);
        assert!(matches!(
            result,
            Err(TimetableError::SearchAborted(AbortReason::Cancelled))
        ));
    }

    #[test]
    fn test_zero_time_limit_aborts() {
        let catalog = Catalog::new().with_section(section("A", Weekday::Mon, 9, 10));
        let result = ScheduleGenerator::new()
            .with_limits(SearchLimits::unlimited().with_time_limit_ms(0))
            .generate(&catalog);
        assert!(matches!(
            result,
            Err(TimetableError::SearchAborted(AbortReason::TimeLimit { limit_ms: 0 }))
        ));
    }

    // Ten subjects with six disjoint sections each: 6^10 leaves.
    fn wide_catalog() -> Catalog {
        let days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        let mut catalog = Catalog::new();
        for subject in 0..10u32 {
            for day in days {
                catalog.add(section(&format!("S{subject}"), day, 6 + subject, 7 + subject));
            }
        }
        catalog
    }

    #[test]
    fn test_cancel_checked_during_descent() {
        let catalog = wide_catalog();
        let subjects = catalog.subjects();
        let groups: Vec<Vec<&ClassSection>> =
            subjects.iter().map(|s| catalog.sections_for(s)).collect();
        let limits = SearchLimits::unlimited();
        let cancel = AtomicBool::new(true);
        let mut search = Search {
            groups: &groups,
            partial: Vec::new(),
            schedules: Vec::new(),
            nodes: 0,
            limits: &limits,
            cancel: Some(&cancel),
            started: Instant::now(),
        };

        // Skipping the up-front check, the flag is seen at the first interval
        let result = search.descend(0);
        assert!(matches!(
            result,
            Err(TimetableError::SearchAborted(AbortReason::Cancelled))
        ));
        assert_eq!(search.nodes, CHECK_INTERVAL);
        assert!(!search.schedules.is_empty());
        assert!(search.partial.is_empty());
    }

    #[test]
    fn test_time_limit_hit_mid_search() {
        let result = ScheduleGenerator::new()
            .with_limits(SearchLimits::unlimited().with_time_limit_ms(5))
            .generate(&wide_catalog());
        assert!(matches!(
            result,
            Err(TimetableError::SearchAborted(AbortReason::TimeLimit { limit_ms: 5 }))
        ));
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let cancel = Arc::new(AtomicBool::new(false));
        let trigger = Arc::clone(&cancel);
        let handle = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            trigger.store(true, Ordering::Relaxed);
        });

        let result = ScheduleGenerator::new()
            .with_cancel(cancel)
            .generate(&wide_catalog());
        handle.join().unwrap();
        assert!(matches!(
            result,
            Err(TimetableError::SearchAborted(AbortReason::Cancelled))
        ));
    }
}
