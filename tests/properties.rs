//! Property tests for conflict detection, generation and scoring.

use chrono::{NaiveTime, Weekday};
use proptest::prelude::*;
use proptest::sample::subsequence;

use u_timetable::models::{Catalog, ClassSection, Preference, PreferenceSet, Schedule};
use u_timetable::scheduler::{generate_all, has_conflict, select_best};
use u_timetable::scoring::{score_schedule, ScoreBreakdown, SCORE_BOUND};

const DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn hm(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

prop_compose! {
    fn arb_section(subjects: usize)(
        subject in 0..subjects,
        day in 0usize..7,
        start in (6 * 60)..(21 * 60u32),
        len in 30u32..180,
    ) -> ClassSection {
        let end = (start + len).min(23 * 60 + 59);
        ClassSection::new(format!("S{subject}"), "", DAYS[day], hm(start), hm(end), "").unwrap()
    }
}

fn arb_preferences() -> impl Strategy<Value = PreferenceSet> {
    subsequence(Preference::ALL.to_vec(), 1..=Preference::ALL.len())
        .prop_map(|prefs| prefs.into_iter().collect())
}

// Number of conflict-free picks, counted without backtracking pruning.
fn brute_force_count(groups: &[Vec<&ClassSection>], picked: &mut Vec<ClassSection>) -> usize {
    match groups.split_first() {
        None => usize::from(!Schedule::from_sections(picked.clone()).has_conflicts()),
        Some((first, rest)) => first
            .iter()
            .map(|s| {
                picked.push((*s).clone());
                let n = brute_force_count(rest, picked);
                picked.pop();
                n
            })
            .sum(),
    }
}

proptest! {
    #[test]
    fn conflict_is_symmetric(a in arb_section(1), b in arb_section(1)) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert_eq!(
            has_conflict(std::slice::from_ref(&a), &b),
            has_conflict(std::slice::from_ref(&b), &a)
        );
    }

    #[test]
    fn back_to_back_never_conflicts(
        day in 0usize..7,
        start in (6 * 60)..(18 * 60u32),
        first in 30u32..120,
        second in 30u32..120,
    ) {
        let a = ClassSection::new("A", "", DAYS[day], hm(start), hm(start + first), "").unwrap();
        let b = ClassSection::new(
            "B", "", DAYS[day], hm(start + first), hm(start + first + second), "",
        ).unwrap();
        prop_assert!(!has_conflict(&[a], &b));
    }

    #[test]
    fn score_is_bounded(
        sections in prop::collection::vec(arb_section(8), 1..40),
        prefs in arb_preferences(),
    ) {
        let schedule = Schedule::from_sections(sections);
        let score = score_schedule(&schedule, &prefs);
        prop_assert!((-SCORE_BOUND..=SCORE_BOUND).contains(&score));
        prop_assert_eq!(ScoreBreakdown::calculate(&schedule, &prefs).total, score);
    }

    #[test]
    fn score_ignores_preference_order(
        sections in prop::collection::vec(arb_section(4), 1..10),
        prefs in subsequence(Preference::ALL.to_vec(), 0..=Preference::ALL.len()),
    ) {
        let schedule = Schedule::from_sections(sections);
        let forward: PreferenceSet = prefs.iter().copied().collect();
        let backward: PreferenceSet = prefs.iter().rev().copied().collect();
        prop_assert_eq!(
            score_schedule(&schedule, &forward),
            score_schedule(&schedule, &backward)
        );
    }

    #[test]
    fn generated_schedules_are_complete_and_valid(
        sections in prop::collection::vec(arb_section(4), 1..12),
    ) {
        let catalog = Catalog::from_sections(sections);
        let subjects = catalog.subjects();
        let schedules = generate_all(&catalog);

        for schedule in &schedules {
            prop_assert_eq!(schedule.len(), subjects.len());
            prop_assert!(!schedule.has_conflicts());
            for subject in &subjects {
                let picks = schedule
                    .sections()
                    .iter()
                    .filter(|s| s.is_subject(subject))
                    .count();
                prop_assert_eq!(picks, 1);
            }
        }

        let groups: Vec<Vec<&ClassSection>> =
            subjects.iter().map(|s| catalog.sections_for(s)).collect();
        prop_assert_eq!(schedules.len(), brute_force_count(&groups, &mut Vec::new()));
    }

    #[test]
    fn selection_is_the_top_tier(
        sections in prop::collection::vec(arb_section(3), 1..10),
        prefs in arb_preferences(),
    ) {
        let catalog = Catalog::from_sections(sections);
        let all = generate_all(&catalog);
        let selection = select_best(&catalog, &prefs);

        prop_assert_eq!(selection.candidates(), all.len());
        prop_assert_eq!(selection.is_empty(), all.is_empty());
        if let Some(best) = selection.best_score() {
            for s in &all {
                prop_assert!(score_schedule(s, &prefs) <= best);
            }
            for s in selection.schedules() {
                prop_assert_eq!(score_schedule(s, &prefs), best);
            }
            let expected: Vec<&Schedule> = all
                .iter()
                .filter(|s| score_schedule(s, &prefs) == best)
                .collect();
            let actual: Vec<&Schedule> = selection.schedules().iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn generation_is_deterministic(
        sections in prop::collection::vec(arb_section(3), 1..10),
        prefs in arb_preferences(),
    ) {
        let catalog = Catalog::from_sections(sections);
        prop_assert_eq!(
            u_timetable::generate_schedules(&catalog, &prefs),
            u_timetable::generate_schedules(&catalog, &prefs)
        );
    }
}
