//! Criterion benchmarks for schedule generation and scoring.
//!
//! Uses synthetic catalogs where every subject offers one section per
//! weekday, so the search space is `sections ^ subjects`.

use chrono::{NaiveTime, Weekday};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_timetable::models::{Catalog, ClassSection, Preference, PreferenceSet};
use u_timetable::scheduler::{generate_all, select_best};
use u_timetable::scoring::score_schedule;

const DAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

fn synthetic_catalog(subjects: usize, sections_per_subject: usize) -> Catalog {
    let mut catalog = Catalog::new();
    for subject in 0..subjects {
        for k in 0..sections_per_subject {
            let day = DAYS[(subject + k) % DAYS.len()];
            let start = 8 + ((subject * 3 + k * 2) % 10) as u32;
            catalog.add(
                ClassSection::new(
                    format!("S{subject}"),
                    format!("L{k}"),
                    day,
                    NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(start + 2, 0, 0).unwrap(),
                    "R",
                )
                .unwrap(),
            );
        }
    }
    catalog
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for subjects in [3, 5, 7] {
        let catalog = synthetic_catalog(subjects, 4);
        group.bench_with_input(BenchmarkId::from_parameter(subjects), &catalog, |b, cat| {
            b.iter(|| generate_all(black_box(cat)))
        });
    }
    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let prefs: PreferenceSet = Preference::ALL.into();
    let mut group = c.benchmark_group("select_best");
    for subjects in [3, 5, 7] {
        let catalog = synthetic_catalog(subjects, 4);
        group.bench_with_input(BenchmarkId::from_parameter(subjects), &catalog, |b, cat| {
            b.iter(|| select_best(black_box(cat), &prefs))
        });
    }
    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let prefs: PreferenceSet = Preference::ALL.into();
    let schedules = generate_all(&synthetic_catalog(6, 3));
    c.bench_function("score_schedule", |b| {
        b.iter(|| {
            schedules
                .iter()
                .map(|s| score_schedule(black_box(s), &prefs))
                .sum::<f64>()
        })
    });
}

criterion_group!(benches, bench_generate, bench_select, bench_score);
criterion_main!(benches);
