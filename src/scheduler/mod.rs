//! Schedule search and selection.
//!
//! Provides the exhaustive backtracking generator and the selector that
//! keeps the best-scoring schedules.
//!
//! # Algorithm
//!
//! `ScheduleGenerator` enumerates every combination of one section per
//! subject that has no same-day overlap, pruning a branch as soon as a
//! candidate conflicts with the partial schedule. `ScheduleSelector` scores
//! every result and returns the tier sharing the maximum score.
//!
//! # Hardening
//!
//! Search limits (wall clock, schedule count) and a cancellation flag can
//! abort a search; an aborted search reports `SearchAborted` and never a
//! partial result.

mod conflict;
mod generator;
mod selector;

pub use conflict::has_conflict;
pub use generator::{generate_all, GenerationOutcome, ScheduleGenerator};
pub use selector::{select_best, select_tied, ScheduleSelector, Selection};
