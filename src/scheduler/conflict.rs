//! Time conflict detection.

use std::borrow::Borrow;

use crate::models::ClassSection;

/// Whether adding `candidate` to `schedule` would create a same-day overlap.
///
/// Intervals are half-open: a section ending at 10:00 and another starting
/// at 10:00 on the same day do not conflict. O(schedule length).
pub fn has_conflict<S: Borrow<ClassSection>>(schedule: &[S], candidate: &ClassSection) -> bool {
    schedule
        .iter()
        .any(|existing| existing.borrow().overlaps(candidate))
}
