//! Day-gate policy: which days are open, and when the learner may move on.
//!
//! All functions are pure. The gate is always evaluated against the day being
//! left: advancing past day N requires day N itself to be completed.
//!
//! ```
//! # use std::collections::BTreeSet;
//! # use word_core::gate;
//! # use word_core::model::Day;
//! let completed: BTreeSet<Day> = [Day::FIRST].into_iter().collect();
//! let day2 = Day::new(2).unwrap();
//! assert!(!gate::is_locked(day2, &completed));
//! assert!(gate::can_advance(Day::FIRST, &completed, 10));
//! ```

use std::collections::BTreeSet;

use crate::model::Day;

/// True iff `day > 1` and the day before it has not been completed.
#[must_use]
pub fn is_locked(day: Day, completed_days: &BTreeSet<Day>) -> bool {
    match day.previous() {
        None => false,
        Some(prev) => !completed_days.contains(&prev),
    }
}

/// True iff `day` is completed and is not the last day.
#[must_use]
pub fn can_advance(day: Day, completed_days: &BTreeSet<Day>, total_days: usize) -> bool {
    completed_days.contains(&day) && day.index().saturating_add(1) < total_days
}

#[must_use]
pub fn can_retreat(day: Day) -> bool {
    !day.is_first()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: u32) -> Day {
        Day::new(value).unwrap()
    }

    fn set(days: &[u32]) -> BTreeSet<Day> {
        days.iter().copied().map(day).collect()
    }

    #[test]
    fn first_day_is_never_locked() {
        assert!(!is_locked(Day::FIRST, &set(&[])));
        assert!(!is_locked(Day::FIRST, &set(&[1, 2, 3])));
    }

    #[test]
    fn locked_iff_previous_day_missing() {
        let completed = set(&[1, 2, 4]);
        for d in 2..=8 {
            let expected = !completed.contains(&day(d - 1));
            assert_eq!(is_locked(day(d), &completed), expected, "day {d}");
        }
    }

    #[test]
    fn day_three_locked_with_only_day_one_done() {
        assert!(is_locked(day(3), &set(&[1])));
    }

    #[test]
    fn advance_requires_current_day_completed() {
        assert!(!can_advance(day(1), &set(&[]), 5));
        assert!(!can_advance(day(2), &set(&[1]), 5));
        assert!(can_advance(day(1), &set(&[1]), 5));
    }

    #[test]
    fn cannot_advance_past_last_day() {
        assert!(can_advance(day(4), &set(&[4]), 5));
        assert!(!can_advance(day(5), &set(&[5]), 5));
        assert!(!can_advance(day(1), &set(&[1]), 1));
    }

    #[test]
    fn retreat_only_after_first_day() {
        assert!(!can_retreat(Day::FIRST));
        assert!(can_retreat(day(2)));
    }
}
