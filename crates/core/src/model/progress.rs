use std::collections::BTreeSet;

use crate::model::day::Day;

/// Learner progress: the active day plus the completed and review sets.
///
/// The two sets are independent; a day may be in both, either or neither.
/// Keeping `current_day` inside the content range is the owner's job, since
/// the state itself does not know how many days exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    current_day: Day,
    completed_days: BTreeSet<Day>,
    review_days: BTreeSet<Day>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            current_day: Day::FIRST,
            completed_days: BTreeSet::new(),
            review_days: BTreeSet::new(),
        }
    }
}

impl ProgressState {
    #[must_use]
    pub fn new(
        current_day: Day,
        completed_days: impl IntoIterator<Item = Day>,
        review_days: impl IntoIterator<Item = Day>,
    ) -> Self {
        Self {
            current_day,
            completed_days: completed_days.into_iter().collect(),
            review_days: review_days.into_iter().collect(),
        }
    }

    // Accessors
    #[must_use]
    pub fn current_day(&self) -> Day {
        self.current_day
    }

    #[must_use]
    pub fn completed_days(&self) -> &BTreeSet<Day> {
        &self.completed_days
    }

    #[must_use]
    pub fn review_days(&self) -> &BTreeSet<Day> {
        &self.review_days
    }

    #[must_use]
    pub fn is_completed(&self, day: Day) -> bool {
        self.completed_days.contains(&day)
    }

    #[must_use]
    pub fn is_in_review(&self, day: Day) -> bool {
        self.review_days.contains(&day)
    }

    pub fn set_current_day(&mut self, day: Day) {
        self.current_day = day;
    }

    /// Returns true if `day` was not completed before.
    pub fn mark_completed(&mut self, day: Day) -> bool {
        self.completed_days.insert(day)
    }

    /// Flip review membership; returns the new membership.
    pub fn toggle_review(&mut self, day: Day) -> bool {
        if self.review_days.remove(&day) {
            false
        } else {
            self.review_days.insert(day);
            true
        }
    }

    /// Returns true if the set changed.
    pub fn add_to_review(&mut self, day: Day) -> bool {
        self.review_days.insert(day)
    }

    /// Returns true if the set changed.
    pub fn remove_from_review(&mut self, day: Day) -> bool {
        self.review_days.remove(&day)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
