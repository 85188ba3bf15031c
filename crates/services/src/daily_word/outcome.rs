use word_core::evaluator::Evaluation;
use word_core::model::Day;

/// Navigation direction between days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Result of a navigation request. Gate violations are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Moved(Day),
    Blocked,
}

impl NavigationOutcome {
    #[must_use]
    pub fn moved(self) -> bool {
        matches!(self, Self::Moved(_))
    }
}

/// Result of submitting the current answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The quiz for the current day is locked; nothing was evaluated.
    Locked,
    Evaluated {
        evaluation: Evaluation,
        /// True the first time this day is completed.
        newly_completed: bool,
    },
}

impl SubmitOutcome {
    #[must_use]
    pub fn all_correct(&self) -> bool {
        match self {
            Self::Locked => false,
            Self::Evaluated { evaluation, .. } => evaluation.all_correct(),
        }
    }
}
