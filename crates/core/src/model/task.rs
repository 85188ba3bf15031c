/// Number of quiz tasks generated for every day.
pub const TASKS_PER_DAY: usize = 2;

/// Kind of multiple-choice task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Pick the translation of the word of the day.
    TranslationChoice,
    /// Pick the word missing from the example sentence.
    Cloze,
}

/// A multiple-choice question with its shuffled, lowercase options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub kind: TaskKind,
    pub prompt: String,
    pub prompt_translation: String,
    pub correct_answer: String,
    pub options: Vec<String>,
}

impl Task {
    /// The option matching the correct answer, if present.
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        let expected = self.correct_answer.to_lowercase();
        self.options
            .iter()
            .map(String::as_str)
            .find(|opt| *opt == expected)
    }
}

/// The tasks for one day, in display order.
pub type TaskSet = [Task; TASKS_PER_DAY];

/// Answers and error flags for the current task set.
///
/// Cleared whenever the active day or the task set changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerAttempt {
    answers: [String; TASKS_PER_DAY],
    errors: [bool; TASKS_PER_DAY],
}

impl AnswerAttempt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selection; selecting clears that task's error flag.
    ///
    /// Returns false if `task_index` is out of range.
    pub fn select(&mut self, task_index: usize, value: impl Into<String>) -> bool {
        let (Some(answer), Some(error)) = (
            self.answers.get_mut(task_index),
            self.errors.get_mut(task_index),
        ) else {
            return false;
        };
        *answer = value.into();
        *error = false;
        true
    }

    #[must_use]
    pub fn answers(&self) -> &[String; TASKS_PER_DAY] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, task_index: usize) -> Option<&str> {
        self.answers.get(task_index).map(String::as_str)
    }

    #[must_use]
    pub fn errors(&self) -> &[bool; TASKS_PER_DAY] {
        &self.errors
    }

    pub fn set_errors(&mut self, errors: [bool; TASKS_PER_DAY]) {
        self.errors = errors;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
