use crate::model::{AnswerAttempt, TASKS_PER_DAY, TaskSet};

/// Per-task result of checking an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// `true` where the submitted answer differs from the expected one.
    pub errors: [bool; TASKS_PER_DAY],
    /// Expected answer for every failed task, in task order.
    pub revealed: [Option<String>; TASKS_PER_DAY],
}

impl Evaluation {
    #[must_use]
    pub fn all_correct(&self) -> bool {
        all_correct(&self.errors)
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Compare each answer to its task's expected answer, ignoring case and
/// surrounding whitespace.
#[must_use]
pub fn evaluate(answers: &[String; TASKS_PER_DAY], tasks: &TaskSet) -> [bool; TASKS_PER_DAY] {
    std::array::from_fn(|idx| normalize(&answers[idx]) != normalize(&tasks[idx].correct_answer))
}

#[must_use]
pub fn all_correct(errors: &[bool]) -> bool {
    !errors.iter().any(|is_error| *is_error)
}

/// Evaluate an attempt and reveal the correct answer of each failed task.
#[must_use]
pub fn check(attempt: &AnswerAttempt, tasks: &TaskSet) -> Evaluation {
    let errors = evaluate(attempt.answers(), tasks);
    let revealed =
        std::array::from_fn(|idx| errors[idx].then(|| tasks[idx].correct_answer.clone()));
    Evaluation { errors, revealed }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
