mod day;
mod progress;
mod task;
mod word;
mod word_list;

pub use day::{Day, DayError};
pub use progress::ProgressState;
pub use task::{AnswerAttempt, TASKS_PER_DAY, Task, TaskKind, TaskSet};
pub use word::{WordError, WordRecord, WordRecordDraft};
pub use word_list::{ContentError, WordList};
