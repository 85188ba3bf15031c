use thiserror::Error;

use crate::model::{ContentError, DayError, WordError};
use crate::settings::SettingsError;
use crate::tasks::TaskError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Day(#[from] DayError),
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Task(#[from] TaskError),
}
