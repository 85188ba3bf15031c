#![forbid(unsafe_code)]

pub mod app_services;
pub mod daily_word;
pub mod error;
pub mod progress_store;

pub use app_services::AppServices;
pub use daily_word::{
    DailyWordSession, Direction, NavigationOutcome, ProgressStats, Pronouncer, ReviewItem,
    SubmitOutcome,
};
pub use error::{AppServicesError, ProgressStoreError, SessionError};
pub use progress_store::ProgressStore;
