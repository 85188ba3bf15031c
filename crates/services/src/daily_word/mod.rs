mod outcome;
mod pronunciation;
mod service;
mod stats;

// Public API of the daily-word subsystem.
pub use crate::error::SessionError;
pub use outcome::{Direction, NavigationOutcome, SubmitOutcome};
pub use pronunciation::Pronouncer;
pub use service::{DailyWordSession, ReviewItem};
pub use stats::ProgressStats;
