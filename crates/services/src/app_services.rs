use std::sync::Arc;

use storage::repository::Storage;
use word_core::model::WordList;
use word_core::settings::QuizSettings;

use crate::daily_word::DailyWordSession;
use crate::error::{AppServicesError, SessionError};

/// Assembles storage, content and settings into app-facing services.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    words: Arc<WordList>,
    settings: QuizSettings,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        words: WordList,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_storage(storage, words, settings))
    }

    #[must_use]
    pub fn with_storage(storage: Storage, words: WordList, settings: QuizSettings) -> Self {
        Self {
            storage,
            words: Arc::new(words),
            settings,
        }
    }

    #[must_use]
    pub fn words(&self) -> Arc<WordList> {
        Arc::clone(&self.words)
    }

    /// Hydrate progress and open a quiz session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if progress cannot be loaded or tasks cannot be built.
    pub async fn start_session(&self) -> Result<DailyWordSession, SessionError> {
        DailyWordSession::start(
            Arc::clone(&self.words),
            self.settings.clone(),
            Arc::clone(&self.storage.kv),
        )
        .await
    }
}
