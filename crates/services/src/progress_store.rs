use std::fmt;
use std::sync::Arc;

use storage::progress::{read_progress, write_progress};
use storage::repository::KeyValueStore;
use word_core::model::{Day, ProgressState, WordList};

use crate::error::ProgressStoreError;

/// Owns the learner's `ProgressState` and writes it through on every mutation.
///
/// Hydrated once from the key-value store by `load`. The current day is kept
/// inside `1..=last_day`.
pub struct ProgressStore {
    store: Arc<dyn KeyValueStore>,
    state: ProgressState,
    last_day: Day,
}

impl ProgressStore {
    /// Read persisted progress, defaulting anything absent or malformed.
    ///
    /// A stored current day beyond the end of `words` is clamped to the last day.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if the store cannot be read.
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        words: &WordList,
    ) -> Result<Self, ProgressStoreError> {
        let mut state = read_progress(store.as_ref()).await?;
        let last_day = words.last_day();

        if !words.contains(state.current_day()) {
            log::warn!(
                "stored day {} is past the last day {last_day}; clamping",
                state.current_day()
            );
            state.set_current_day(last_day);
        }

        log::info!(
            "progress loaded: day {}, {} completed, {} in review",
            state.current_day(),
            state.completed_days().len(),
            state.review_days().len()
        );

        Ok(Self {
            store,
            state,
            last_day,
        })
    }

    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    #[must_use]
    pub fn current_day(&self) -> Day {
        self.state.current_day()
    }

    #[must_use]
    pub fn last_day(&self) -> Day {
        self.last_day
    }

    /// Write the whole state to the store.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if any key cannot be written. The in-memory
    /// state is kept either way.
    pub async fn persist(&self) -> Result<(), ProgressStoreError> {
        write_progress(self.store.as_ref(), &self.state).await?;
        Ok(())
    }

    /// Move to `day`, clamped to the last day.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if persisting fails.
    pub async fn set_current_day(&mut self, day: Day) -> Result<Day, ProgressStoreError> {
        let day = day.min(self.last_day);
        self.state.set_current_day(day);
        self.persist().await?;
        Ok(day)
    }

    /// Idempotent; returns true if `day` was newly completed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if persisting fails.
    pub async fn mark_completed(&mut self, day: Day) -> Result<bool, ProgressStoreError> {
        let added = self.state.mark_completed(day);
        self.persist().await?;
        Ok(added)
    }

    /// Returns the new review membership of `day`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if persisting fails.
    pub async fn toggle_review(&mut self, day: Day) -> Result<bool, ProgressStoreError> {
        let in_review = self.state.toggle_review(day);
        self.persist().await?;
        Ok(in_review)
    }

    /// Returns true if the review set changed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if persisting fails.
    pub async fn add_to_review(&mut self, day: Day) -> Result<bool, ProgressStoreError> {
        let changed = self.state.add_to_review(day);
        self.persist().await?;
        Ok(changed)
    }

    /// Returns true if the review set changed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if persisting fails.
    pub async fn remove_from_review(&mut self, day: Day) -> Result<bool, ProgressStoreError> {
        let changed = self.state.remove_from_review(day);
        self.persist().await?;
        Ok(changed)
    }

    /// Back to day 1 with empty sets. Callers gather confirmation first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError` if persisting fails.
    pub async fn reset(&mut self) -> Result<(), ProgressStoreError> {
        self.state.reset();
        self.persist().await?;
        log::info!("progress reset");
        Ok(())
    }
}

impl fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressStore")
            .field("state", &self.state)
            .field("last_day", &self.last_day)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use storage::progress::{COMPLETED_DAYS_KEY, CURRENT_DAY_KEY, REVIEW_DAYS_KEY};
    use storage::repository::InMemoryStore;
    use word_core::model::WordRecordDraft;

    fn words(n: usize) -> WordList {
        let records = (1..=n)
            .map(|i| {
                WordRecordDraft::new(format!("w{i}"), format!("t{i}"), format!("w{i}"), "-")
                    .validate()
                    .unwrap()
            })
            .collect();
        WordList::new("t", "s", records).unwrap()
    }

    fn day(value: u32) -> Day {
        Day::new(value).unwrap()
    }

    #[tokio::test]
    async fn fresh_store_loads_defaults() {
        let store = ProgressStore::load(Arc::new(InMemoryStore::new()), &words(3))
            .await
            .unwrap();
        assert_eq!(store.state(), &ProgressState::default());
    }

    #[tokio::test]
    async fn load_clamps_current_day_to_content() {
        let kv = InMemoryStore::with_entries([(CURRENT_DAY_KEY, "42")]);
        let store = ProgressStore::load(Arc::new(kv), &words(5)).await.unwrap();
        assert_eq!(store.current_day(), day(5));
    }

    #[tokio::test]
    async fn every_mutation_is_written_through() {
        let kv = InMemoryStore::new();
        let mut store = ProgressStore::load(Arc::new(kv.clone()), &words(5))
            .await
            .unwrap();

        store.mark_completed(day(1)).await.unwrap();
        assert_eq!(kv.get(COMPLETED_DAYS_KEY).await.unwrap().as_deref(), Some("[1]"));

        store.toggle_review(day(3)).await.unwrap();
        assert_eq!(kv.get(REVIEW_DAYS_KEY).await.unwrap().as_deref(), Some("[3]"));

        store.set_current_day(day(2)).await.unwrap();
        assert_eq!(kv.get(CURRENT_DAY_KEY).await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn persist_then_load_round_trips() {
        let kv = Arc::new(InMemoryStore::new());
        let list = words(6);
        let mut store = ProgressStore::load(kv.clone(), &list).await.unwrap();
        store.mark_completed(day(1)).await.unwrap();
        store.mark_completed(day(2)).await.unwrap();
        store.add_to_review(day(2)).await.unwrap();
        store.add_to_review(day(6)).await.unwrap();
        store.set_current_day(day(3)).await.unwrap();

        let reloaded = ProgressStore::load(kv, &list).await.unwrap();
        assert_eq!(reloaded.state(), store.state());
    }

    #[tokio::test]
    async fn review_add_remove_are_idempotent() {
        let mut store = ProgressStore::load(Arc::new(InMemoryStore::new()), &words(5))
            .await
            .unwrap();
        assert!(store.add_to_review(day(2)).await.unwrap());
        assert!(store.add_to_review(day(5)).await.unwrap());
        assert!(!store.add_to_review(day(5)).await.unwrap());

        assert!(store.remove_from_review(day(5)).await.unwrap());
        assert!(!store.remove_from_review(day(5)).await.unwrap());
        assert_eq!(
            store.state().review_days().iter().copied().collect::<Vec<_>>(),
            vec![day(2)]
        );
    }

    #[tokio::test]
    async fn reset_persists_defaults() {
        let kv = Arc::new(InMemoryStore::new());
        let list = words(4);
        let mut store = ProgressStore::load(kv.clone(), &list).await.unwrap();
        store.mark_completed(day(1)).await.unwrap();
        store.toggle_review(day(1)).await.unwrap();
        store.set_current_day(day(2)).await.unwrap();

        store.reset().await.unwrap();

        let reloaded = ProgressStore::load(kv, &list).await.unwrap();
        assert_eq!(reloaded.state(), &ProgressState::default());
    }
}
