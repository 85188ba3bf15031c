//! Progress codec: how `ProgressState` is laid out in the key-value store.
//!
//! | key              | value                         |
//! |------------------|-------------------------------|
//! | `currentDay`     | decimal integer, e.g. `"3"`   |
//! | `completedWords` | JSON array of integers        |
//! | `reviewWords`    | JSON array of integers        |
//!
//! Decoding never fails: absent or malformed values fall back to `1` and `[]`.

use word_core::model::{Day, ProgressState};

use crate::repository::{KeyValueStore, StorageError};

pub const CURRENT_DAY_KEY: &str = "currentDay";
pub const COMPLETED_DAYS_KEY: &str = "completedWords";
pub const REVIEW_DAYS_KEY: &str = "reviewWords";

/// Raw persisted values, exactly as read from or written to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressRecord {
    pub current_day: Option<String>,
    pub completed_days: Option<String>,
    pub review_days: Option<String>,
}

impl ProgressRecord {
    /// Encode a state into its persisted strings.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if a set cannot be encoded.
    pub fn from_state(state: &ProgressState) -> Result<Self, StorageError> {
        Ok(Self {
            current_day: Some(state.current_day().to_string()),
            completed_days: Some(encode_days(state.completed_days().iter())?),
            review_days: Some(encode_days(state.review_days().iter())?),
        })
    }

    /// Decode into a state, defaulting every absent or malformed field.
    #[must_use]
    pub fn into_state(self) -> ProgressState {
        let current_day = match self.current_day.as_deref() {
            None => Day::FIRST,
            Some(raw) => raw.parse::<Day>().unwrap_or_else(|err| {
                log::warn!("ignoring malformed {CURRENT_DAY_KEY} {raw:?}: {err}");
                Day::FIRST
            }),
        };
        let completed = decode_days(COMPLETED_DAYS_KEY, self.completed_days.as_deref());
        let review = decode_days(REVIEW_DAYS_KEY, self.review_days.as_deref());
        ProgressState::new(current_day, completed, review)
    }
}

fn encode_days<'a>(days: impl Iterator<Item = &'a Day>) -> Result<String, StorageError> {
    let values: Vec<u32> = days.map(|day| day.value()).collect();
    serde_json::to_string(&values).map_err(|err| StorageError::Serialization(err.to_string()))
}

fn decode_days(key: &str, raw: Option<&str>) -> Vec<Day> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let values: Vec<i64> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(err) => {
            log::warn!("ignoring malformed {key} {raw:?}: {err}");
            return Vec::new();
        }
    };
    values
        .into_iter()
        .filter_map(|value| match Day::try_from(value) {
            Ok(day) => Some(day),
            Err(err) => {
                log::warn!("dropping invalid entry in {key}: {err}");
                None
            }
        })
        .collect()
}

/// Read all progress keys and decode them.
///
/// # Errors
///
/// Returns `StorageError` only if the store itself fails; bad values are defaulted.
pub async fn read_progress(store: &dyn KeyValueStore) -> Result<ProgressState, StorageError> {
    let record = ProgressRecord {
        current_day: store.get(CURRENT_DAY_KEY).await?,
        completed_days: store.get(COMPLETED_DAYS_KEY).await?,
        review_days: store.get(REVIEW_DAYS_KEY).await?,
    };
    Ok(record.into_state())
}

/// Write all progress keys.
///
/// # Errors
///
/// Returns `StorageError` if encoding or any write fails.
pub async fn write_progress(
    store: &dyn KeyValueStore,
    state: &ProgressState,
) -> Result<(), StorageError> {
    let record = ProgressRecord::from_state(state)?;
    let entries = [
        (CURRENT_DAY_KEY, record.current_day),
        (COMPLETED_DAYS_KEY, record.completed_days),
        (REVIEW_DAYS_KEY, record.review_days),
    ];
    for (key, value) in entries {
        if let Some(value) = value {
            store.set(key, &value).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;

    fn day(value: u32) -> Day {
        Day::new(value).unwrap()
    }

    #[test]
    fn encodes_widget_layout() {
        let state = ProgressState::new(day(3), [day(2), day(1)], [day(5)]);
        let record = ProgressRecord::from_state(&state).unwrap();
        assert_eq!(record.current_day.as_deref(), Some("3"));
        assert_eq!(record.completed_days.as_deref(), Some("[1,2]"));
        assert_eq!(record.review_days.as_deref(), Some("[5]"));
    }

    #[test]
    fn absent_values_default() {
        assert_eq!(ProgressRecord::default().into_state(), ProgressState::default());
    }

    #[test]
    fn malformed_values_default() {
        let record = ProgressRecord {
            current_day: Some("abc".into()),
            completed_days: Some("{not json".into()),
            review_days: Some("\"[1]\"".into()),
        };
        assert_eq!(record.into_state(), ProgressState::default());
    }

    #[test]
    fn zero_or_negative_current_day_defaults() {
        for raw in ["0", "-4", ""] {
            let record = ProgressRecord {
                current_day: Some(raw.into()),
                ..ProgressRecord::default()
            };
            assert_eq!(record.into_state().current_day(), Day::FIRST, "{raw:?}");
        }
    }

    #[test]
    fn invalid_set_entries_are_dropped() {
        let record = ProgressRecord {
            current_day: Some("2".into()),
            completed_days: Some("[0, 1, -3, 2]".into()),
            review_days: Some("[]".into()),
        };
        let state = record.into_state();
        assert_eq!(state.completed_days().len(), 2);
        assert!(state.is_completed(day(1)));
        assert!(state.is_completed(day(2)));
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let store = InMemoryStore::new();
        let state = ProgressState::new(day(4), [day(1), day(2), day(3)], [day(2), day(7)]);

        write_progress(&store, &state).await.unwrap();
        let loaded = read_progress(&store).await.unwrap();

        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn reads_values_written_by_the_widget() {
        let store = InMemoryStore::with_entries([
            (CURRENT_DAY_KEY, "2"),
            (COMPLETED_DAYS_KEY, "[1]"),
            (REVIEW_DAYS_KEY, "[1,2]"),
        ]);
        let state = read_progress(&store).await.unwrap();
        assert_eq!(state, ProgressState::new(day(2), [day(1)], [day(1), day(2)]));
    }
}
