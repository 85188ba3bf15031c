use serde::Deserialize;
use thiserror::Error;

use crate::model::day::Day;
use crate::model::word::{WordError, WordRecord, WordRecordDraft};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("content must contain at least one word")]
    Empty,

    #[error("word row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: WordError,
    },

    #[error("malformed content document: {0}")]
    Json(#[from] serde_json::Error),
}

//
// ─── DOCUMENT SHAPE ────────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Deserialize)]
struct TextBlock {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct WordRows {
    rows: Vec<WordRecordDraft>,
}

#[derive(Debug, Deserialize)]
struct ContentDocument {
    #[serde(default)]
    title: TextBlock,
    #[serde(default)]
    subtitle: TextBlock,
    words: WordRows,
}

//
// ─── WORD LIST ─────────────────────────────────────────────────────────────────
//

/// Immutable, 1-indexed sequence of words; its length is the number of days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    title: String,
    subtitle: String,
    words: Vec<WordRecord>,
}

impl WordList {
    /// Build a word list from validated records.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Empty` if `words` is empty.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        words: Vec<WordRecord>,
    ) -> Result<Self, ContentError> {
        if words.is_empty() {
            return Err(ContentError::Empty);
        }
        Ok(Self {
            title: title.into(),
            subtitle: subtitle.into(),
            words,
        })
    }

    /// Parse and validate a content document.
    ///
    /// Expected shape: `{ "title": {"content": ..}, "subtitle": {"content": ..},
    /// "words": { "rows": [ {word, translation, exampleSentence, exampleTranslation} ] } }`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the JSON is malformed, any row fails validation,
    /// or there are no rows.
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let doc: ContentDocument = serde_json::from_str(raw)?;
        let words = doc
            .words
            .rows
            .into_iter()
            .enumerate()
            .map(|(idx, draft)| {
                draft
                    .validate()
                    .map_err(|source| ContentError::InvalidRow { row: idx + 1, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("loaded {} content words", words.len());
        Self::new(doc.title.content, doc.subtitle.content, words)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Number of days (never zero).
    #[must_use]
    pub fn total_days(&self) -> usize {
        self.words.len()
    }

    /// The last accessible day.
    #[must_use]
    pub fn last_day(&self) -> Day {
        Day::from_index(self.words.len().saturating_sub(1)).unwrap_or(Day::FIRST)
    }

    #[must_use]
    pub fn contains(&self, day: Day) -> bool {
        day.index() < self.words.len()
    }

    #[must_use]
    pub fn get(&self, day: Day) -> Option<&WordRecord> {
        self.words.get(day.index())
    }

    /// Word for `day`, clamped into the content range.
    #[must_use]
    pub fn word(&self, day: Day) -> &WordRecord {
        &self.words[self.clamp(day).index()]
    }

    /// Iterate `(day, word)` pairs in content order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &WordRecord)> {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(idx, word)| Day::from_index(idx).map(|day| (day, word)))
    }

    /// Clamp an arbitrary day into `1..=total_days`.
    #[must_use]
    pub fn clamp(&self, day: Day) -> Day {
        if self.contains(day) {
            day
        } else {
            self.last_day()
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "title": {"content": "Word of the day"},
        "subtitle": {"content": "One word a day"},
        "words": {"rows": [
            {"word": "cat", "translation": "кіт", "exampleSentence": "The cat sleeps.", "exampleTranslation": "Кіт спить."},
            {"word": "dog", "translation": "собака", "exampleSentence": "A dog barks.", "exampleTranslation": "Собака гавкає."}
        ]}
    }"#;

    #[test]
    fn parses_document() {
        let list = WordList::from_json(DOC).unwrap();
        assert_eq!(list.title(), "Word of the day");
        assert_eq!(list.total_days(), 2);
        assert_eq!(list.last_day(), Day::new(2).unwrap());
        assert_eq!(list.get(Day::FIRST).unwrap().word(), "cat");
        assert!(list.get(Day::new(3).unwrap()).is_none());
    }

    #[test]
    fn invalid_row_names_position() {
        let raw = r#"{"words": {"rows": [
            {"word": "cat", "translation": "кіт", "exampleSentence": "s", "exampleTranslation": "t"},
            {"word": "", "translation": "x", "exampleSentence": "s", "exampleTranslation": "t"}
        ]}}"#;
        let err = WordList::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            ContentError::InvalidRow {
                row: 2,
                source: WordError::EmptyField("word")
            }
        ));
    }

    #[test]
    fn empty_rows_are_rejected() {
        let err = WordList::from_json(r#"{"words": {"rows": []}}"#).unwrap_err();
        assert!(matches!(err, ContentError::Empty));
    }

    #[test]
    fn clamp_caps_at_last_day() {
        let list = WordList::from_json(DOC).unwrap();
        assert_eq!(list.clamp(Day::new(9).unwrap()), Day::new(2).unwrap());
        assert_eq!(list.clamp(Day::FIRST), Day::FIRST);
        assert_eq!(list.word(Day::new(9).unwrap()).word(), "dog");
    }

    #[test]
    fn iter_yields_one_based_days() {
        let list = WordList::from_json(DOC).unwrap();
        let days: Vec<u32> = list.iter().map(|(day, _)| day.value()).collect();
        assert_eq!(days, vec![1, 2]);
    }
}
