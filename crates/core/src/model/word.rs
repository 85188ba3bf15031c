use serde::Deserialize;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Raw word entry as it appears in the content JSON.
///
/// Every field is optional here so a missing key surfaces as a `WordError`
/// naming the field instead of an opaque deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecordDraft {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub example_sentence: Option<String>,
    #[serde(default)]
    pub example_translation: Option<String>,
}

impl WordRecordDraft {
    #[must_use]
    pub fn new(
        word: impl Into<String>,
        translation: impl Into<String>,
        example_sentence: impl Into<String>,
        example_translation: impl Into<String>,
    ) -> Self {
        Self {
            word: Some(word.into()),
            translation: Some(translation.into()),
            example_sentence: Some(example_sentence.into()),
            example_translation: Some(example_translation.into()),
        }
    }

    /// Validate the draft into an immutable `WordRecord`.
    ///
    /// # Errors
    ///
    /// Returns `WordError::EmptyField` for the first field that is missing or blank.
    pub fn validate(self) -> Result<WordRecord, WordError> {
        Ok(WordRecord {
            word: required("word", self.word)?,
            translation: required("translation", self.translation)?,
            example_sentence: required("exampleSentence", self.example_sentence)?,
            example_translation: required("exampleTranslation", self.example_translation)?,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, WordError> {
    value
        .map(|val| val.trim().to_owned())
        .filter(|val| !val.is_empty())
        .ok_or(WordError::EmptyField(field))
}

//
// ─── WORD RECORD ───────────────────────────────────────────────────────────────
//

/// One word of the day: the word, its translation and a usage example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    word: String,
    translation: String,
    example_sentence: String,
    example_translation: String,
}

impl WordRecord {
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    #[must_use]
    pub fn example_sentence(&self) -> &str {
        &self.example_sentence
    }

    #[must_use]
    pub fn example_translation(&self) -> &str {
        &self.example_translation
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_fields() {
        let record = WordRecordDraft::new(" cat ", "кіт", "The cat sleeps.", "Кіт спить.")
            .validate()
            .unwrap();
        assert_eq!(record.word(), "cat");
        assert_eq!(record.translation(), "кіт");
    }

    #[test]
    fn blank_field_is_rejected() {
        let err = WordRecordDraft::new("cat", "  ", "The cat sleeps.", "Кіт спить.")
            .validate()
            .unwrap_err();
        assert_eq!(err, WordError::EmptyField("translation"));
    }

    #[test]
    fn missing_json_key_is_rejected() {
        let draft: WordRecordDraft =
            serde_json::from_str(r#"{"word":"cat","translation":"кіт","exampleSentence":"x"}"#)
                .unwrap();
        assert_eq!(
            draft.validate().unwrap_err(),
            WordError::EmptyField("exampleTranslation")
        );
    }
}
