use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("options per task must be between 2 and 8")]
    InvalidOptionsPerTask,

    #[error("blank placeholder cannot be empty")]
    EmptyBlankPlaceholder,

    #[error("speech language cannot be empty")]
    EmptySpeechLanguage,

    #[error("fixed vocabulary needs at least {needed} distinct {field}")]
    VocabularyTooSmall { field: &'static str, needed: usize },
}

//
// ─── DISTRACTOR POOL ───────────────────────────────────────────────────────────
//

/// Fixed vocabulary of distractors, independent of the content list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixedVocabulary {
    words: Vec<String>,
    translations: Vec<String>,
}

impl FixedVocabulary {
    #[must_use]
    pub fn new(
        words: impl IntoIterator<Item = impl Into<String>>,
        translations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            translations: translations.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn translations(&self) -> &[String] {
        &self.translations
    }
}

/// Where wrong answers come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DistractorPool {
    /// Every other word of the content list. Grows with the content.
    #[default]
    Content,
    /// A fixed vocabulary configured up front.
    Fixed(FixedVocabulary),
}

//
// ─── COPY ──────────────────────────────────────────────────────────────────────
//

/// Question texts shown with each task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCopy {
    pub translation_question: String,
    pub translation_hint: String,
    pub cloze_question: String,
    pub cloze_hint: String,
}

impl Default for TaskCopy {
    fn default() -> Self {
        Self {
            translation_question: "Оберіть правильний переклад слова".into(),
            translation_hint: "Choose the correct translation".into(),
            cloze_question: "Яке слово пропущене?".into(),
            cloze_hint: "What word is missing?".into(),
        }
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Quiz configuration: option count, distractor source and copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    options_per_task: usize,
    distractor_pool: DistractorPool,
    blank_placeholder: String,
    copy: TaskCopy,
    speech_language: String,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            options_per_task: 4,
            distractor_pool: DistractorPool::Content,
            blank_placeholder: "_____".into(),
            copy: TaskCopy::default(),
            speech_language: "en-US".into(),
        }
    }
}

impl QuizSettings {
    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the option count is outside `2..=8`, the
    /// placeholder or speech language is blank, or a fixed vocabulary cannot
    /// supply enough distinct distractors.
    pub fn new(
        options_per_task: usize,
        distractor_pool: DistractorPool,
        blank_placeholder: impl Into<String>,
        copy: TaskCopy,
        speech_language: impl Into<String>,
    ) -> Result<Self, SettingsError> {
        if !(2..=8).contains(&options_per_task) {
            return Err(SettingsError::InvalidOptionsPerTask);
        }
        let blank_placeholder = blank_placeholder.into();
        if blank_placeholder.trim().is_empty() {
            return Err(SettingsError::EmptyBlankPlaceholder);
        }
        let speech_language = speech_language.into().trim().to_owned();
        if speech_language.is_empty() {
            return Err(SettingsError::EmptySpeechLanguage);
        }
        if let DistractorPool::Fixed(vocab) = &distractor_pool {
            // One distractor may collide with the correct answer and be dropped.
            let needed = options_per_task;
            if distinct_folded(vocab.words()) < needed {
                return Err(SettingsError::VocabularyTooSmall {
                    field: "words",
                    needed,
                });
            }
            if distinct_folded(vocab.translations()) < needed {
                return Err(SettingsError::VocabularyTooSmall {
                    field: "translations",
                    needed,
                });
            }
        }

        Ok(Self {
            options_per_task,
            distractor_pool,
            blank_placeholder,
            copy,
            speech_language,
        })
    }

    /// Replace the distractor pool, re-running validation.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::VocabularyTooSmall` for an undersized fixed pool.
    pub fn with_distractor_pool(self, pool: DistractorPool) -> Result<Self, SettingsError> {
        Self::new(
            self.options_per_task,
            pool,
            self.blank_placeholder,
            self.copy,
            self.speech_language,
        )
    }

    // Accessors
    #[must_use]
    pub fn options_per_task(&self) -> usize {
        self.options_per_task
    }

    #[must_use]
    pub fn distractor_pool(&self) -> &DistractorPool {
        &self.distractor_pool
    }

    #[must_use]
    pub fn blank_placeholder(&self) -> &str {
        &self.blank_placeholder
    }

    #[must_use]
    pub fn copy(&self) -> &TaskCopy {
        &self.copy
    }

    #[must_use]
    pub fn speech_language(&self) -> &str {
        &self.speech_language
    }
}

fn distinct_folded(values: &[String]) -> usize {
    let mut folded: Vec<String> = values.iter().map(|v| v.to_lowercase()).collect();
    folded.sort_unstable();
    folded.dedup();
    folded.len()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
