use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::repository::KeyValueStore;
use word_core::evaluator;
use word_core::gate;
use word_core::model::{AnswerAttempt, Day, ProgressState, TaskSet, WordList, WordRecord};
use word_core::settings::QuizSettings;
use word_core::tasks::TaskGenerator;

use super::outcome::{Direction, NavigationOutcome, SubmitOutcome};
use super::pronunciation::Pronouncer;
use super::stats::ProgressStats;
use crate::error::SessionError;
use crate::progress_store::ProgressStore;

/// A day in the review set together with its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewItem<'a> {
    pub day: Day,
    pub word: &'a WordRecord,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// The word-of-the-day quiz for a single learner.
///
/// Owns the progress store, the current day's tasks and the in-flight answer
/// attempt. Tasks are regenerated and the attempt cleared whenever the day
/// changes.
pub struct DailyWordSession {
    words: Arc<WordList>,
    settings: QuizSettings,
    progress: ProgressStore,
    tasks: TaskSet,
    attempt: AnswerAttempt,
    rng: StdRng,
}

impl DailyWordSession {
    /// Hydrate progress and build the tasks for the stored current day.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if progress cannot be read or tasks cannot be built.
    pub async fn start(
        words: Arc<WordList>,
        settings: QuizSettings,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, SessionError> {
        let rng = StdRng::from_rng(&mut rand::rng());
        Self::start_with_rng(words, settings, store, rng).await
    }

    /// Like `start`, with a caller-provided random source.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if progress cannot be read or tasks cannot be built.
    pub async fn start_with_rng(
        words: Arc<WordList>,
        settings: QuizSettings,
        store: Arc<dyn KeyValueStore>,
        mut rng: StdRng,
    ) -> Result<Self, SessionError> {
        let progress = ProgressStore::load(store, &words).await?;
        let tasks = TaskGenerator::new(&settings).generate(
            progress.current_day(),
            &words,
            &mut rng,
        )?;
        Ok(Self {
            words,
            settings,
            progress,
            tasks,
            attempt: AnswerAttempt::new(),
            rng,
        })
    }

    // Accessors
    #[must_use]
    pub fn words(&self) -> &WordList {
        &self.words
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressState {
        self.progress.state()
    }

    #[must_use]
    pub fn current_day(&self) -> Day {
        self.progress.current_day()
    }

    #[must_use]
    pub fn total_days(&self) -> usize {
        self.words.total_days()
    }

    #[must_use]
    pub fn current_word(&self) -> &WordRecord {
        self.words.word(self.current_day())
    }

    #[must_use]
    pub fn tasks(&self) -> &TaskSet {
        &self.tasks
    }

    #[must_use]
    pub fn attempt(&self) -> &AnswerAttempt {
        &self.attempt
    }

    /// True when the quiz for the current day may not be taken yet.
    #[must_use]
    pub fn is_quiz_locked(&self) -> bool {
        gate::is_locked(self.current_day(), self.progress().completed_days())
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        gate::can_advance(
            self.current_day(),
            self.progress().completed_days(),
            self.total_days(),
        )
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        gate::can_retreat(self.current_day())
    }

    #[must_use]
    pub fn is_current_in_review(&self) -> bool {
        self.progress().is_in_review(self.current_day())
    }

    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        let state = self.progress();
        let in_content = |days: &std::collections::BTreeSet<Day>| {
            days.iter().filter(|day| self.words.contains(**day)).count()
        };
        ProgressStats::new(
            in_content(state.completed_days()),
            in_content(state.review_days()),
            self.total_days(),
        )
    }

    /// Review set resolved to words, in day order. Stale days are skipped.
    #[must_use]
    pub fn review_items(&self) -> Vec<ReviewItem<'_>> {
        self.progress()
            .review_days()
            .iter()
            .filter_map(|day| {
                self.words
                    .get(*day)
                    .map(|word| ReviewItem { day: *day, word })
            })
            .collect()
    }

    //
    // ─── QUIZ ──────────────────────────────────────────────────────────────────
    //

    /// Choose `value` for a task. Only one of the task's options is accepted;
    /// returns false otherwise.
    pub fn select_option(&mut self, task_index: usize, value: &str) -> bool {
        let Some(task) = self.tasks.get(task_index) else {
            return false;
        };
        if !task.options.iter().any(|opt| opt == value) {
            return false;
        }
        self.attempt.select(task_index, value)
    }

    /// Check the current answers; a fully correct attempt completes the day.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if recording completion fails to persist.
    pub async fn submit_answers(&mut self) -> Result<SubmitOutcome, SessionError> {
        if self.is_quiz_locked() {
            return Ok(SubmitOutcome::Locked);
        }

        let evaluation = evaluator::check(&self.attempt, &self.tasks);
        self.attempt.set_errors(evaluation.errors);

        let newly_completed = if evaluation.all_correct() {
            let day = self.current_day();
            let added = self.progress.mark_completed(day).await?;
            log::info!("day {day} answered correctly");
            added
        } else {
            false
        };

        Ok(SubmitOutcome::Evaluated {
            evaluation,
            newly_completed,
        })
    }

    /// Clear answers and put every task's options in a new order.
    pub fn reshuffle(&mut self) {
        self.attempt.clear();
        TaskGenerator::reshuffle(&mut self.tasks, &mut self.rng);
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Move one day back or forward, subject to the day gate.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if persisting or building tasks fails.
    pub async fn navigate(
        &mut self,
        direction: Direction,
    ) -> Result<NavigationOutcome, SessionError> {
        let current = self.current_day();
        let target = match direction {
            Direction::Previous if self.can_retreat() => current.previous(),
            Direction::Next if self.can_advance() => current.next(),
            _ => None,
        };

        match target {
            Some(day) => self.move_to(day).await,
            None => {
                log::debug!("navigation {direction:?} from day {current} blocked");
                Ok(NavigationOutcome::Blocked)
            }
        }
    }

    /// Jump straight to a day from the review list.
    ///
    /// Only days currently in review can be opened. The jump skips the
    /// navigation gate; the quiz on that day is still gated.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if persisting or building tasks fails.
    pub async fn go_to_review_item(&mut self, day: Day) -> Result<NavigationOutcome, SessionError> {
        if !self.words.contains(day) || !self.progress().is_in_review(day) {
            log::debug!("day {day} is not an open review item");
            return Ok(NavigationOutcome::Blocked);
        }
        self.move_to(day).await
    }

    async fn move_to(&mut self, day: Day) -> Result<NavigationOutcome, SessionError> {
        let day = self.progress.set_current_day(day).await?;
        self.rebuild_tasks()?;
        log::debug!("moved to day {day}");
        Ok(NavigationOutcome::Moved(day))
    }

    fn rebuild_tasks(&mut self) -> Result<(), SessionError> {
        self.tasks = TaskGenerator::new(&self.settings).generate(
            self.progress.current_day(),
            &self.words,
            &mut self.rng,
        )?;
        self.attempt.clear();
        Ok(())
    }

    //
    // ─── REVIEW SET ────────────────────────────────────────────────────────────
    //

    /// Flip review membership of `day`; returns the new membership.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownDay` for a day outside the word list, or a
    /// persistence error.
    pub async fn toggle_review(&mut self, day: Day) -> Result<bool, SessionError> {
        self.ensure_known(day)?;
        Ok(self.progress.toggle_review(day).await?)
    }

    /// Toggle review membership of the current day.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if persisting fails.
    pub async fn toggle_review_current(&mut self) -> Result<bool, SessionError> {
        let day = self.current_day();
        self.toggle_review(day).await
    }

    /// Returns true if the review set changed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownDay` for a day outside the word list, or a
    /// persistence error.
    pub async fn add_to_review(&mut self, day: Day) -> Result<bool, SessionError> {
        self.ensure_known(day)?;
        Ok(self.progress.add_to_review(day).await?)
    }

    /// Returns true if the review set changed. Removing an absent day is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if persisting fails.
    pub async fn remove_from_review(&mut self, day: Day) -> Result<bool, SessionError> {
        Ok(self.progress.remove_from_review(day).await?)
    }

    fn ensure_known(&self, day: Day) -> Result<(), SessionError> {
        if self.words.contains(day) {
            Ok(())
        } else {
            Err(SessionError::UnknownDay(day))
        }
    }

    //
    // ─── MISC ──────────────────────────────────────────────────────────────────
    //

    /// Wipe all progress if `confirm` agrees. Returns whether the reset happened.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if persisting or building tasks fails.
    pub async fn reset_statistics(
        &mut self,
        confirm: impl FnOnce() -> bool,
    ) -> Result<bool, SessionError> {
        if !confirm() {
            return Ok(false);
        }
        self.progress.reset().await?;
        self.rebuild_tasks()?;
        Ok(true)
    }

    /// Ask the speech collaborator to pronounce the current word.
    pub fn play_pronunciation(&self, pronouncer: &dyn Pronouncer) {
        pronouncer.speak(self.current_word().word(), self.settings.speech_language());
    }
}

impl fmt::Debug for DailyWordSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DailyWordSession")
            .field("total_days", &self.words.total_days())
            .field("progress", &self.progress)
            .field("attempt", &self.attempt)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
