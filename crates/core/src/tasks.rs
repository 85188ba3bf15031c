use rand::Rng;
use rand::seq::SliceRandom;
use regex::{NoExpand, RegexBuilder};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::{Day, Task, TaskKind, TaskSet, WordList, WordRecord};
use crate::settings::{DistractorPool, QuizSettings};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaskError {
    #[error("no word for day {0}")]
    UnknownDay(Day),

    #[error("failed to build blank pattern: {0}")]
    Pattern(#[from] regex::Error),
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Builds the two quiz tasks for a day.
///
/// Options are the correct answer plus distinct distractors sampled from the
/// configured pool, lowercased and put in a uniformly random order.
pub struct TaskGenerator<'a> {
    settings: &'a QuizSettings,
}

impl<'a> TaskGenerator<'a> {
    #[must_use]
    pub fn new(settings: &'a QuizSettings) -> Self {
        Self { settings }
    }

    /// Generate the translation-choice and cloze tasks for `day`.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::UnknownDay` if `day` is outside the word list.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        day: Day,
        words: &WordList,
        rng: &mut R,
    ) -> Result<TaskSet, TaskError> {
        let record = words.get(day).ok_or(TaskError::UnknownDay(day))?;
        let copy = self.settings.copy();

        let (pool_words, pool_translations) = self.pool(day, words);

        let translation = Task {
            kind: TaskKind::TranslationChoice,
            prompt: format!("{} '{}'", copy.translation_question, record.word()),
            prompt_translation: copy.translation_hint.clone(),
            correct_answer: record.translation().to_owned(),
            options: self.options(record.translation(), &pool_translations, rng),
        };

        let cloze = Task {
            kind: TaskKind::Cloze,
            prompt: format!("{} '{}'", copy.cloze_question, self.blank_out(record)?),
            prompt_translation: copy.cloze_hint.clone(),
            correct_answer: record.word().to_owned(),
            options: self.options(record.word(), &pool_words, rng),
        };

        log::debug!("generated tasks for day {day}");
        Ok([translation, cloze])
    }

    /// Put every task's options in a fresh random order.
    pub fn reshuffle<R: Rng + ?Sized>(tasks: &mut TaskSet, rng: &mut R) {
        for task in tasks.iter_mut() {
            task.options.shuffle(rng);
        }
    }

    fn pool<'w>(&'w self, day: Day, words: &'w WordList) -> (Vec<&'w str>, Vec<&'w str>) {
        match self.settings.distractor_pool() {
            DistractorPool::Content => words
                .iter()
                .filter(|(other, _)| *other != day)
                .map(|(_, w)| (w.word(), w.translation()))
                .unzip(),
            DistractorPool::Fixed(vocab) => (
                vocab.words().iter().map(String::as_str).collect(),
                vocab.translations().iter().map(String::as_str).collect(),
            ),
        }
    }

    fn options<R: Rng + ?Sized>(&self, correct: &str, pool: &[&str], rng: &mut R) -> Vec<String> {
        let correct = correct.to_lowercase();
        let mut seen = HashSet::from([correct.clone()]);
        let mut distractors: Vec<String> = pool
            .iter()
            .map(|candidate| candidate.to_lowercase())
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect();

        distractors.shuffle(rng);
        distractors.truncate(self.settings.options_per_task() - 1);

        let mut options = Vec::with_capacity(distractors.len() + 1);
        options.push(correct);
        options.extend(distractors);
        options.shuffle(rng);
        options
    }

    fn blank_out(&self, record: &WordRecord) -> Result<String, TaskError> {
        let pattern = RegexBuilder::new(&regex::escape(record.word()))
            .case_insensitive(true)
            .build()?;
        let sentence = record.example_sentence();
        if !pattern.is_match(sentence) {
            log::warn!("example sentence does not contain '{}'", record.word());
        }
        Ok(pattern
            .replace_all(sentence, NoExpand(self.settings.blank_placeholder()))
            .into_owned())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WordRecordDraft;
    use crate::settings::FixedVocabulary;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn word(w: &str, t: &str, s: &str) -> WordRecord {
        WordRecordDraft::new(w, t, s, "-").validate().unwrap()
    }

    fn list() -> WordList {
        WordList::new(
            "t",
            "s",
            vec![
                word("Cat", "кіт", "My cat and your CAT are friends."),
                word("dog", "собака", "A dog barks."),
                word("house", "будинок", "The house is big."),
                word("tree", "дерево", "A tall tree."),
                word("sun", "сонце", "The sun shines."),
                word("CAT", "Кіт", "Another cat."),
            ],
        )
        .unwrap()
    }

    fn day(value: u32) -> Day {
        Day::new(value).unwrap()
    }

    fn assert_well_formed(task: &Task, expected_len: usize) {
        assert_eq!(task.options.len(), expected_len, "{task:?}");
        let unique: HashSet<&String> = task.options.iter().collect();
        assert_eq!(unique.len(), task.options.len(), "duplicates in {task:?}");
        let correct = task.correct_answer.to_lowercase();
        assert_eq!(task.options.iter().filter(|o| **o == correct).count(), 1);
        assert!(task.options.iter().all(|o| *o == o.to_lowercase()));
    }

    #[test]
    fn every_day_yields_four_unique_options() {
        let settings = QuizSettings::default();
        let generator = TaskGenerator::new(&settings);
        let words = list();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            for (d, _) in words.iter() {
                let tasks = generator.generate(d, &words, &mut rng).unwrap();
                assert_well_formed(&tasks[0], 4);
                assert_well_formed(&tasks[1], 4);
            }
        }
    }

    #[test]
    fn case_insensitive_collision_is_excluded() {
        let settings = QuizSettings::default();
        let generator = TaskGenerator::new(&settings);
        let words = list();
        let mut rng = StdRng::seed_from_u64(1);

        // Day 6 is "CAT"/"Кіт", which collides with day 1's "Cat"/"кіт".
        for _ in 0..50 {
            let tasks = generator.generate(day(6), &words, &mut rng).unwrap();
            assert_well_formed(&tasks[0], 4);
            assert_well_formed(&tasks[1], 4);
        }
    }

    #[test]
    fn cloze_blanks_every_case_insensitive_occurrence() {
        let settings = QuizSettings::default();
        let generator = TaskGenerator::new(&settings);
        let mut rng = StdRng::seed_from_u64(3);

        let tasks = generator.generate(day(1), &list(), &mut rng).unwrap();
        let cloze = &tasks[1];
        assert_eq!(cloze.kind, TaskKind::Cloze);
        assert_eq!(cloze.correct_answer, "Cat");
        assert!(cloze.prompt.contains("My _____ and your _____ are friends."));
        assert!(!cloze.prompt.to_lowercase().contains("cat"));
    }

    #[test]
    fn translation_task_keeps_original_case_for_answer() {
        let settings = QuizSettings::default();
        let generator = TaskGenerator::new(&settings);
        let mut rng = StdRng::seed_from_u64(3);

        let tasks = generator.generate(day(6), &list(), &mut rng).unwrap();
        assert_eq!(tasks[0].kind, TaskKind::TranslationChoice);
        assert_eq!(tasks[0].correct_answer, "Кіт");
        assert_eq!(tasks[0].correct_option(), Some("кіт"));
        assert!(tasks[0].prompt.ends_with("'CAT'"));
    }

    #[test]
    fn word_with_regex_metacharacters_is_blanked_literally() {
        let words = WordList::new(
            "t",
            "s",
            vec![word("C++", "сі плюс плюс", "I write c++ daily."), word("go", "го", "go")],
        )
        .unwrap();
        let settings = QuizSettings::default();
        let mut rng = StdRng::seed_from_u64(9);

        let tasks = TaskGenerator::new(&settings)
            .generate(day(1), &words, &mut rng)
            .unwrap();
        assert!(tasks[1].prompt.contains("I write _____ daily."));
    }

    #[test]
    fn small_content_yields_fewer_options() {
        let words = WordList::new(
            "t",
            "s",
            vec![word("cat", "кіт", "cat"), word("dog", "собака", "dog")],
        )
        .unwrap();
        let settings = QuizSettings::default();
        let mut rng = StdRng::seed_from_u64(5);

        let tasks = TaskGenerator::new(&settings)
            .generate(day(1), &words, &mut rng)
            .unwrap();
        assert_well_formed(&tasks[0], 2);
        assert_well_formed(&tasks[1], 2);
    }

    #[test]
    fn fixed_pool_draws_from_vocabulary() {
        let vocab = FixedVocabulary::new(
            ["apple", "pear", "plum", "cherry"],
            ["яблуко", "груша", "слива", "вишня"],
        );
        let settings = QuizSettings::default()
            .with_distractor_pool(DistractorPool::Fixed(vocab))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let tasks = TaskGenerator::new(&settings)
            .generate(day(2), &list(), &mut rng)
            .unwrap();
        assert_well_formed(&tasks[1], 4);
        for option in &tasks[1].options {
            assert!(["dog", "apple", "pear", "plum", "cherry"].contains(&option.as_str()));
        }
    }

    #[test]
    fn unknown_day_is_an_error() {
        let settings = QuizSettings::default();
        let mut rng = StdRng::seed_from_u64(0);
        let err = TaskGenerator::new(&settings)
            .generate(day(99), &list(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, TaskError::UnknownDay(d) if d == day(99)));
    }

    #[test]
    fn reshuffle_keeps_option_sets() {
        let settings = QuizSettings::default();
        let mut rng = StdRng::seed_from_u64(21);
        let mut tasks = TaskGenerator::new(&settings)
            .generate(day(2), &list(), &mut rng)
            .unwrap();
        let mut before: Vec<String> = tasks[0].options.clone();

        TaskGenerator::reshuffle(&mut tasks, &mut rng);

        let mut after = tasks[0].options.clone();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn shuffle_places_correct_answer_in_every_slot() {
        let settings = QuizSettings::default();
        let generator = TaskGenerator::new(&settings);
        let words = list();
        let mut rng = StdRng::seed_from_u64(42);
        let mut positions = [0_u32; 4];

        for _ in 0..400 {
            let tasks = generator.generate(day(2), &words, &mut rng).unwrap();
            let pos = tasks[0]
                .options
                .iter()
                .position(|o| o == "собака")
                .unwrap();
            positions[pos] += 1;
        }
        assert!(positions.iter().all(|count| *count > 50), "{positions:?}");
    }
}
