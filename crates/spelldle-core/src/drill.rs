//! Attempt tracking for a single practiced word.
//!
//! The first guess is free-form. Once it misses, the word moves to the clue
//! phase where every guess must have exactly the target's length. Rejected
//! input never counts as an attempt.

use serde::{Deserialize, Serialize};

use crate::feedback::{classify, FeedbackResult};
use crate::grade::{grade_from_attempts, Grade};
use crate::model::WordItem;
use crate::report::WordOutcome;
use crate::validation::{validate_clue_input, validate_guess_input, ValidationResult};

/// Which input rule applies to the next guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillPhase {
    Guess,
    Clue,
    Finished,
}

/// What happened to a submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillStep {
    /// Input failed validation and was not counted.
    Rejected(ValidationResult),
    /// Wrong guess; the learner may try again.
    Incorrect(FeedbackResult),
    /// Right guess; the word is finished.
    Solved { feedback: FeedbackResult, grade: Grade },
    /// Wrong guess on the last allowed attempt; the word is finished.
    Exhausted { feedback: FeedbackResult, grade: Grade },
}

/// Per-word drill state, owned by the caller for the lifetime of one word.
#[derive(Debug, Clone)]
pub struct WordDrill {
    item: WordItem,
    attempts: u32,
    max_attempts: Option<u32>,
    phase: DrillPhase,
    grade: Option<Grade>,
    solved: bool,
}

impl WordDrill {
    pub fn new(item: WordItem) -> Self {
        Self {
            item,
            attempts: 0,
            max_attempts: None,
            phase: DrillPhase::Guess,
            grade: None,
            solved: false,
        }
    }

    /// Finish the word as failed after `max` wrong guesses.
    pub fn with_max_attempts(mut self, max: Option<u32>) -> Self {
        self.max_attempts = max.filter(|m| *m > 0);
        self
    }

    pub fn item(&self) -> &WordItem {
        &self.item
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn phase(&self) -> DrillPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == DrillPhase::Finished
    }

    /// Grade for the finished word, if it is finished.
    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    /// Submit a guess. Surrounding whitespace is ignored.
    pub fn submit(&mut self, input: &str) -> DrillStep {
        let guess = input.trim();
        let validation = match self.phase {
            DrillPhase::Guess => validate_guess_input(guess),
            DrillPhase::Clue => validate_clue_input(guess.chars().count(), self.item.len()),
            DrillPhase::Finished => {
                return DrillStep::Rejected(ValidationResult::invalid(
                    "This word is already finished",
                ))
            }
        };
        if !validation.valid {
            return DrillStep::Rejected(validation);
        }

        self.attempts += 1;
        let feedback = classify(guess, &self.item.word);

        if feedback.is_correct {
            let grade = grade_from_attempts(self.attempts);
            self.finish(grade, true);
            return DrillStep::Solved { feedback, grade };
        }

        if self.max_attempts.is_some_and(|max| self.attempts >= max) {
            self.finish(Grade::Again, false);
            return DrillStep::Exhausted {
                feedback,
                grade: Grade::Again,
            };
        }

        self.phase = DrillPhase::Clue;
        DrillStep::Incorrect(feedback)
    }

    /// Abandon the word. Counts as a failed review.
    pub fn give_up(&mut self) -> Grade {
        if let Some(grade) = self.grade {
            return grade;
        }
        self.finish(Grade::Again, false);
        Grade::Again
    }

    /// Summary of the finished word for the session report.
    pub fn outcome(&self) -> Option<WordOutcome> {
        let grade = self.grade?;
        Some(WordOutcome {
            word: self.item.word.clone(),
            lesson_name: self.item.lesson_name.clone(),
            is_review: self.item.is_review,
            attempts: self.attempts,
            grade,
            solved: self.solved,
        })
    }

    fn finish(&mut self, grade: Grade, solved: bool) {
        self.phase = DrillPhase::Finished;
        self.grade = Some(grade);
        self.solved = solved;
    }
}
