//! Core data model types for spelldle.
//!
//! Lesson rows, the lesson catalog that sessions are composed from, review
//! cards handed over by the scheduler, and the session queue itself.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One validated row of lesson data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonWord {
    /// Lesson the word belongs to.
    pub lesson_name: String,
    /// The word to spell.
    pub word: String,
    /// Example sentence using the word.
    pub sentence: String,
}

impl LessonWord {
    pub fn new(
        lesson_name: impl Into<String>,
        word: impl Into<String>,
        sentence: impl Into<String>,
    ) -> Self {
        Self {
            lesson_name: lesson_name.into(),
            word: word.into(),
            sentence: sentence.into(),
        }
    }
}

/// All lesson rows known to the application, in source order.
///
/// Passed explicitly to every composition call; nothing in the core caches it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonCatalog {
    words: Vec<LessonWord>,
}

impl LessonCatalog {
    pub fn new(words: Vec<LessonWord>) -> Self {
        Self { words }
    }

    /// Every row, in source order.
    pub fn words(&self) -> &[LessonWord] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Distinct lesson names in order of first appearance.
    pub fn lesson_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.words
            .iter()
            .map(|w| w.lesson_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Rows belonging to `lesson`, in source order.
    pub fn words_for<'a>(&'a self, lesson: &'a str) -> impl Iterator<Item = &'a LessonWord> + 'a {
        self.words.iter().filter(move |w| w.lesson_name == lesson)
    }

    pub fn contains(&self, lesson: &str) -> bool {
        self.words.iter().any(|w| w.lesson_name == lesson)
    }

    /// Sentence for `word`, preferring the row from `lesson` when given.
    pub fn sentence_for(&self, word: &str, lesson: Option<&str>) -> Option<&str> {
        lesson
            .and_then(|l| {
                self.words
                    .iter()
                    .find(|w| w.word == word && w.lesson_name == l)
            })
            .or_else(|| self.words.iter().find(|w| w.word == word))
            .map(|w| w.sentence.as_str())
    }
}

/// A word queued for practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordItem {
    pub word: String,
    pub sentence: String,
    /// Lesson of origin; review cards may not carry one.
    #[serde(default)]
    pub lesson_name: Option<String>,
    /// Whether the item came from the scheduler's due list.
    #[serde(default)]
    pub is_review: bool,
}

impl WordItem {
    /// Wrap a lesson row as a fresh (non-review) item.
    pub fn from_lesson(word: &LessonWord) -> Self {
        Self {
            word: word.word.clone(),
            sentence: word.sentence.clone(),
            lesson_name: Some(word.lesson_name.clone()),
            is_review: false,
        }
    }

    /// Wrap a due card as a review item, borrowing its sentence from the catalog.
    pub fn from_review(card: &ReviewCard, catalog: &LessonCatalog) -> Self {
        let sentence = catalog
            .sentence_for(&card.word, card.lesson_name.as_deref())
            .unwrap_or_default();
        Self {
            word: card.word.clone(),
            sentence: sentence.to_string(),
            lesson_name: card.lesson_name.clone(),
            is_review: true,
        }
    }

    /// Number of characters in the word.
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// A scheduler-owned card that is due for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCard {
    pub word: String,
    #[serde(default)]
    pub lesson_name: Option<String>,
    pub due_at: DateTime<Utc>,
}

impl ReviewCard {
    pub fn new(word: impl Into<String>, lesson_name: Option<&str>, due_at: DateTime<Utc>) -> Self {
        Self {
            word: word.into(),
            lesson_name: lesson_name.map(str::to_string),
            due_at,
        }
    }
}

/// An ordered practice queue: review items first, then the lesson's words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub lesson_name: String,
    pub queue: Vec<WordItem>,
    pub review_count: usize,
    pub lesson_count: usize,
}

impl Session {
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The review segment of the queue.
    ///
    /// A `review_count` past the end of the queue (e.g. a hand-edited
    /// session file) is clamped to the queue length.
    pub fn reviews(&self) -> &[WordItem] {
        &self.queue[..self.review_split()]
    }

    /// The lesson segment of the queue.
    pub fn lesson_items(&self) -> &[WordItem] {
        &self.queue[self.review_split()..]
    }

    fn review_split(&self) -> usize {
        self.review_count.min(self.queue.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LessonCatalog {
        LessonCatalog::new(vec![
            LessonWord::new("Lesson 1", "cat", "The cat sat."),
            LessonWord::new("Lesson 2", "dog", "The dog ran."),
            LessonWord::new("Lesson 1", "hat", "A red hat."),
            LessonWord::new("Lesson 2", "cat", "My cat purrs."),
        ])
    }

    #[test]
    fn lesson_names_in_first_appearance_order() {
        assert_eq!(catalog().lesson_names(), vec!["Lesson 1", "Lesson 2"]);
    }

    #[test]
    fn words_for_preserves_source_order() {
        let catalog = catalog();
        let words: Vec<&str> = catalog
            .words_for("Lesson 1")
            .map(|w| w.word.as_str())
            .collect();
        assert_eq!(words, vec!["cat", "hat"]);
        assert!(catalog.words_for("Lesson 9").next().is_none());
    }

    #[test]
    fn sentence_lookup_prefers_matching_lesson() {
        let catalog = catalog();
        assert_eq!(
            catalog.sentence_for("cat", Some("Lesson 2")),
            Some("My cat purrs.")
        );
        assert_eq!(catalog.sentence_for("cat", None), Some("The cat sat."));
        assert_eq!(
            catalog.sentence_for("cat", Some("Lesson 9")),
            Some("The cat sat.")
        );
        assert_eq!(catalog.sentence_for("bird", None), None);
    }

    #[test]
    fn review_item_without_catalog_entry_has_empty_sentence() {
        let card = ReviewCard::new("bird", None, Utc::now());
        let item = WordItem::from_review(&card, &catalog());
        assert!(item.is_review);
        assert_eq!(item.sentence, "");
        assert_eq!(item.lesson_name, None);
    }

    #[test]
    fn word_item_length_counts_chars() {
        let item = WordItem::from_lesson(&LessonWord::new("L", "café", "Un café."));
        assert_eq!(item.len(), 4);
        assert!(!item.is_review);
    }

    #[test]
    fn segments_clamp_inconsistent_review_count() {
        let json = r#"{
            "lesson_name": "L",
            "queue": [{"word": "cat", "sentence": "", "lesson_name": null, "is_review": true}],
            "review_count": 3,
            "lesson_count": 0
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.reviews().len(), 1);
        assert!(session.lesson_items().is_empty());
    }
}
