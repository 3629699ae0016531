//! JSON-file review deck.
//!
//! Stores review cards and the grade history in a single JSON file. Serves
//! due cards to the session composer and takes grades back after each word.
//! Next due dates come from a fixed per-grade interval table; there is no
//! memory model here.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use spelldle_core::grade::Grade;
use spelldle_core::model::ReviewCard;
use spelldle_core::traits::{DueCardProvider, GradeRecord, GradeSink};

use crate::error::DeckError;

/// Grade records kept in the deck file; older ones are dropped first.
pub const MAX_GRADE_HISTORY: usize = 500;

/// Delay until a graded word is due again.
pub fn review_interval(grade: Grade) -> Duration {
    match grade {
        Grade::Again => Duration::zero(),
        Grade::Hard => Duration::days(1),
        Grade::Good => Duration::days(3),
        Grade::Easy => Duration::days(7),
    }
}

/// In-memory form of the deck file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewDeck {
    #[serde(default)]
    pub cards: Vec<ReviewCard>,
    #[serde(default)]
    pub grades: Vec<GradeRecord>,
}

impl ReviewDeck {
    /// Cards due at `now`, earliest first, at most `limit`.
    ///
    /// Cards with equal due times keep their file order.
    pub fn due(&self, now: DateTime<Utc>, limit: usize) -> Vec<ReviewCard> {
        let mut due: Vec<ReviewCard> = self
            .cards
            .iter()
            .filter(|c| c.due_at <= now)
            .cloned()
            .collect();
        due.sort_by_key(|c| c.due_at);
        due.truncate(limit);
        due
    }

    /// Apply a grade: reschedule the matching card (or add one) and log it.
    pub fn record(&mut self, record: GradeRecord) {
        let due_at = record.recorded_at + review_interval(record.grade);
        match self
            .cards
            .iter_mut()
            .find(|c| c.word == record.word && c.lesson_name == record.lesson_name)
        {
            Some(card) => card.due_at = due_at,
            None => self.cards.push(ReviewCard {
                word: record.word.clone(),
                lesson_name: record.lesson_name.clone(),
                due_at,
            }),
        }

        self.grades.push(record);
        if self.grades.len() > MAX_GRADE_HISTORY {
            let excess = self.grades.len() - MAX_GRADE_HISTORY;
            self.grades.drain(..excess);
        }
    }
}

/// A review deck persisted as a JSON file.
pub struct JsonDeck {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl JsonDeck {
    /// Open a deck at `path`. The file is created on the first recorded grade.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the deck; a missing file is an empty deck.
    pub async fn load(&self) -> Result<ReviewDeck, DeckError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ReviewDeck::default())
            }
            Err(source) => {
                return Err(DeckError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| DeckError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    pub async fn save(&self, deck: &ReviewDeck) -> Result<(), DeckError> {
        let io_err = |source| DeckError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(deck).map_err(|source| DeckError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        // Write beside the deck, then rename over it, so a cut-off write never
        // leaves a half-written deck behind.
        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, json).await.map_err(io_err)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(io_err)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "deck.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Due cards as of `now`.
    pub async fn due_cards_at(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<ReviewCard>, DeckError> {
        Ok(self.load().await?.due(now, limit))
    }
}

#[async_trait]
impl DueCardProvider for JsonDeck {
    fn name(&self) -> &str {
        "deck"
    }

    async fn due_cards(&self, limit: usize) -> anyhow::Result<Vec<ReviewCard>> {
        let cards = self.due_cards_at(Utc::now(), limit).await?;
        tracing::debug!("deck {}: {} due card(s)", self.path.display(), cards.len());
        Ok(cards)
    }
}

#[async_trait]
impl GradeSink for JsonDeck {
    async fn record_grade(&self, record: &GradeRecord) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut deck = self.load().await?;
        deck.record(record.clone());
        self.save(&deck).await?;
        tracing::debug!(
            "deck {}: recorded grade {} for '{}'",
            self.path.display(),
            record.grade,
            record.word
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn grade(word: &str, grade: Grade, hour: u32) -> GradeRecord {
        GradeRecord {
            word: word.into(),
            lesson_name: Some("Lesson 1".into()),
            grade,
            attempts: 1,
            recorded_at: at(hour),
        }
    }

    #[test]
    fn due_filters_sorts_and_limits() {
        let deck = ReviewDeck {
            cards: vec![
                ReviewCard::new("late", None, at(9)),
                ReviewCard::new("future", None, at(20)),
                ReviewCard::new("early", None, at(6)),
                ReviewCard::new("tie", None, at(9)),
            ],
            grades: vec![],
        };
        let words =
            |cards: Vec<ReviewCard>| cards.into_iter().map(|c| c.word).collect::<Vec<_>>();
        assert_eq!(words(deck.due(at(12), 10)), vec!["early", "late", "tie"]);
        assert_eq!(words(deck.due(at(12), 2)), vec!["early", "late"]);
        assert!(deck.due(at(1), 10).is_empty());
    }

    #[test]
    fn record_adds_then_reschedules_card() {
        let mut deck = ReviewDeck::default();
        deck.record(grade("cat", Grade::Good, 8));
        assert_eq!(deck.cards.len(), 1);
        assert_eq!(deck.cards[0].due_at, at(8) + Duration::days(3));

        deck.record(grade("cat", Grade::Again, 10));
        assert_eq!(deck.cards.len(), 1);
        assert_eq!(deck.cards[0].due_at, at(10));
        assert_eq!(deck.grades.len(), 2);
    }

    #[test]
    fn interval_table_is_fixed_per_grade() {
        assert_eq!(review_interval(Grade::Again), Duration::zero());
        assert_eq!(review_interval(Grade::Hard), Duration::days(1));
        assert_eq!(review_interval(Grade::Good), Duration::days(3));
        assert_eq!(review_interval(Grade::Easy), Duration::days(7));
    }

    #[test]
    fn new_word_is_due_after_its_grade_interval() {
        let mut deck = ReviewDeck::default();
        deck.record(grade("cat", Grade::Easy, 8));
        assert_eq!(deck.cards[0].due_at, at(8) + Duration::days(7));
        assert!(deck.due(at(9), 10).is_empty());
        assert_eq!(deck.due(at(8) + Duration::days(7), 10).len(), 1);
    }

    #[test]
    fn grade_history_is_bounded() {
        let mut deck = ReviewDeck::default();
        for i in 0..(MAX_GRADE_HISTORY + 3) {
            deck.record(grade(&format!("w{i}"), Grade::Easy, 8));
        }
        assert_eq!(deck.grades.len(), MAX_GRADE_HISTORY);
        assert_eq!(deck.grades[0].word, "w3");
    }

    #[tokio::test]
    async fn missing_file_is_empty_deck() {
        let dir = tempfile::tempdir().unwrap();
        let deck = JsonDeck::open(dir.path().join("deck.json"));
        assert_eq!(deck.load().await.unwrap(), ReviewDeck::default());
        assert!(deck.due_cards(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recorded_grades_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let deck = JsonDeck::open(dir.path().join("nested").join("deck.json"));

        deck.record_grade(&grade("cat", Grade::Again, 8)).await.unwrap();
        deck.record_grade(&grade("dog", Grade::Easy, 8)).await.unwrap();

        let due = deck.due_cards_at(at(9), 10).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].word, "cat");
        assert_eq!(deck.load().await.unwrap().grades.len(), 2);
    }

    #[tokio::test]
    async fn corrupt_file_is_permanent_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        std::fs::write(&path, "{ not json").unwrap();

        let deck = JsonDeck::open(&path);
        let err = deck.load().await.unwrap_err();
        assert!(err.is_permanent());

        let err = deck.due_cards(5).await.unwrap_err();
        assert!(err.downcast_ref::<DeckError>().is_some());
    }

    #[tokio::test]
    async fn save_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        std::fs::write(&path, "{ not json").unwrap();
        // A stale temp file from an interrupted save must not matter
        std::fs::write(dir.path().join("deck.json.tmp"), "partial").unwrap();

        let deck = JsonDeck::open(&path);
        let mut state = ReviewDeck::default();
        state.record(grade("cat", Grade::Hard, 8));
        deck.save(&state).await.unwrap();

        assert_eq!(deck.load().await.unwrap(), state);
        assert!(!dir.path().join("deck.json.tmp").exists());
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
