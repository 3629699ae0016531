//! Mock scheduler for testing.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::de::Error as _;

use spelldle_core::model::ReviewCard;
use spelldle_core::traits::{DueCardProvider, GradeRecord, GradeSink};

use crate::error::DeckError;

/// A mock scheduler for exercising session composition without a deck file.
///
/// Serves a fixed, already ordered list of due cards and remembers every
/// grade it receives.
pub struct MockScheduler {
    /// Cards returned by `due_cards`, truncated to the requested limit.
    cards: Vec<ReviewCard>,
    /// When set, every call fails with this message.
    failure: Option<String>,
    /// Number of `due_cards` calls made.
    call_count: AtomicU32,
    /// Limit passed to the last `due_cards` call.
    last_limit: AtomicUsize,
    /// Grades received, in order.
    grades: Mutex<Vec<GradeRecord>>,
    /// Number of `record_grade` calls made.
    grade_calls: AtomicU32,
    /// Remaining `record_grade` calls that fail with a transient I/O error.
    transient_grade_failures: AtomicU32,
    /// When set, every `record_grade` call fails as if the deck file were corrupt.
    corrupt_deck: bool,
}

impl MockScheduler {
    /// Create a mock that serves the given cards.
    pub fn new(cards: Vec<ReviewCard>) -> Self {
        Self {
            cards,
            failure: None,
            call_count: AtomicU32::new(0),
            last_limit: AtomicUsize::new(0),
            grades: Mutex::new(Vec::new()),
            grade_calls: AtomicU32::new(0),
            transient_grade_failures: AtomicU32::new(0),
            corrupt_deck: false,
        }
    }

    /// Create a mock whose every call fails.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    /// Fail the first `n` grade writes with a transient error.
    pub fn with_transient_grade_failures(self, n: u32) -> Self {
        self.transient_grade_failures.store(n, Ordering::Relaxed);
        self
    }

    /// Fail every grade write with a permanent [`DeckError::Corrupt`].
    pub fn with_corrupt_deck(mut self) -> Self {
        self.corrupt_deck = true;
        self
    }

    /// Get the number of `record_grade` calls made.
    pub fn grade_calls(&self) -> u32 {
        self.grade_calls.load(Ordering::Relaxed)
    }

    /// Get the number of `due_cards` calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the limit passed to the last `due_cards` call.
    pub fn last_limit(&self) -> usize {
        self.last_limit.load(Ordering::Relaxed)
    }

    /// Get the grades recorded so far.
    pub fn grades(&self) -> Vec<GradeRecord> {
        self.grades.lock().unwrap().clone()
    }
}

#[async_trait]
impl DueCardProvider for MockScheduler {
    fn name(&self) -> &str {
        "mock"
    }

    async fn due_cards(&self, limit: usize) -> anyhow::Result<Vec<ReviewCard>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.last_limit.store(limit, Ordering::Relaxed);

        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(self.cards.iter().take(limit).cloned().collect())
    }
}

#[async_trait]
impl GradeSink for MockScheduler {
    async fn record_grade(&self, record: &GradeRecord) -> anyhow::Result<()> {
        self.grade_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        if self.corrupt_deck {
            return Err(DeckError::Corrupt {
                path: "mock-deck.json".into(),
                source: serde_json::Error::custom("mock corrupt deck"),
            }
            .into());
        }
        let transient = self
            .transient_grade_failures
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok();
        if transient {
            return Err(DeckError::Io {
                path: "mock-deck.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::Interrupted, "mock write failure"),
            }
            .into());
        }
        self.grades.lock().unwrap().push(record.clone());
        Ok(())
    }
}
