//! Collaborator traits for the spaced-repetition scheduler.
//!
//! Implemented by the `spelldle-providers` crate. The core only reads due
//! cards and hands grades back; how they are stored or scheduled is up to
//! the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grade::Grade;
use crate::model::ReviewCard;

// ---------------------------------------------------------------------------
// Due-card provider
// ---------------------------------------------------------------------------

/// Source of review cards that are due.
#[async_trait]
pub trait DueCardProvider: Send + Sync {
    /// Human-readable scheduler name (e.g. "deck").
    fn name(&self) -> &str;

    /// Up to `limit` due cards, earliest due first.
    async fn due_cards(&self, limit: usize) -> anyhow::Result<Vec<ReviewCard>>;
}

// ---------------------------------------------------------------------------
// Grade sink
// ---------------------------------------------------------------------------

/// Receiver for review grades produced by a finished word.
#[async_trait]
pub trait GradeSink: Send + Sync {
    async fn record_grade(&self, record: &GradeRecord) -> anyhow::Result<()>;
}

/// A grade for one practiced word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub word: String,
    #[serde(default)]
    pub lesson_name: Option<String>,
    pub grade: Grade,
    /// Attempts the learner needed (0 if they gave up before guessing).
    pub attempts: u32,
    pub recorded_at: DateTime<Utc>,
}

impl GradeRecord {
    pub fn new(
        word: impl Into<String>,
        lesson_name: Option<&str>,
        grade: Grade,
        attempts: u32,
    ) -> Self {
        Self {
            word: word.into(),
            lesson_name: lesson_name.map(str::to_string),
            grade,
            attempts,
            recorded_at: Utc::now(),
        }
    }
}
