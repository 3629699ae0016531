//! Session report types with JSON persistence and CSV export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grade::Grade;
use crate::model::Session;

/// How one word of a session went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOutcome {
    pub word: String,
    #[serde(default)]
    pub lesson_name: Option<String>,
    pub is_review: bool,
    /// Counted guesses (rejected input excluded).
    pub attempts: u32,
    pub grade: Grade,
    /// `false` if the learner gave up or ran out of attempts.
    pub solved: bool,
}

/// Aggregate figures for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Words finished (solved or not).
    pub total: usize,
    pub solved: usize,
    /// Words solved on the first attempt.
    pub first_try: usize,
    /// Mean attempts over solved words (0.0 if none).
    pub average_attempts: f64,
    /// Queue composition at the start of the session.
    pub review_count: usize,
    pub lesson_count: usize,
}

impl SessionSummary {
    pub fn compute(outcomes: &[WordOutcome], session: &Session) -> Self {
        let solved: Vec<&WordOutcome> = outcomes.iter().filter(|o| o.solved).collect();
        let average_attempts = if solved.is_empty() {
            0.0
        } else {
            solved.iter().map(|o| o.attempts as f64).sum::<f64>() / solved.len() as f64
        };

        Self {
            total: outcomes.len(),
            solved: solved.len(),
            first_try: solved.iter().filter(|o| o.attempts == 1).count(),
            average_attempts,
            review_count: session.review_count,
            lesson_count: session.lesson_count,
        }
    }

    /// Share of finished words that were solved, 0.0..=1.0.
    pub fn solve_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.solved as f64 / self.total as f64
    }
}

/// A complete record of one practice session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub lesson_name: String,
    /// Finished words in the order they were practiced.
    pub outcomes: Vec<WordOutcome>,
    pub summary: SessionSummary,
    /// `true` if the learner left before the queue was exhausted.
    pub abandoned: bool,
}

impl SessionReport {
    pub fn new(session: &Session, outcomes: Vec<WordOutcome>) -> Self {
        let summary = SessionSummary::compute(&outcomes, session);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            lesson_name: session.lesson_name.clone(),
            abandoned: outcomes.len() < session.len(),
            outcomes,
            summary,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Export the outcomes as CSV. Every field is quoted.
    pub fn to_csv(&self) -> String {
        let mut lines = vec![csv_row(&[
            "word",
            "lesson",
            "is_review",
            "attempts",
            "grade",
            "solved",
        ])];
        for o in &self.outcomes {
            lines.push(csv_row(&[
                &o.word,
                o.lesson_name.as_deref().unwrap_or(""),
                &o.is_review.to_string(),
                &o.attempts.to_string(),
                &o.grade.value().to_string(),
                &o.solved.to_string(),
            ]));
        }
        lines.join("\n")
    }
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}
