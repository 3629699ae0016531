//! Practice session composition.
//!
//! A session is the review segment (deduplicated, capped due cards) followed
//! by every word of the chosen lesson. The pure builders take a snapshot of
//! due cards; [`SessionComposer`] fetches that snapshot from a scheduler and
//! degrades to a lesson-only session if the fetch fails.

use std::collections::HashSet;

use crate::error::SessionError;
use crate::model::{LessonCatalog, ReviewCard, Session, WordItem};
use crate::traits::DueCardProvider;

/// Due cards requested per review slot, to survive deduplication loss.
pub const OVER_FETCH_FACTOR: usize = 2;

/// Configuration for the session composer.
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    /// Maximum review items placed ahead of the lesson words.
    pub max_reviews: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self { max_reviews: 5 }
    }
}

/// Result of composing a session against a live scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Reviews and lesson words were both available.
    Ready(Session),
    /// The scheduler failed; the session holds lesson words only.
    Degraded {
        session: Session,
        warnings: Vec<String>,
    },
}

impl SessionOutcome {
    pub fn session(&self) -> &Session {
        match self {
            SessionOutcome::Ready(session) => session,
            SessionOutcome::Degraded { session, .. } => session,
        }
    }

    pub fn into_session(self) -> Session {
        match self {
            SessionOutcome::Ready(session) => session,
            SessionOutcome::Degraded { session, .. } => session,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            SessionOutcome::Ready(_) => &[],
            SessionOutcome::Degraded { warnings, .. } => warnings,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SessionOutcome::Degraded { .. })
    }
}

/// Build a session holding only the words of `lesson_name`, in source order.
pub fn build_lesson_session(
    lesson_name: &str,
    catalog: &LessonCatalog,
) -> Result<Session, SessionError> {
    let lesson_items = lesson_items(lesson_name, catalog)?;
    Ok(Session {
        lesson_name: lesson_name.to_string(),
        lesson_count: lesson_items.len(),
        queue: lesson_items,
        review_count: 0,
    })
}

/// Build a session from a snapshot of due cards plus the words of `lesson_name`.
///
/// `due_cards` must be ordered earliest-due first. Only the first
/// `OVER_FETCH_FACTOR * max_reviews` cards are considered; the first card per
/// word wins and the survivors are capped at `max_reviews`. Deduplication is
/// scoped to the review segment: a word may appear again among the lesson words.
pub fn build_review_session(
    due_cards: &[ReviewCard],
    lesson_name: &str,
    catalog: &LessonCatalog,
    max_reviews: usize,
) -> Result<Session, SessionError> {
    let lesson_items = lesson_items(lesson_name, catalog)?;

    let review_items: Vec<WordItem> = dedup_due_cards(due_cards, max_reviews)
        .into_iter()
        .map(|card| WordItem::from_review(card, catalog))
        .collect();

    let review_count = review_items.len();
    let lesson_count = lesson_items.len();
    let mut queue = review_items;
    queue.extend(lesson_items);

    Ok(Session {
        lesson_name: lesson_name.to_string(),
        queue,
        review_count,
        lesson_count,
    })
}

/// First-occurrence-wins dedup over the candidate window, capped at `max_reviews`.
fn dedup_due_cards(due_cards: &[ReviewCard], max_reviews: usize) -> Vec<&ReviewCard> {
    let window = max_reviews.saturating_mul(OVER_FETCH_FACTOR);
    let mut seen = HashSet::new();
    due_cards
        .iter()
        .take(window)
        .filter(|card| seen.insert(card.word.as_str()))
        .take(max_reviews)
        .collect()
}

fn lesson_items(
    lesson_name: &str,
    catalog: &LessonCatalog,
) -> Result<Vec<WordItem>, SessionError> {
    let items: Vec<WordItem> = catalog
        .words_for(lesson_name)
        .map(WordItem::from_lesson)
        .collect();
    if items.is_empty() {
        return Err(SessionError::LessonNotFound(lesson_name.to_string()));
    }
    Ok(items)
}

/// Composes sessions against a live scheduler.
///
/// Holds configuration only; every call works on its own arguments.
#[derive(Debug, Clone, Default)]
pub struct SessionComposer {
    config: ComposerConfig,
}

impl SessionComposer {
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Lesson-only session, no scheduler involved.
    pub fn lesson_session(
        &self,
        lesson_name: &str,
        catalog: &LessonCatalog,
    ) -> Result<Session, SessionError> {
        build_lesson_session(lesson_name, catalog)
    }

    /// Fetch due cards once and compose a review session from that snapshot.
    ///
    /// An unknown lesson fails before the scheduler is contacted. A scheduler
    /// error yields [`SessionOutcome::Degraded`] with an empty review segment.
    pub async fn compose(
        &self,
        scheduler: &dyn DueCardProvider,
        lesson_name: &str,
        catalog: &LessonCatalog,
    ) -> Result<SessionOutcome, SessionError> {
        if !catalog.contains(lesson_name) {
            return Err(SessionError::LessonNotFound(lesson_name.to_string()));
        }

        let max_reviews = self.config.max_reviews;
        if max_reviews == 0 {
            return build_lesson_session(lesson_name, catalog).map(SessionOutcome::Ready);
        }

        let limit = max_reviews.saturating_mul(OVER_FETCH_FACTOR);
        match scheduler.due_cards(limit).await {
            Ok(due_cards) => {
                let session = build_review_session(&due_cards, lesson_name, catalog, max_reviews)?;
                tracing::debug!(
                    lesson = lesson_name,
                    fetched = due_cards.len(),
                    reviews = session.review_count,
                    words = session.lesson_count,
                    "composed review session"
                );
                Ok(SessionOutcome::Ready(session))
            }
            Err(e) => {
                tracing::warn!(
                    "scheduler '{}' unavailable, continuing without reviews: {e:#}",
                    scheduler.name()
                );
                let session = build_lesson_session(lesson_name, catalog)?;
                Ok(SessionOutcome::Degraded {
                    session,
                    warnings: vec![format!("review words unavailable: {e}")],
                })
            }
        }
    }
}
