//! Session composition error types.
//!
//! Only data-availability problems surface as errors. Scheduler outages are
//! absorbed into a degraded session instead, see [`crate::session::SessionOutcome`].

use thiserror::Error;

/// Errors that can occur while composing a practice session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No lesson rows carry the requested lesson name.
    #[error("lesson not found: {0}")]
    LessonNotFound(String),
}

impl SessionError {
    /// The lesson name the caller asked for.
    pub fn lesson_name(&self) -> &str {
        match self {
            SessionError::LessonNotFound(name) => name,
        }
    }
}
