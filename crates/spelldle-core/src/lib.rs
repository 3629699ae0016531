//! spelldle-core: guess feedback, grading, and session composition.
//!
//! This crate holds the pure game logic of spelldle: classifying a typed guess
//! against a target word, mapping attempt counts to review grades, and merging
//! scheduler due cards with a lesson's words into one practice queue. It keeps
//! no state between calls; everything it needs is passed in.

pub mod drill;
pub mod error;
pub mod feedback;
pub mod grade;
pub mod model;
pub mod report;
pub mod session;
pub mod traits;
pub mod validation;

pub use error::SessionError;
pub use feedback::{
    classify, evaluate, missing_letters, FeedbackEntry, FeedbackKind, FeedbackResult,
};
pub use grade::{grade_from_attempts, Grade};
pub use model::{LessonCatalog, LessonWord, ReviewCard, Session, WordItem};
pub use session::{
    build_lesson_session, build_review_session, SessionComposer, SessionOutcome,
};
pub use validation::{validate_clue_input, validate_guess_input, ValidationResult};
