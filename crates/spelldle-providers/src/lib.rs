//! spelldle-providers: collaborators for the spelldle core.
//!
//! Loads lesson data from CSV, keeps review cards and grades in a JSON deck
//! file, and reads the TOML configuration that ties them together.

pub mod config;
pub mod deck;
pub mod error;
pub mod lessons;
pub mod mock;

pub use config::{load_config, load_config_from, SpelldleConfig};
pub use deck::{JsonDeck, ReviewDeck};
pub use error::DeckError;
pub use lessons::{load_lessons, LessonLoad, LessonWarning};
pub use mock::MockScheduler;
