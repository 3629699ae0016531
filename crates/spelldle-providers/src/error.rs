//! Review deck error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing a review deck file.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The deck file could not be read or written.
    #[error("deck I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The deck file is not valid deck JSON.
    #[error("deck file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DeckError {
    /// Returns `true` if retrying cannot help without fixing the file.
    pub fn is_permanent(&self) -> bool {
        matches!(self, DeckError::Corrupt { .. })
    }
}
