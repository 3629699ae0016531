//! Guess input validation.
//!
//! Invalid input is reported as a value, never as an error; the caller
//! decides how to show the message.

use serde::{Deserialize, Serialize};

/// Outcome of validating learner input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Empty when valid.
    pub message: String,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Validate a free-form first guess: fails only when blank after trimming.
pub fn validate_guess_input(input: &str) -> ValidationResult {
    if input.trim().is_empty() {
        return ValidationResult::invalid("Please enter a guess");
    }
    ValidationResult::ok()
}

/// Validate a clue-phase guess, which must match the target length exactly.
pub fn validate_clue_input(input_len: usize, target_len: usize) -> ValidationResult {
    if input_len == 0 {
        return ValidationResult::invalid("Please enter your guess");
    }
    if input_len != target_len {
        return ValidationResult::invalid(format!(
            "Your guess should have {target_len} letters, but has {input_len}"
        ));
    }
    ValidationResult::ok()
}
