//! Attempt-count to review-grade mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Review grade handed to the scheduler (1 = Again .. 4 = Easy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Grade {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Grade {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.value()
    }
}

impl TryFrom<u8> for Grade {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Grade::Again),
            2 => Ok(Grade::Hard),
            3 => Ok(Grade::Good),
            4 => Ok(Grade::Easy),
            other => Err(format!("grade must be between 1 and 4, got {other}")),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Again => write!(f, "again"),
            Grade::Hard => write!(f, "hard"),
            Grade::Good => write!(f, "good"),
            Grade::Easy => write!(f, "easy"),
        }
    }
}

/// Map the number of attempts a word took to a grade.
///
/// Fixed bands: 1 -> Easy, 2 -> Good, 3 -> Hard, anything else -> Again.
pub fn grade_from_attempts(attempt_count: u32) -> Grade {
    match attempt_count {
        1 => Grade::Easy,
        2 => Grade::Good,
        3 => Grade::Hard,
        _ => Grade::Again,
    }
}
