//! Guess evaluation and per-letter feedback.
//!
//! Classification follows the two-pass Wordle rule: exact matches are claimed
//! first, then remaining letters claim the leftmost unused matching target
//! position. A target letter can satisfy at most one guess letter.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How a single guess character relates to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// Right letter, right position.
    Green,
    /// Letter occurs at another, unclaimed target position.
    Yellow,
    /// No unclaimed occurrence in the target.
    Gray,
    /// Character past the end of the target.
    Extraneous,
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackKind::Green => write!(f, "green"),
            FeedbackKind::Yellow => write!(f, "yellow"),
            FeedbackKind::Gray => write!(f, "gray"),
            FeedbackKind::Extraneous => write!(f, "extraneous"),
        }
    }
}

/// Feedback for one character of the guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub letter: char,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub position: usize,
}

/// Result of classifying a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResult {
    /// One entry per guess character, in guess order.
    pub entries: Vec<FeedbackEntry>,
    pub is_correct: bool,
    pub guess_length: usize,
    pub target_length: usize,
}

impl FeedbackResult {
    /// The entry kinds in guess order.
    pub fn kinds(&self) -> Vec<FeedbackKind> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    pub fn count(&self, kind: FeedbackKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

/// A target letter the guess never used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingLetter {
    pub letter: char,
    pub position: usize,
}

/// Returns `true` iff both strings are non-empty and identical.
pub fn evaluate(guess: &str, target: &str) -> bool {
    !guess.is_empty() && !target.is_empty() && guess == target
}

/// Classify every character of `guess` against `target`.
///
/// Empty input on either side yields no entries and `is_correct == false`.
pub fn classify(guess: &str, target: &str) -> FeedbackResult {
    let guess_chars: Vec<char> = guess.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();

    if guess_chars.is_empty() || target_chars.is_empty() {
        return FeedbackResult {
            entries: Vec::new(),
            is_correct: false,
            guess_length: guess_chars.len(),
            target_length: target_chars.len(),
        };
    }

    let mut kinds: Vec<Option<FeedbackKind>> = vec![None; guess_chars.len()];
    let mut used = vec![false; target_chars.len()];

    // Pass 1: exact positions
    for (i, (g, t)) in guess_chars.iter().zip(&target_chars).enumerate() {
        if g == t {
            kinds[i] = Some(FeedbackKind::Green);
            used[i] = true;
        }
    }

    // Pass 2: leftmost unused match elsewhere, otherwise gray
    for i in 0..guess_chars.len().min(target_chars.len()) {
        if kinds[i].is_some() {
            continue;
        }
        let claim = target_chars
            .iter()
            .enumerate()
            .position(|(j, t)| !used[j] && j != i && *t == guess_chars[i]);
        kinds[i] = Some(match claim {
            Some(j) => {
                used[j] = true;
                FeedbackKind::Yellow
            }
            None => FeedbackKind::Gray,
        });
    }

    let entries = guess_chars
        .iter()
        .zip(kinds)
        .enumerate()
        .map(|(position, (&letter, kind))| FeedbackEntry {
            letter,
            kind: kind.unwrap_or(FeedbackKind::Extraneous),
            position,
        })
        .collect();

    FeedbackResult {
        entries,
        is_correct: guess == target,
        guess_length: guess_chars.len(),
        target_length: target_chars.len(),
    }
}

/// Target letters whose value does not appear anywhere in `guess`.
///
/// Membership is by letter, not by position.
pub fn missing_letters(guess: &str, target: &str) -> Vec<MissingLetter> {
    if guess.is_empty() || target.is_empty() {
        return Vec::new();
    }
    let present: HashSet<char> = guess.chars().collect();
    target
        .chars()
        .enumerate()
        .filter(|(_, c)| !present.contains(c))
        .map(|(position, letter)| MissingLetter { letter, position })
        .collect()
}
