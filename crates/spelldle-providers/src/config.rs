//! spelldle configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::deck::JsonDeck;

/// Top-level spelldle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpelldleConfig {
    /// CSV file with `lesson,word,sentence` rows.
    #[serde(default = "default_lessons_path")]
    pub lessons_path: PathBuf,
    /// Review deck file. Reviews are disabled when unset.
    #[serde(default)]
    pub deck_path: Option<PathBuf>,
    /// Review words placed ahead of each lesson.
    #[serde(default = "default_max_reviews")]
    pub max_reviews_per_lesson: usize,
    /// Wrong guesses allowed per word before it is marked failed (None = unlimited).
    #[serde(default)]
    pub max_attempts_per_word: Option<u32>,
    /// Output directory for session reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Lesson to play when none is given on the command line.
    #[serde(default)]
    pub default_lesson: Option<String>,
    /// Max retries when a grade cannot be written to the deck.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds; doubles on each retry.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

fn default_lessons_path() -> PathBuf {
    PathBuf::from("lessons/lessons.csv")
}
fn default_max_reviews() -> usize {
    5
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./spelldle-results")
}
fn default_retries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1000
}

impl Default for SpelldleConfig {
    fn default() -> Self {
        Self {
            lessons_path: default_lessons_path(),
            deck_path: None,
            max_reviews_per_lesson: default_max_reviews(),
            max_attempts_per_word: None,
            output_dir: default_output_dir(),
            default_lesson: None,
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

impl SpelldleConfig {
    /// Open the configured review deck, if any.
    pub fn open_deck(&self) -> Option<JsonDeck> {
        self.deck_path.as_ref().map(|p| JsonDeck::open(p.clone()))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `spelldle.toml` in the current directory
/// 2. `~/.config/spelldle/config.toml`
///
/// Environment variable overrides: `SPELLDLE_MAX_REVIEWS`, `SPELLDLE_LESSONS`.
pub fn load_config() -> Result<SpelldleConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<SpelldleConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("spelldle.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => SpelldleConfig::default(),
    };

    // Apply env var overrides
    if let Ok(value) = std::env::var("SPELLDLE_MAX_REVIEWS") {
        config.max_reviews_per_lesson = value
            .trim()
            .parse()
            .with_context(|| format!("invalid SPELLDLE_MAX_REVIEWS: '{value}'"))?;
    }
    if let Ok(value) = std::env::var("SPELLDLE_LESSONS") {
        config.lessons_path = PathBuf::from(value);
    }

    // Resolve env vars in all path fields
    config.lessons_path = resolve_path(&config.lessons_path);
    config.deck_path = config.deck_path.as_deref().map(resolve_path);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<SpelldleConfig> {
    Ok(toml::from_str::<SpelldleConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("spelldle"))
}
