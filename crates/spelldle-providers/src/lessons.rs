//! CSV lesson loader.
//!
//! Reads `lesson,word,sentence` rows into a [`LessonCatalog`]. Rows that cannot
//! be drilled are skipped with a warning rather than failing the whole file.

use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

use spelldle_core::model::{LessonCatalog, LessonWord};

/// A skipped row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonWarning {
    /// 1-based line in the source file.
    pub line: u64,
    pub message: String,
}

/// Parsed lesson data plus the rows that were skipped.
#[derive(Debug, Clone, Default)]
pub struct LessonLoad {
    pub catalog: LessonCatalog,
    pub warnings: Vec<LessonWarning>,
}

/// Column positions resolved from the header row.
struct Columns {
    lesson: usize,
    word: usize,
    sentence: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };
        let lesson = find(&["lesson", "lesson_name", "lessonName"])
            .context("missing 'lesson' column in header")?;
        let word = find(&["word"]).context("missing 'word' column in header")?;
        let sentence = find(&["sentence"]).context("missing 'sentence' column in header")?;
        Ok(Self {
            lesson,
            word,
            sentence,
        })
    }
}

/// Load lessons from a CSV file.
pub fn load_lessons(path: &Path) -> Result<LessonLoad> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read lesson file: {}", path.display()))?;

    parse_lessons_str(&content, path)
}

/// Parse CSV lesson data from a string (useful for testing).
pub fn parse_lessons_str(content: &str, source_path: &Path) -> Result<LessonLoad> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read CSV header: {}", source_path.display()))?
        .clone();
    let columns = Columns::resolve(&headers)
        .with_context(|| format!("invalid lesson file: {}", source_path.display()))?;

    let mut words = Vec::new();
    let mut warnings = Vec::new();

    for result in reader.records() {
        let record = result
            .with_context(|| format!("failed to parse CSV: {}", source_path.display()))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        match parse_row(&record, &columns) {
            Ok(word) => words.push(word),
            Err(message) => {
                tracing::warn!("{}:{}: skipping row: {}", source_path.display(), line, message);
                warnings.push(LessonWarning { line, message });
            }
        }
    }

    Ok(LessonLoad {
        catalog: LessonCatalog::new(words),
        warnings,
    })
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<LessonWord, String> {
    let field = |i: usize| record.get(i).unwrap_or("");
    let lesson = field(columns.lesson);
    let word = field(columns.word);
    let sentence = field(columns.sentence);

    if lesson.is_empty() {
        return Err("lesson name is empty".into());
    }
    if word.is_empty() {
        return Err("word is empty".into());
    }
    if word.chars().any(char::is_whitespace) {
        return Err(format!("word '{word}' contains whitespace"));
    }
    if sentence.is_empty() {
        return Err(format!("sentence for '{word}' is empty"));
    }

    Ok(LessonWord::new(lesson, word, sentence))
}
