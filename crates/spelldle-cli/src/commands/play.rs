//! The `spelldle play` command.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use spelldle_core::drill::{DrillStep, WordDrill};
use spelldle_core::feedback::missing_letters;
use spelldle_core::report::{SessionReport, WordOutcome};
use spelldle_core::session::{ComposerConfig, SessionComposer, SessionOutcome};
use spelldle_core::traits::{GradeRecord, GradeSink};
use spelldle_core::{Session, SessionError};
use spelldle_providers::config::load_config_from;
use spelldle_providers::lessons::load_lessons;
use spelldle_providers::{DeckError, JsonDeck};

use crate::display::{mask_word, render_feedback, summary_table, LEGEND};

/// Typed instead of a guess to give up on the current word.
const SKIP_COMMAND: &str = ":skip";

/// Upper bound for the backoff between grade write retries.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Per-session drill settings.
#[derive(Debug, Clone)]
pub struct DrillOptions {
    /// Guesses allowed per word (None = unlimited).
    pub max_attempts: Option<u32>,
    /// Retries for a grade write that failed with a transient error.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub retry_delay: Duration,
}

pub async fn execute(
    lesson: Option<String>,
    lessons_path: Option<PathBuf>,
    deck_path: Option<PathBuf>,
    max_reviews: Option<usize>,
    save_report: bool,
    csv: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let lessons_path = lessons_path.unwrap_or_else(|| config.lessons_path.clone());
    let load = load_lessons(&lessons_path)?;
    if !load.warnings.is_empty() {
        eprintln!(
            "Warning: skipped {} malformed row(s) in {}",
            load.warnings.len(),
            lessons_path.display()
        );
    }
    let catalog = load.catalog;

    let Some(lesson_name) = lesson.or_else(|| config.default_lesson.clone()) else {
        anyhow::bail!(
            "no lesson given. Available: {:?}",
            catalog.lesson_names()
        );
    };

    let composer = SessionComposer::new(ComposerConfig {
        max_reviews: max_reviews.unwrap_or(config.max_reviews_per_lesson),
    });
    let deck = deck_path.map(JsonDeck::open).or_else(|| config.open_deck());

    let composed = match &deck {
        Some(deck) => composer.compose(deck, &lesson_name, &catalog).await,
        None => composer
            .lesson_session(&lesson_name, &catalog)
            .map(SessionOutcome::Ready),
    };
    let outcome = match composed {
        Ok(outcome) => outcome,
        Err(SessionError::LessonNotFound(name)) => anyhow::bail!(
            "lesson '{name}' not found in {}. Available: {:?}",
            lessons_path.display(),
            catalog.lesson_names()
        ),
    };
    for warning in outcome.warnings() {
        eprintln!("Warning: {warning}");
    }
    let session = outcome.into_session();

    let options = DrillOptions {
        max_attempts: config.max_attempts_per_word,
        max_retries: config.max_retries,
        retry_delay: Duration::from_millis(config.retry_delay_ms),
    };
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let sink = deck.as_ref().map(|d| d as &dyn GradeSink);
    let outcomes = run_session(&session, stdin, &mut stdout, &options, sink).await?;

    let report = SessionReport::new(&session, outcomes);
    print_summary(&report, &mut stdout)?;

    if save_report {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = config
            .output_dir
            .join(format!("session-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());

        if csv {
            let csv_path = path.with_extension("csv");
            std::fs::write(&csv_path, report.to_csv())
                .with_context(|| format!("failed to write CSV to {}", csv_path.display()))?;
            eprintln!("CSV saved to: {}", csv_path.display());
        }
    } else if csv {
        eprintln!("Warning: --csv has no effect without --save-report");
    }

    Ok(())
}

/// Drill every word of `session`, reading guesses line by line.
///
/// Returns the outcomes of the finished words. End of input abandons the
/// session; the word in progress is not recorded.
pub async fn run_session<R, W>(
    session: &Session,
    input: R,
    out: &mut W,
    options: &DrillOptions,
    mut sink: Option<&dyn GradeSink>,
) -> Result<Vec<WordOutcome>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut outcomes = Vec::new();
    let total = session.len();

    writeln!(
        out,
        "Lesson: {} ({} review, {} new)",
        session.lesson_name, session.review_count, session.lesson_count
    )?;
    writeln!(out, "{LEGEND}")?;
    writeln!(out, "Type {SKIP_COMMAND} to give up on a word.")?;

    'words: for (index, item) in session.queue.iter().enumerate() {
        let tag = if item.is_review { " (review)" } else { "" };
        writeln!(
            out,
            "\nWord {}/{}{}: {} letters",
            index + 1,
            total,
            tag,
            item.len()
        )?;
        if !item.sentence.is_empty() {
            writeln!(out, "  {}", mask_word(&item.sentence, &item.word))?;
        }

        let mut drill = WordDrill::new(item.clone()).with_max_attempts(options.max_attempts);
        while !drill.is_finished() {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await.context("failed to read input")? else {
                writeln!(out, "\nSession abandoned.")?;
                break 'words;
            };

            if line.trim() == SKIP_COMMAND {
                drill.give_up();
                writeln!(out, "  The word was: {}", item.word)?;
                continue;
            }

            match drill.submit(&line) {
                DrillStep::Rejected(validation) => writeln!(out, "  {}", validation.message)?,
                DrillStep::Incorrect(feedback) => {
                    writeln!(out, "{}", render_feedback(&feedback))?;
                    let unused = missing_letters(line.trim(), &item.word).len();
                    if unused > 0 {
                        writeln!(out, "  {unused} letter(s) of the word not tried yet")?;
                    }
                }
                DrillStep::Solved { feedback, grade } => {
                    writeln!(out, "{}", render_feedback(&feedback))?;
                    writeln!(
                        out,
                        "  Correct! {} attempt(s), grade {} ({grade})",
                        drill.attempts(),
                        grade.value()
                    )?;
                }
                DrillStep::Exhausted { feedback, .. } => {
                    writeln!(out, "{}", render_feedback(&feedback))?;
                    writeln!(out, "  Out of attempts. The word was: {}", item.word)?;
                }
            }
        }

        let Some(outcome) = drill.outcome() else {
            continue;
        };
        if let Some(s) = sink {
            if !record_grade(s, &outcome, options).await {
                sink = None;
            }
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Send a grade to the sink, retrying transient failures with exponential backoff.
///
/// Returns `false` if the sink should not be used again.
async fn record_grade(
    sink: &dyn GradeSink,
    outcome: &WordOutcome,
    options: &DrillOptions,
) -> bool {
    let record = GradeRecord::new(
        &outcome.word,
        outcome.lesson_name.as_deref(),
        outcome.grade,
        outcome.attempts,
    );

    let mut retry_delay = options.retry_delay;
    for retry in 0..=options.max_retries {
        if retry > 0 {
            tokio::time::sleep(retry_delay).await;
            retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
        }
        match sink.record_grade(&record).await {
            Ok(()) => return true,
            Err(e) => {
                let permanent = e
                    .downcast_ref::<DeckError>()
                    .is_some_and(DeckError::is_permanent);
                if permanent {
                    tracing::error!("grade recording disabled for this session: {e:#}");
                    return false;
                }
                tracing::warn!(
                    "failed to record grade for '{}' (attempt {}/{}): {e:#}",
                    outcome.word,
                    retry + 1,
                    options.max_retries + 1
                );
            }
        }
    }

    tracing::warn!("giving up on grade for '{}'", outcome.word);
    true
}

fn print_summary<W: Write>(report: &SessionReport, out: &mut W) -> Result<()> {
    let summary = &report.summary;
    if report.abandoned {
        writeln!(
            out,
            "\nFinished {} of {} word(s).",
            summary.total,
            summary.review_count + summary.lesson_count
        )?;
    }
    if report.outcomes.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n{}", summary_table(report))?;
    writeln!(
        out,
        "Solved {}/{} ({:.0}%), {} on the first try, {:.1} attempts per solved word",
        summary.solved,
        summary.total,
        summary.solve_rate() * 100.0,
        summary.first_try,
        summary.average_attempts
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spelldle_core::grade::Grade;
    use spelldle_core::model::{LessonCatalog, LessonWord};
    use spelldle_core::session::build_lesson_session;
    use spelldle_providers::MockScheduler;

    fn session() -> Session {
        let catalog = LessonCatalog::new(vec![
            LessonWord::new("Lesson 1", "cat", "The cat sat."),
            LessonWord::new("Lesson 1", "dog", "A dog barked."),
        ]);
        build_lesson_session("Lesson 1", &catalog).unwrap()
    }

    fn options() -> DrillOptions {
        DrillOptions {
            max_attempts: None,
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
        }
    }

    async fn play(input: &str, sink: Option<&dyn GradeSink>) -> (Vec<WordOutcome>, String) {
        let mut out = Vec::new();
        let outcomes = run_session(&session(), input.as_bytes(), &mut out, &options(), sink)
            .await
            .unwrap();
        (outcomes, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn plays_through_lesson_and_records_grades() {
        let sink = MockScheduler::new(vec![]);
        let (outcomes, out) = play("cat\ndgo\n\ndog\n", Some(&sink)).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].grade, Grade::Easy);
        assert_eq!(outcomes[1].attempts, 2);
        assert_eq!(outcomes[1].grade, Grade::Good);
        assert!(out.contains("The ___ sat."));
        assert!(out.contains("Please enter your guess"));

        let grades: Vec<(String, Grade)> =
            sink.grades().into_iter().map(|g| (g.word, g.grade)).collect();
        assert_eq!(
            grades,
            vec![("cat".to_string(), Grade::Easy), ("dog".to_string(), Grade::Good)]
        );
    }

    #[tokio::test]
    async fn skip_gives_up_word() {
        let (outcomes, out) = play(":skip\ndog\n", None).await;
        assert_eq!(outcomes[0].grade, Grade::Again);
        assert!(!outcomes[0].solved);
        assert!(out.contains("The word was: cat"));
    }

    #[tokio::test]
    async fn end_of_input_abandons_session() {
        let (outcomes, out) = play("cat\nd", None).await;
        // "d" is a wrong guess for "dog"; input then ends mid-word
        assert_eq!(outcomes.len(), 1);
        assert!(out.contains("Session abandoned."));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_sink_does_not_stop_session() {
        let sink = MockScheduler::failing("disk full");
        let (outcomes, _) = play("cat\ndog\n", Some(&sink)).await;
        assert_eq!(outcomes.len(), 2);
        // Each word: one try plus three retries
        assert_eq!(sink.grade_calls(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_grade_failure_is_retried() {
        let sink = MockScheduler::new(vec![]).with_transient_grade_failures(1);
        let start = tokio::time::Instant::now();
        let (outcomes, _) = play("cat\n", Some(&sink)).await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(sink.grade_calls(), 2);
        let words: Vec<String> = sink.grades().into_iter().map(|g| g.word).collect();
        assert_eq!(words, vec!["cat"]);
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_delay_doubles() {
        let sink = MockScheduler::new(vec![]).with_transient_grade_failures(3);
        let start = tokio::time::Instant::now();
        play("cat\n", Some(&sink)).await;

        assert_eq!(sink.grade_calls(), 4);
        assert_eq!(sink.grades().len(), 1);
        // 1s + 2s + 4s
        assert!(start.elapsed() >= Duration::from_secs(7));
    }

    #[tokio::test]
    async fn corrupt_deck_disables_grade_recording() {
        let sink = MockScheduler::new(vec![]).with_corrupt_deck();
        let (outcomes, _) = play("cat\ndog\n", Some(&sink)).await;

        assert_eq!(outcomes.len(), 2);
        // No retries and no write attempt for the second word
        assert_eq!(sink.grade_calls(), 1);
        assert!(sink.grades().is_empty());
    }

    #[test]
    fn summary_mentions_unfinished_words() {
        let report = SessionReport::new(
            &session(),
            vec![WordOutcome {
                word: "cat".into(),
                lesson_name: Some("Lesson 1".into()),
                is_review: false,
                attempts: 1,
                grade: Grade::Easy,
                solved: true,
            }],
        );
        let mut out = Vec::new();
        print_summary(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Finished 1 of 2 word(s)."));
        assert!(text.contains("Solved 1/1 (100%)"));
    }
}
