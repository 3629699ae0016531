//! Terminal rendering for feedback rows and session summaries.

use comfy_table::{Cell, Table};

use spelldle_core::feedback::{FeedbackKind, FeedbackResult};
use spelldle_core::report::SessionReport;

pub const LEGEND: &str = "= right spot   ~ wrong spot   . not in word   + extra letter";

fn symbol(kind: FeedbackKind) -> char {
    match kind {
        FeedbackKind::Green => '=',
        FeedbackKind::Yellow => '~',
        FeedbackKind::Gray => '.',
        FeedbackKind::Extraneous => '+',
    }
}

/// Two rows: the guessed letters and their feedback symbols, column-aligned.
pub fn render_feedback(feedback: &FeedbackResult) -> String {
    let letters: Vec<String> = feedback
        .entries
        .iter()
        .map(|e| e.letter.to_uppercase().collect())
        .collect();
    let marks: Vec<String> = feedback
        .entries
        .iter()
        .map(|e| symbol(e.kind).to_string())
        .collect();
    format!("  {}\n  {}", letters.join(" "), marks.join(" "))
}

/// Hide the target word inside its example sentence.
pub fn mask_word(sentence: &str, word: &str) -> String {
    if word.is_empty() {
        return sentence.to_string();
    }
    let blank = "_".repeat(word.chars().count());
    let mut masked = sentence.replace(word, &blank);

    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        let capitalized: String = first.to_uppercase().chain(chars).collect();
        if capitalized != word {
            masked = masked.replace(&capitalized, &blank);
        }
    }
    masked
}

/// Per-word results table.
pub fn summary_table(report: &SessionReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Word", "Source", "Attempts", "Grade", "Solved"]);

    for o in &report.outcomes {
        table.add_row(vec![
            Cell::new(&o.word),
            Cell::new(if o.is_review { "review" } else { "lesson" }),
            Cell::new(o.attempts),
            Cell::new(format!("{} ({})", o.grade.value(), o.grade)),
            Cell::new(if o.solved { "yes" } else { "no" }),
        ]);
    }

    table
}
