//! The `spelldle check` command.

use anyhow::Result;
use serde::Serialize;

use spelldle_core::feedback::{
    classify, missing_letters, FeedbackKind, FeedbackResult, MissingLetter,
};
use spelldle_core::validation::validate_guess_input;

use crate::display::{render_feedback, LEGEND};

#[derive(Serialize)]
struct CheckOutput<'a> {
    guess: &'a str,
    target: &'a str,
    #[serde(flatten)]
    feedback: FeedbackResult,
    missing_letters: Vec<MissingLetter>,
}

pub fn execute(guess: String, target: String, format: String) -> Result<()> {
    let guess = guess.trim();
    let validation = validate_guess_input(guess);
    if !validation.valid {
        anyhow::bail!("{}", validation.message);
    }
    if target.is_empty() {
        anyhow::bail!("target word must not be empty");
    }

    let output = CheckOutput {
        guess,
        target: &target,
        feedback: classify(guess, &target),
        missing_letters: missing_letters(guess, &target),
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&output)?),
        "text" => {
            println!("{}", render_feedback(&output.feedback));
            println!("{LEGEND}");
            if output.feedback.is_correct {
                println!("Correct!");
                return Ok(());
            }
            println!(
                "{} right spot, {} wrong spot",
                output.feedback.count(FeedbackKind::Green),
                output.feedback.count(FeedbackKind::Yellow)
            );
            if !output.missing_letters.is_empty() {
                let letters: String = output.missing_letters.iter().map(|m| m.letter).collect();
                println!("Not tried: {letters}");
            }
        }
        other => anyhow::bail!("unknown format: {other}. Supported: text, json"),
    }

    Ok(())
}
