//! The spelldle command-line front end.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod display;

#[derive(Parser)]
#[command(
    name = "spelldle",
    version,
    about = "Spelling drill with Wordle-style feedback and spaced-repetition reviews"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Practice a lesson, with due review words first
    Play {
        /// Lesson to practice (default: `default_lesson` from config)
        #[arg(long)]
        lesson: Option<String>,

        /// Lesson CSV file (overrides config)
        #[arg(long)]
        lessons: Option<PathBuf>,

        /// Review deck JSON file (overrides config)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Max review words before the lesson (overrides config)
        #[arg(long)]
        max_reviews: Option<usize>,

        /// Write a JSON session report to the output directory
        #[arg(long)]
        save_report: bool,

        /// Also write the report as CSV (with --save-report)
        #[arg(long)]
        csv: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show feedback for a single guess
    Check {
        /// The guessed word
        #[arg(long)]
        guess: String,

        /// The target word
        #[arg(long)]
        target: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List lessons in a lesson file
    Lessons {
        /// Lesson CSV file (overrides config)
        #[arg(long)]
        lessons: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a lesson CSV file
    Validate {
        /// Path to the lesson CSV file
        #[arg(long)]
        lessons: PathBuf,
    },

    /// Create starter config and example lesson file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("spelldle=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            lesson,
            lessons,
            deck,
            max_reviews,
            save_report,
            csv,
            config,
        } => {
            commands::play::execute(lesson, lessons, deck, max_reviews, save_report, csv, config)
                .await
        }
        Commands::Check {
            guess,
            target,
            format,
        } => commands::check::execute(guess, target, format),
        Commands::Lessons { lessons, config } => commands::lessons::execute(lessons, config),
        Commands::Validate { lessons } => commands::validate::execute(lessons),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
