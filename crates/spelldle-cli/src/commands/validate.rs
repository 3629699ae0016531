//! The `spelldle validate` command.

use std::path::PathBuf;

use anyhow::Result;

use spelldle_providers::lessons::load_lessons;

pub fn execute(lessons_path: PathBuf) -> Result<()> {
    let load = load_lessons(&lessons_path)?;
    let catalog = &load.catalog;

    println!(
        "Lesson file: {} ({} lessons, {} words)",
        lessons_path.display(),
        catalog.lesson_names().len(),
        catalog.len()
    );

    for w in &load.warnings {
        println!("  [line {}] WARNING: {}", w.line, w.message);
    }

    if load.warnings.is_empty() {
        println!("All lesson rows valid.");
    } else {
        println!("\n{} warning(s) found.", load.warnings.len());
    }

    Ok(())
}
