//! The `spelldle lessons` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use spelldle_providers::config::load_config_from;
use spelldle_providers::lessons::load_lessons;

pub fn execute(lessons_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let lessons_path = match lessons_path {
        Some(path) => path,
        None => load_config_from(config_path.as_deref())?.lessons_path,
    };
    let catalog = load_lessons(&lessons_path)?.catalog;

    if catalog.is_empty() {
        println!("No lessons found in {}", lessons_path.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Lesson", "Words"]);
    for name in catalog.lesson_names() {
        table.add_row(vec![name.to_string(), catalog.words_for(name).count().to_string()]);
    }

    println!("{table}");
    Ok(())
}
