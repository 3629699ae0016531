//! The `spelldle init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create spelldle.toml
    if std::path::Path::new("spelldle.toml").exists() {
        println!("spelldle.toml already exists, skipping.");
    } else {
        std::fs::write("spelldle.toml", SAMPLE_CONFIG)?;
        println!("Created spelldle.toml");
    }

    // Create example lesson file
    std::fs::create_dir_all("lessons")?;
    let example_path = std::path::Path::new("lessons/example.csv");
    if example_path.exists() {
        println!("lessons/example.csv already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_LESSONS)?;
        println!("Created lessons/example.csv");
    }

    println!("\nNext steps:");
    println!("  1. Add your own words to lessons/example.csv");
    println!("  2. Run: spelldle validate --lessons lessons/example.csv");
    println!("  3. Run: spelldle play --lesson \"Lesson 1\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# spelldle configuration

lessons_path = "lessons/example.csv"
deck_path = "spelldle-deck.json"
max_reviews_per_lesson = 5
# max_attempts_per_word = 6
output_dir = "./spelldle-results"
default_lesson = "Lesson 1"
"#;

const EXAMPLE_LESSONS: &str = r#"lesson,word,sentence
Lesson 1,friend,My best friend lives next door.
Lesson 1,because,I stayed inside because it was raining.
Lesson 1,said,She said hello to everyone.
Lesson 2,necessary,It is necessary to drink water.
Lesson 2,separate,Keep the red and blue socks separate.
Lesson 2,definitely,We will definitely be there on time.
"#;
