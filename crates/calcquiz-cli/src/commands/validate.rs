//! The `calcquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use calcquiz_core::parser::{load_question_file, validate_question_set};

pub fn execute(path: PathBuf) -> Result<()> {
    let set = load_question_file(&path)?;

    println!(
        "Question set: {} ({} questions, topic {}, difficulty {})",
        path.display(),
        set.questions.len(),
        set.topic,
        set.difficulty
    );
    if let Some(description) = set.info.as_ref().and_then(|i| i.explanation.as_deref()) {
        println!("  {description}");
    }

    let warnings = validate_question_set(&set);
    for w in &warnings {
        let prefix = w
            .question_index
            .map(|i| format!("  [question {}]", i + 1))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question set valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
