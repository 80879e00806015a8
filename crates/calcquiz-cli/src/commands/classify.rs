//! The `calcquiz classify` command.

use anyhow::Result;
use serde::Serialize;

use calcquiz_core::diagnosis::{cascade_for, matched_rule_id, ClassificationContext, Diagnosis};
use calcquiz_core::model::{Difficulty, Topic};

use crate::render;

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    topic: Topic,
    difficulty: Difficulty,
    cascade: &'static str,
    rule: &'static str,
    diagnosis: &'a Diagnosis,
}

pub fn execute(
    topic: Topic,
    difficulty: Difficulty,
    question: String,
    answer: String,
    correct: String,
    json: bool,
) -> Result<()> {
    let ctx = ClassificationContext {
        question_text: &question,
        user_answer: &answer,
        correct_answer: &correct,
        topic,
        difficulty,
    };
    let rule = matched_rule_id(&ctx);
    let diagnosis = Diagnosis::Incorrect(cascade_for(topic).diagnose(&ctx));

    if json {
        let output = ClassifyOutput {
            topic,
            difficulty,
            cascade: cascade_for(topic).name,
            rule,
            diagnosis: &diagnosis,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(bundle) = diagnosis.bundle() {
        let mut out = std::io::stdout().lock();
        render::diagnosis(&mut out, rule, bundle)?;
    }
    Ok(())
}
