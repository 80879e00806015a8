//! Question payload parser.
//!
//! Accepts the three payload shapes a question source may answer with,
//! drops malformed entries, and checks the survivors for data-quality issues.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::LoadError;
use crate::model::{Difficulty, Question, QuestionSet, QuizInfo, Topic};

/// A decoded payload before topic and difficulty are attached.
#[derive(Debug, Clone)]
pub struct ParsedPayload {
    /// Usable questions, in payload order.
    pub questions: Vec<Question>,
    /// Metadata from the wrapped shape.
    pub info: Option<QuizInfo>,
    /// Entries dropped as malformed.
    pub dropped: usize,
}

/// Parse a raw response body.
pub fn parse_payload(body: &str) -> Result<ParsedPayload, LoadError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| LoadError::InvalidJson(e.to_string()))?;
    parse_payload_value(value)
}

/// Decode one of the accepted shapes:
///
/// - `{ "questions": [...], "quiz_info": {...} }`
/// - a bare array of questions
/// - `{ "error": "..." }`
pub fn parse_payload_value(value: Value) -> Result<ParsedPayload, LoadError> {
    let (entries, info) = match value {
        Value::Array(entries) => (entries, None),
        Value::Object(mut map) => {
            let wrapped = map.get("questions").is_some_and(is_truthy)
                && map.get("quiz_info").is_some_and(is_truthy);
            if wrapped {
                let info = map
                    .remove("quiz_info")
                    .and_then(|v| serde_json::from_value::<QuizInfo>(v).ok());
                match map.remove("questions") {
                    Some(Value::Array(entries)) => (entries, info),
                    _ => {
                        return Err(LoadError::UnrecognizedShape(
                            "`questions` is not an array".into(),
                        ))
                    }
                }
            } else if let Some(error) = map.get("error").filter(|v| is_truthy(v)) {
                let message = match error {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                return Err(LoadError::Source(message));
            } else {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                return Err(LoadError::UnrecognizedShape(format!(
                    "object with keys {keys:?}"
                )));
            }
        }
        other => {
            return Err(LoadError::UnrecognizedShape(format!(
                "expected an object or array, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = entries.len();
    let questions: Vec<Question> = entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let q = question_from_entry(entry);
            if q.is_none() {
                tracing::debug!("dropping malformed question at index {i}");
            }
            q
        })
        .collect();
    let dropped = total - questions.len();

    if questions.is_empty() {
        return Err(LoadError::NoValidQuestions { dropped });
    }

    Ok(ParsedPayload {
        questions,
        info,
        dropped,
    })
}

/// The `error` message of an `{"error": "..."}` body, if that is what `body` is.
///
/// Sources answer failures with this shape under a 5xx status as well.
pub fn source_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}

/// Parse a body fetched from `location` into a question set.
///
/// Topic and difficulty are derived from `location`.
pub fn load_question_set(body: &str, location: &str) -> Result<QuestionSet, LoadError> {
    let payload = parse_payload(body)?;
    Ok(into_question_set(payload, location))
}

/// Attach the topic and difficulty implied by `location`.
pub fn into_question_set(payload: ParsedPayload, location: &str) -> QuestionSet {
    QuestionSet {
        questions: payload.questions,
        info: payload.info,
        topic: Topic::from_source(location),
        difficulty: Difficulty::from_source(location),
        dropped: payload.dropped,
    }
}

/// Load a question set from a local JSON file.
pub fn load_question_file(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let location = path.to_string_lossy();
    load_question_set(&content, &location)
        .with_context(|| format!("failed to load questions from {}", path.display()))
}

/// Convert a single payload entry, or `None` if it is unusable.
fn question_from_entry(entry: &Value) -> Option<Question> {
    let obj = entry.as_object()?;

    let text = obj.get("question")?.as_str()?;
    if text.is_empty() {
        return None;
    }

    let options = obj.get("options")?.as_array()?;
    if options.is_empty() {
        return None;
    }
    let options = options
        .iter()
        .map(|o| o.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;

    let correct = obj.get("correct")?.as_str()?;

    Some(Question {
        id: obj.get("id").filter(|v| !v.is_null()).cloned(),
        text: text.to_string(),
        options,
        correct_answer: correct.to_string(),
        explanation: obj
            .get("explanation")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A warning from question set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Zero-based question index (if applicable).
    pub question_index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question set for authoring problems.
///
/// None of these stop a session; they flag data that only works by accident,
/// such as a correct answer that is reachable by position alone.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.dropped > 0 {
        warnings.push(ValidationWarning {
            question_index: None,
            message: format!("{} malformed question(s) were dropped", set.dropped),
        });
    }

    for (i, q) in set.questions.iter().enumerate() {
        if q.correct_option_index().is_none() {
            let normalized = crate::evaluator::normalize_whitespace(&q.correct_answer);
            let near = q
                .options
                .iter()
                .any(|o| crate::evaluator::normalize_whitespace(o) == normalized);
            let message = if near {
                "correct answer matches an option only after whitespace normalization"
            } else {
                "correct answer does not appear in options"
            };
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: message.into(),
            });
        }

        let mut seen = HashSet::new();
        for option in &q.options {
            if !seen.insert(option.as_str()) {
                warnings.push(ValidationWarning {
                    question_index: Some(i),
                    message: format!("duplicate option: {option}"),
                });
            }
        }

        if q.options.iter().any(|o| o.trim().is_empty()) {
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: "option text is empty".into(),
            });
        }
    }

    let mut seen_text = HashSet::new();
    for (i, q) in set.questions.iter().enumerate() {
        if !seen_text.insert(q.text.as_str()) {
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: "duplicate question text".into(),
            });
        }
    }

    warnings
}
