//! Core data model types for calcquiz.
//!
//! These are the fundamental types that the rest of the system uses to
//! represent questions, question sets, topics and difficulty levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier assigned by the question generator, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    /// The question prompt, possibly containing LaTeX markup.
    #[serde(rename = "question")]
    pub text: String,
    /// Answer options, in presentation order.
    pub options: Vec<String>,
    /// The canonical answer. Expected to equal one of `options`.
    #[serde(rename = "correct")]
    pub correct_answer: String,
    /// Worked explanation shown after a correct answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Build a question without an id or explanation.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            text: text.into(),
            options,
            correct_answer: correct_answer.into(),
            explanation: None,
        }
    }

    /// Attach an explanation.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Index of the first option that is byte-identical to the correct answer.
    pub fn correct_option_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }
}

/// Metadata that accompanies a wrapped question payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizInfo {
    /// Human-readable description of the quiz, shown above the questions.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Topic the quiz concentrates on (personalized quizzes).
    #[serde(default)]
    pub focus_topic: Option<String>,
    /// Kind of quiz, e.g. "personalized" or "general".
    #[serde(default)]
    pub quiz_type: Option<String>,
    /// Question count as reported by the source.
    #[serde(default)]
    pub total_questions: Option<u32>,
}

/// A validated set of questions, ready to start a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSet {
    /// The usable questions, in presentation order.
    pub questions: Vec<Question>,
    /// Payload metadata, when the source sent the wrapped shape.
    #[serde(default)]
    pub info: Option<QuizInfo>,
    /// Topic derived from the source location.
    pub topic: Topic,
    /// Difficulty derived from the source location.
    pub difficulty: Difficulty,
    /// Number of entries dropped because they were malformed.
    #[serde(default)]
    pub dropped: usize,
}

/// Mathematical subject of a question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Derivatives,
    Integrals,
    Limits,
    CriticalPoints,
    General,
    Personalized,
    Unknown,
}

impl Topic {
    /// All topics, in URL-detection order.
    pub const ALL: [Topic; 7] = [
        Topic::Derivatives,
        Topic::Integrals,
        Topic::Limits,
        Topic::CriticalPoints,
        Topic::General,
        Topic::Personalized,
        Topic::Unknown,
    ];

    /// Derive the topic from a source URL or path.
    ///
    /// The first known topic name found as a substring wins.
    pub fn from_source(location: &str) -> Topic {
        Topic::ALL
            .into_iter()
            .filter(|t| *t != Topic::Unknown)
            .find(|t| location.contains(t.as_str()))
            .unwrap_or(Topic::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Derivatives => "derivatives",
            Topic::Integrals => "integrals",
            Topic::Limits => "limits",
            Topic::CriticalPoints => "criticalpoints",
            Topic::General => "general",
            Topic::Personalized => "personalized",
            Topic::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "derivatives" | "derivative" => Ok(Topic::Derivatives),
            "integrals" | "integral" => Ok(Topic::Integrals),
            "limits" | "limit" => Ok(Topic::Limits),
            "criticalpoints" | "critical-points" | "critical_points" => {
                Ok(Topic::CriticalPoints)
            }
            "general" => Ok(Topic::General),
            "personalized" => Ok(Topic::Personalized),
            "unknown" => Ok(Topic::Unknown),
            other => Err(format!("unknown topic: {other}")),
        }
    }
}

/// Difficulty level of a question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Mixed,
}

impl Difficulty {
    /// Derive the difficulty from a source URL or path.
    pub fn from_source(location: &str) -> Difficulty {
        if location.contains("/easy") {
            Difficulty::Easy
        } else if location.contains("/medium") {
            Difficulty::Medium
        } else if location.contains("/hard") {
            Difficulty::Hard
        } else {
            Difficulty::Mixed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "mixed" | "basic" => Ok(Difficulty::Mixed),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}
