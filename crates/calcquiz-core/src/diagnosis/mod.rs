//! Heuristic error diagnosis.
//!
//! Every topic owns a [`Cascade`]: an ordered table of [`Rule`]s evaluated
//! first-match-wins, plus a fallback bundle. Rules are plain textual
//! predicates over the question and the answers; nothing here understands
//! the mathematics.
//!
//! Rule order is significant. Predicates overlap (a chain-rule question
//! usually also mentions `sin`), and the position in the table decides which
//! diagnosis the student sees.

mod critical_points;
mod derivatives;
mod generic;
mod integrals;
mod limits;
mod patterns;

pub use critical_points::NO_POINTS_SENTINELS;

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Question, Topic};

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationContext<'a> {
    pub question_text: &'a str,
    pub user_answer: &'a str,
    pub correct_answer: &'a str,
    pub topic: Topic,
    pub difficulty: Difficulty,
}

impl<'a> ClassificationContext<'a> {
    pub fn new(
        question: &'a Question,
        user_answer: &'a str,
        topic: Topic,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            question_text: &question.text,
            user_answer,
            correct_answer: &question.correct_answer,
            topic,
            difficulty,
        }
    }
}

/// The eight-part explanation attached to a wrong answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticBundle {
    pub why_wrong: String,
    pub correct_method: String,
    pub step_by_step: String,
    pub key_insight: String,
    pub common_mistake: String,
    pub how_to_avoid: String,
    pub practice_tip: String,
    pub memory_aid: String,
}

impl DiagnosticBundle {
    /// The eight parts with their display headings, in display order.
    pub fn sections(&self) -> [(&'static str, &str); 8] {
        [
            ("Why it's wrong", self.why_wrong.as_str()),
            ("The right way", self.correct_method.as_str()),
            ("Step by step", self.step_by_step.as_str()),
            ("Key insight", self.key_insight.as_str()),
            ("Common mistake", self.common_mistake.as_str()),
            ("How to avoid it", self.how_to_avoid.as_str()),
            ("Practice tip", self.practice_tip.as_str()),
            ("Memory aid", self.memory_aid.as_str()),
        ]
    }
}

/// Outcome of classifying one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnosis {
    Correct { success_reason: String },
    Incorrect(DiagnosticBundle),
}

impl Diagnosis {
    pub fn is_correct(&self) -> bool {
        matches!(self, Diagnosis::Correct { .. })
    }

    pub fn bundle(&self) -> Option<&DiagnosticBundle> {
        match self {
            Diagnosis::Incorrect(bundle) => Some(bundle),
            Diagnosis::Correct { .. } => None,
        }
    }
}

/// One row of a cascade.
pub struct Rule {
    /// Stable identifier, e.g. `"chain-rule"`.
    pub id: &'static str,
    pub applies: fn(&ClassificationContext) -> bool,
    pub diagnose: fn(&ClassificationContext) -> DiagnosticBundle,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("id", &self.id).finish()
    }
}

/// Ordered rules for one topic plus the bundle used when none match.
pub struct Cascade {
    pub name: &'static str,
    pub rules: &'static [Rule],
    pub fallback: fn(&ClassificationContext) -> DiagnosticBundle,
}

impl std::fmt::Debug for Cascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cascade")
            .field("name", &self.name)
            .field("rules", &self.rule_ids())
            .finish()
    }
}

impl Cascade {
    /// The first rule whose predicate holds, if any.
    pub fn matching_rule(&self, ctx: &ClassificationContext) -> Option<&'static Rule> {
        self.rules.iter().find(|rule| (rule.applies)(ctx))
    }

    /// Run the cascade.
    pub fn diagnose(&self, ctx: &ClassificationContext) -> DiagnosticBundle {
        match self.matching_rule(ctx) {
            Some(rule) => (rule.diagnose)(ctx),
            None => (self.fallback)(ctx),
        }
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id).collect()
    }
}

/// Identifier reported when no rule fired.
pub const FALLBACK_RULE_ID: &str = "fallback";

/// The cascade that handles `topic`.
pub fn cascade_for(topic: Topic) -> &'static Cascade {
    match topic {
        Topic::Derivatives => &derivatives::CASCADE,
        Topic::Integrals => &integrals::CASCADE,
        Topic::Limits => &limits::CASCADE,
        Topic::CriticalPoints => &critical_points::CASCADE,
        Topic::General | Topic::Personalized | Topic::Unknown => &generic::CASCADE,
    }
}

/// Id of the rule that would produce the diagnosis for `ctx`.
pub fn matched_rule_id(ctx: &ClassificationContext) -> &'static str {
    cascade_for(ctx.topic)
        .matching_rule(ctx)
        .map(|r| r.id)
        .unwrap_or(FALLBACK_RULE_ID)
}

/// Classify an answer whose correctness has already been decided.
pub fn classify(ctx: &ClassificationContext, is_correct: bool) -> Diagnosis {
    if is_correct {
        return Diagnosis::Correct {
            success_reason: success_reason(ctx.topic).to_string(),
        };
    }
    Diagnosis::Incorrect(cascade_for(ctx.topic).diagnose(ctx))
}

/// Praise for a correct answer; depends only on the topic.
pub fn success_reason(topic: Topic) -> &'static str {
    match topic {
        Topic::Derivatives => {
            "You identified the kind of function correctly and applied the matching differentiation rule."
        }
        Topic::Integrals => {
            "You picked the right integration technique and remembered the constant of integration +C."
        }
        Topic::Limits => {
            "You recognized the type of limit and used the method that resolves it."
        }
        Topic::CriticalPoints => {
            "You differentiated correctly and solved f'(x) = 0 completely."
        }
        _ => "You applied the right rule and carried out the computation accurately.",
    }
}
