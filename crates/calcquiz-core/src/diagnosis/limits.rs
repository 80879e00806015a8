//! Limit diagnoses.

use super::patterns::{is_trigonometric, mentions_infinity};
use super::{Cascade, ClassificationContext, DiagnosticBundle, Rule};
use crate::model::Difficulty;

pub(super) static CASCADE: Cascade = Cascade {
    name: "limits",
    rules: &[
        Rule {
            id: "naive-zero",
            applies: naive_zero,
            diagnose: direct_substitution,
        },
        Rule {
            id: "infinity-form",
            applies: limit_at_infinity,
            diagnose: dominant_terms,
        },
        Rule {
            id: "trig-limit",
            applies: trigonometric_limit,
            diagnose: special_trig_limit,
        },
        Rule {
            id: "spurious-infinity",
            applies: spurious_infinity,
            diagnose: not_always_infinite,
        },
    ],
    fallback,
};

/// On easy sets every limit is solved by direct substitution.
fn naive_zero(ctx: &ClassificationContext) -> bool {
    ctx.difficulty == Difficulty::Easy && ctx.user_answer == "0" && ctx.correct_answer != "0"
}

fn limit_at_infinity(ctx: &ClassificationContext) -> bool {
    mentions_infinity(ctx.question_text)
}

fn trigonometric_limit(ctx: &ClassificationContext) -> bool {
    is_trigonometric(ctx.question_text)
}

fn spurious_infinity(ctx: &ClassificationContext) -> bool {
    ctx.user_answer == "∞" && ctx.correct_answer != "∞"
}

fn direct_substitution(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "With direct substitution you plug in the value x approaches, not 0.".into(),
        correct_method: "For a simple limit, replace x with the value it approaches and evaluate.".into(),
        step_by_step: "Example: lim(x→2) x²+1\n1. Substitute x = 2: 2²+1\n2. Compute: 4+1\n3. Result: 5".into(),
        key_insight: "If the function is continuous at the point, the limit equals the function's value there.".into(),
        common_mistake: "Assuming every limit is 0, or substituting the wrong value.".into(),
        how_to_avoid: "Check whether the function is defined at the point; if it is, substitute directly.".into(),
        practice_tip: "Practice direct substitution on x+1, x²-3 and 2x+5.".into(),
        memory_aid: "Continuous means substitute.".into(),
    }
}

fn dominant_terms(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "For a limit at infinity the highest powers in the numerator and denominator decide the answer, and they were not isolated.".into(),
        correct_method: "Divide numerator and denominator by the highest power of x.".into(),
        step_by_step: "Example: lim(x→∞) (2x²+1)/(x²+3)\n1. Highest power: x²\n2. Divide through by x²: (2+1/x²)/(1+3/x²)\n3. As x→∞: (2+0)/(1+0) = 2".into(),
        key_insight: "At infinity only the leading terms matter; everything else vanishes.".into(),
        common_mistake: "Missing the highest power, or dividing only part of the expression.".into(),
        how_to_avoid: "Identify the leading power of the numerator and the denominator before anything else.".into(),
        practice_tip: "Work simple rational functions and watch how the degrees decide the result.".into(),
        memory_aid: "At infinity, the biggest power wins.".into(),
    }
}

fn special_trig_limit(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The standard trigonometric limits were not used, or the substitution was wrong.".into(),
        correct_method: "The key limit is lim(x→0) sin(x)/x = 1; related limits follow from it.".into(),
        step_by_step: "For sin(x)/x:\n1. Recognize the form sin(u)/u\n2. Apply the standard limit\n3. Handle any coefficients separately".into(),
        key_insight: "sin(x)/x → 1 is one of the foundational limits of calculus.".into(),
        common_mistake: "Substituting 0 directly instead of using the standard limit.".into(),
        how_to_avoid: "Memorize the standard trigonometric limits and learn to spot their shape.".into(),
        practice_tip: "Learn by heart: lim(x→0) sin(x)/x = 1 and lim(x→0) (1-cos x)/x² = 1/2.".into(),
        memory_aid: "Sine over its argument near zero is one.".into(),
    }
}

fn not_always_infinite(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "Not every limit that involves infinity is infinite; it has to be checked.".into(),
        correct_method: "Compare the degrees of numerator and denominator, or resolve the indeterminate form.".into(),
        step_by_step: "1. Check for an indeterminate form\n2. If there is one, resolve it\n3. Otherwise compare degrees\n4. Compute the result".into(),
        key_insight: "A limit can be a finite number, infinite, or not exist at all.".into(),
        common_mistake: "Assuming a limit at infinity must be infinite.".into(),
        how_to_avoid: "Carry out the full computation instead of guessing from intuition.".into(),
        practice_tip: "Practice limits whose answers are 0, a finite number, and infinity.".into(),
        memory_aid: "A limit is a result, not a hunch.".into(),
    }
}

fn fallback(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The type of limit was misidentified, or the method does not fit it.".into(),
        correct_method: "Decide first whether it is direct substitution, an indeterminate form, or a limit at infinity.".into(),
        step_by_step: "1. Try direct substitution\n2. If you get 0/0 or ∞/∞, resolve the indeterminate form\n3. At infinity, divide by the highest power\n4. Compute the result".into(),
        key_insight: "Each kind of limit needs its own approach.".into(),
        common_mistake: "Using one technique for every limit.".into(),
        how_to_avoid: "Practice classifying limits quickly before solving them.".into(),
        practice_tip: "Keep a list of limit types next to the method that solves each one.".into(),
        memory_aid: "Right type, right method, right answer.".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::matched_rule_id;
    use super::*;
    use crate::model::Topic;

    fn ctx<'a>(
        difficulty: Difficulty,
        question: &'a str,
        answer: &'a str,
        correct: &'a str,
    ) -> ClassificationContext<'a> {
        ClassificationContext {
            question_text: question,
            user_answer: answer,
            correct_answer: correct,
            topic: Topic::Limits,
            difficulty,
        }
    }

    #[test]
    fn naive_zero_wins_over_infinity() {
        let c = ctx(Difficulty::Easy, "lim(x→∞) (2x²+1)/(x²+3)", "0", "2");
        assert_eq!(matched_rule_id(&c), "naive-zero");
    }

    #[test]
    fn naive_zero_requires_easy_difficulty() {
        let c = ctx(Difficulty::Hard, "lim(x→∞) (2x²+1)/(x²+3)", "0", "2");
        assert_eq!(matched_rule_id(&c), "infinity-form");
    }

    #[test]
    fn naive_zero_requires_exact_zero() {
        let c = ctx(Difficulty::Easy, "lim(x→2) x+1", "\\( 0 \\)", "3");
        assert_eq!(matched_rule_id(&c), "fallback");
    }

    #[test]
    fn infinity_wins_over_trig() {
        let c = ctx(Difficulty::Medium, "\\lim_{x \\to \\infty} \\sin(x)/x", "1", "0");
        assert_eq!(matched_rule_id(&c), "infinity-form");
    }

    #[test]
    fn trig_wins_over_spurious_infinity() {
        let c = ctx(Difficulty::Medium, "lim(x→0) sin(3x)/x", "∞", "3");
        assert_eq!(matched_rule_id(&c), "trig-limit");
    }

    #[test]
    fn spurious_infinity() {
        let c = ctx(Difficulty::Medium, "lim(x→1) (x²-1)/(x-1)", "∞", "2");
        assert_eq!(matched_rule_id(&c), "spurious-infinity");
        assert!(CASCADE.diagnose(&c).common_mistake.contains("infinite"));
    }
}
