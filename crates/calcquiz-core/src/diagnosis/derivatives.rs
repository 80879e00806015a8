//! Derivative diagnoses.

use super::patterns::{has_explicit_power, is_composite, is_polynomial, is_trigonometric};
use super::{Cascade, ClassificationContext, DiagnosticBundle, Rule};

pub(super) static CASCADE: Cascade = Cascade {
    name: "derivatives",
    rules: &[
        Rule {
            id: "zero-answer",
            applies: answered_zero,
            diagnose: zero_answer,
        },
        Rule {
            id: "power-rule",
            applies: misapplied_power_rule,
            diagnose: power_rule,
        },
        Rule {
            id: "trig-sign",
            applies: mentions_trig,
            diagnose: trig_sign,
        },
        Rule {
            id: "chain-rule",
            applies: composite_question,
            diagnose: chain_rule,
        },
    ],
    fallback,
};

fn answered_zero(ctx: &ClassificationContext) -> bool {
    ctx.user_answer.contains('0')
}

fn mentions_trig(ctx: &ClassificationContext) -> bool {
    is_trigonometric(ctx.question_text)
}

fn composite_question(ctx: &ClassificationContext) -> bool {
    is_composite(ctx.question_text)
}

fn misapplied_power_rule(ctx: &ClassificationContext) -> bool {
    is_polynomial(ctx.question_text)
        && has_explicit_power(ctx.user_answer)
        && !ctx.user_answer.contains(ctx.correct_answer)
}

fn zero_answer(ctx: &ClassificationContext) -> DiagnosticBundle {
    let (method, steps) = if is_polynomial(ctx.question_text) {
        (
            "Use the power rule: (x^n)' = n·x^(n-1).",
            "1. Find the exponent of x\n2. Bring the exponent down as a coefficient\n3. Lower the exponent by 1",
        )
    } else if is_trigonometric(ctx.question_text) {
        (
            "Use the trigonometric derivatives.",
            "1. Identify the trigonometric function\n2. Apply (sin x)' = cos x and (cos x)' = -sin x",
        )
    } else {
        (
            "Identify the kind of function and apply the rule that fits it.",
            "1. Identify the kind of function\n2. Apply the matching differentiation rule",
        )
    };

    DiagnosticBundle {
        why_wrong: "A derivative is 0 only for a constant. Any expression that still depends on x has a non-zero derivative.".into(),
        correct_method: method.into(),
        step_by_step: steps.into(),
        key_insight: "Only numbers such as 5, -3 or π have derivative 0. Once x is involved, the function changes and so does its derivative.".into(),
        common_mistake: "Treating every derivative as 0, or mixing up differentiation with integration.".into(),
        how_to_avoid: "Ask first: does the expression contain x? If it does, the answer cannot be 0.".into(),
        practice_tip: "Drill the basic functions x, x², x³, sin x, cos x and e^x until their derivatives are automatic.".into(),
        memory_aid: "A derivative measures change. If there is an x, something changes.".into(),
    }
}

fn power_rule(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The exponent was not lowered by 1, or it was not brought down as the coefficient.".into(),
        correct_method: "Power rule: (x^n)' = n·x^(n-1). Bring n down in front, then write n-1 as the new exponent.".into(),
        step_by_step: "Example: (x³)' = 3·x^(3-1) = 3x²\n1. Original exponent: 3\n2. New coefficient: 3\n3. New exponent: 3-1 = 2\n4. Result: 3x²".into(),
        key_insight: "The power rule has two moves: the exponent becomes a factor, and the exponent drops by one.".into(),
        common_mistake: "Doing only one of the two moves.".into(),
        how_to_avoid: "Always perform both steps in order: bring the exponent down, then subtract 1.".into(),
        practice_tip: "Repeat with x², x³ and x⁴ until the two moves happen without thinking.".into(),
        memory_aid: "Down in front, then one less.".into(),
    }
}

fn trig_sign(ctx: &ClassificationContext) -> DiagnosticBundle {
    let q = ctx.question_text;
    let wrong_sign = (q.contains("cos") && !ctx.user_answer.contains('-'))
        || (q.contains("sin") && ctx.user_answer.contains('-') && !q.contains("cos"));

    let why_wrong = if wrong_sign {
        "The sign is off: the derivative of cos carries a minus, the derivative of sin does not."
    } else {
        "The trigonometric derivative rule was not applied correctly."
    };
    let steps = if q.contains("sin") {
        "Derivative of sin x:\n1. Identify: sin x\n2. Differentiate: cos x\n3. Result: cos x"
    } else {
        "Derivative of cos x:\n1. Identify: cos x\n2. Differentiate: -sin x (note the minus)\n3. Result: -sin x"
    };

    DiagnosticBundle {
        why_wrong: why_wrong.into(),
        correct_method: "Trigonometric derivatives: (sin x)' = cos x, (cos x)' = -sin x, (tan x)' = sec²x.".into(),
        step_by_step: steps.into(),
        key_insight: "Differentiating cos always introduces a minus; differentiating sin never does.".into(),
        common_mistake: "Swapping the derivatives of sin and cos, or dropping the minus on cos.".into(),
        how_to_avoid: "Say it out loud: cos goes down with a minus, sin goes up without one.".into(),
        practice_tip: "Write (sin x)' = cos x and (cos x)' = -sin x twenty times.".into(),
        memory_aid: "Cos dives: it comes out negative.".into(),
    }
}

fn chain_rule(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The chain rule was skipped or applied incorrectly.".into(),
        correct_method: "Chain rule: if f(x) = g(h(x)) then f'(x) = g'(h(x)) · h'(x).".into(),
        step_by_step: "1. Separate the outer and the inner function\n2. Differentiate the outer one, keeping the inner one inside\n3. Differentiate the inner one\n4. Multiply the two".into(),
        key_insight: "Chain rule = derivative of the outside times derivative of the inside.".into(),
        common_mistake: "Forgetting to multiply by the inner derivative, or confusing which function is inside.".into(),
        how_to_avoid: "Name the inside and the outside before differentiating anything.".into(),
        practice_tip: "Practice on sin(2x), (x+1)² and e^(3x).".into(),
        memory_aid: "Outside, then times the inside's derivative.".into(),
    }
}

fn fallback(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The differentiation rules for this kind of function were not applied correctly.".into(),
        correct_method: "Classify the function (polynomial, trigonometric, exponential) and apply its rule.".into(),
        step_by_step: "1. Classify the function\n2. Choose the matching rule\n3. Apply it carefully\n4. Check the result".into(),
        key_insight: "Each family of functions has its own rule, so classifying correctly comes first.".into(),
        common_mistake: "Applying the wrong rule or mixing rules together.".into(),
        how_to_avoid: "Get fast at recognizing the function family before you start computing.".into(),
        practice_tip: "Build a table of all derivative rules and drill quick recognition.".into(),
        memory_aid: "Recognize it right, solve it right.".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::{matched_rule_id, ClassificationContext};
    use super::*;
    use crate::model::{Difficulty, Topic};

    fn ctx<'a>(question: &'a str, answer: &'a str, correct: &'a str) -> ClassificationContext<'a> {
        ClassificationContext {
            question_text: question,
            user_answer: answer,
            correct_answer: correct,
            topic: Topic::Derivatives,
            difficulty: Difficulty::Medium,
        }
    }

    #[test]
    fn zero_answer_wins_over_trig() {
        // satisfies zero-answer and trig-sign
        let c = ctx("f(x) = cos(x)", "\\( 0 \\)", "\\( -\\sin(x) \\)");
        assert_eq!(matched_rule_id(&c), "zero-answer");
    }

    #[test]
    fn zero_answer_tailors_method_to_question() {
        let poly = CASCADE.diagnose(&ctx("x^3", "0", "3x^2"));
        assert!(poly.correct_method.contains("power rule"));

        // no x anywhere, but trigonometric
        let trig = CASCADE.diagnose(&ctx("sin t", "0", "cos t"));
        assert!(trig.correct_method.contains("trigonometric"));

        let other = CASCADE.diagnose(&ctx("e^t", "0", "e^t"));
        assert!(other.correct_method.contains("Identify"));
    }

    #[test]
    fn power_rule_wins_over_trig() {
        let c = ctx("x^2 sin x", "x^3 cos x", "2x sin x + x^2 cos x");
        assert_eq!(matched_rule_id(&c), "power-rule");
    }

    #[test]
    fn power_rule_skipped_when_answer_contains_correct() {
        // answer embeds the correct text, so the power-rule check fails and trig wins
        let c = ctx("x^2 + sin x", "2x + cos x + x^2", "2x + cos x");
        assert_eq!(matched_rule_id(&c), "trig-sign");
    }

    #[test]
    fn trig_wins_over_chain_rule() {
        let c = ctx("sin(2x)", "cos(2x)", "2cos(2x)");
        assert_eq!(matched_rule_id(&c), "trig-sign");
    }

    #[test]
    fn trig_sign_variants() {
        let missing_minus = CASCADE.diagnose(&ctx("cos x", "sin x", "-sin x"));
        assert!(missing_minus.why_wrong.contains("sign"));
        assert!(missing_minus.step_by_step.contains("cos x"));

        let wrong_rule = CASCADE.diagnose(&ctx("sin x", "cos x + 1", "cos x"));
        assert!(wrong_rule.why_wrong.contains("not applied"));
        assert!(wrong_rule.step_by_step.starts_with("Derivative of sin"));
    }

    #[test]
    fn chain_rule_for_composites() {
        let c = ctx("(x+1)^3", "3(x+1)", "3(x+1)^2");
        // no '0', answer has no x^, not trigonometric
        assert_eq!(matched_rule_id(&c), "chain-rule");
    }

    #[test]
    fn fallback_when_nothing_matches() {
        let c = ctx("e^x", "x e^x", "e^x");
        assert_eq!(matched_rule_id(&c), "fallback");
        assert!(CASCADE.diagnose(&c).why_wrong.contains("differentiation rules"));
    }
}
