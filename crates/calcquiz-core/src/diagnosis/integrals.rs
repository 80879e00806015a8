//! Integral diagnoses.

use super::patterns::{has_coefficient, has_explicit_power, is_polynomial, is_trigonometric};
use super::{Cascade, ClassificationContext, DiagnosticBundle, Rule};

pub(super) static CASCADE: Cascade = Cascade {
    name: "integrals",
    rules: &[
        Rule {
            id: "missing-constant",
            applies: missing_constant,
            diagnose: constant_of_integration,
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
            id: "coefficient",
            applies: coefficient_question,
            diagnose: coefficient,
        },
    ],
    fallback,
};

fn missing_constant(ctx: &ClassificationContext) -> bool {
    !ctx.user_answer.contains('C') && ctx.correct_answer.contains('C')
}

fn misapplied_power_rule(ctx: &ClassificationContext) -> bool {
    is_polynomial(ctx.question_text) && has_explicit_power(ctx.user_answer)
}

fn mentions_trig(ctx: &ClassificationContext) -> bool {
    is_trigonometric(ctx.question_text)
}

fn coefficient_question(ctx: &ClassificationContext) -> bool {
    has_coefficient(ctx.question_text)
}

fn constant_of_integration(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The constant of integration +C is missing. An indefinite integral always needs it.".into(),
        correct_method: "An indefinite integral describes a whole family of functions, so it always ends with +C.".into(),
        step_by_step: "1. Compute the antiderivative\n2. Append +C\n3. Write the final result including C".into(),
        key_insight: "C stands for every possible constant, because the derivative of any constant is 0.".into(),
        common_mistake: "Leaving C out as if it were cosmetic; it is part of the definition.".into(),
        how_to_avoid: "Write +C immediately after finishing any indefinite integral.".into(),
        practice_tip: "Add +C to every integral you solve until it becomes a habit.".into(),
        memory_aid: "An integral without C is a sentence without a full stop.".into(),
    }
}

fn power_rule(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The power rule for integrals was misapplied: the exponent was not raised by 1, or the result was not divided by the new exponent.".into(),
        correct_method: "Power rule for integrals: ∫x^n dx = x^(n+1)/(n+1) + C.".into(),
        step_by_step: "Example: ∫x² dx\n1. Original exponent: 2\n2. Add 1: 2+1 = 3\n3. Divide by the new exponent: x³/3\n4. Add C: x³/3 + C".into(),
        key_insight: "Integration raises the exponent by one (the reverse of differentiation) and divides by the new exponent.".into(),
        common_mistake: "Forgetting the division, or adding 1 to the base instead of the exponent.".into(),
        how_to_avoid: "Raise the exponent first, then divide by it. Always in that order.".into(),
        practice_tip: "Drill x, x², x³ and x⁴: x² becomes x³/3, x³ becomes x⁴/4.".into(),
        memory_aid: "Up by one, then divide by it.".into(),
    }
}

fn trig_sign(ctx: &ClassificationContext) -> DiagnosticBundle {
    let q = ctx.question_text;
    let wrong_sign = (q.contains("sin") && ctx.user_answer.contains("sin"))
        || (q.contains("cos")
            && !ctx.user_answer.contains('-')
            && ctx.correct_answer.contains('-'));

    let why_wrong = if wrong_sign {
        "The sign of the trigonometric antiderivative is wrong."
    } else {
        "The trigonometric integration rule was not applied correctly."
    };
    let steps = if q.contains("sin") {
        "∫sin x dx:\n1. Identify: sin x\n2. Antiderivative: -cos x\n3. Add C: -cos x + C"
    } else {
        "∫cos x dx:\n1. Identify: cos x\n2. Antiderivative: sin x\n3. Add C: sin x + C"
    };

    DiagnosticBundle {
        why_wrong: why_wrong.into(),
        correct_method: "Trigonometric integrals: ∫sin x dx = -cos x + C, ∫cos x dx = sin x + C.".into(),
        step_by_step: steps.into(),
        key_insight: "Integrating sin produces a minus; integrating cos does not.".into(),
        common_mistake: "Swapping the integrals of sin and cos, or dropping the minus for sin.".into(),
        how_to_avoid: "Remember the pairs: sin to -cos, cos to sin.".into(),
        practice_tip: "Write ∫sin x dx = -cos x + C and ∫cos x dx = sin x + C twenty times.".into(),
        memory_aid: "Sin is the troublemaker: it brings the minus.".into(),
    }
}

fn coefficient(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The inner coefficient was not handled; it calls for a substitution or a division by that coefficient.".into(),
        correct_method: "When the argument has a coefficient (2x, 3x), substitute u for the inner expression or divide the result by the coefficient.".into(),
        step_by_step: "Example: ∫sin(2x) dx\nMethod 1: u = 2x, du = 2 dx\nMethod 2: divide the antiderivative by 2\nResult: -cos(2x)/2 + C".into(),
        key_insight: "A coefficient inside the function ends up dividing the result.".into(),
        common_mistake: "Ignoring the coefficient altogether.".into(),
        how_to_avoid: "Spot coefficients first and account for them separately.".into(),
        practice_tip: "Practice substitution on ∫sin(2x) dx and ∫(3x+1)² dx.".into(),
        memory_aid: "Coefficient inside, division outside.".into(),
    }
}

fn fallback(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The integration rules were not applied correctly, or the method does not suit this integrand.".into(),
        correct_method: "Classify the integrand and pick the method: power rule, substitution, or integration by parts.".into(),
        step_by_step: "1. Classify the integrand\n2. Choose a method\n3. Apply it carefully\n4. Add +C\n5. Check by differentiating".into(),
        key_insight: "Integration reverses differentiation, so every result can be checked.".into(),
        common_mistake: "Choosing the wrong method or skipping steps.".into(),
        how_to_avoid: "Differentiate your answer: it should give back the original integrand.".into(),
        practice_tip: "Work through the basic integrals and the main techniques one by one.".into(),
        memory_aid: "Integrate, then differentiate to check.".into(),
    }
}
