//! Critical point diagnoses.

use super::{Cascade, ClassificationContext, DiagnosticBundle, Rule};

/// Option texts that mean "there are no critical points". The Hebrew form is
/// what the upstream question bank serves.
pub const NO_POINTS_SENTINELS: [&str; 2] = ["No critical points", "אין נקודות קיצון"];

pub(super) static CASCADE: Cascade = Cascade {
    name: "criticalpoints",
    rules: &[
        Rule {
            id: "no-points",
            applies: claimed_no_points,
            diagnose: no_points,
        },
        Rule {
            id: "partial-roots",
            applies: only_zero_root,
            diagnose: partial_roots,
        },
        Rule {
            id: "wrong-roots",
            applies: wrong_roots_listed,
            diagnose: wrong_roots,
        },
    ],
    fallback,
};

fn is_no_points(answer: &str) -> bool {
    NO_POINTS_SENTINELS.contains(&answer)
}

fn claimed_no_points(ctx: &ClassificationContext) -> bool {
    is_no_points(ctx.user_answer) && !is_no_points(ctx.correct_answer)
}

fn only_zero_root(ctx: &ClassificationContext) -> bool {
    ctx.user_answer == "x = 0" && !ctx.correct_answer.contains('0')
}

fn wrong_roots_listed(ctx: &ClassificationContext) -> bool {
    ctx.user_answer.contains("x =")
        && ctx.correct_answer.contains("x =")
        && ctx.user_answer != ctx.correct_answer
}

fn no_points(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "This function does have critical points; the equation f'(x) = 0 was not solved.".into(),
        correct_method: "Differentiate, set the derivative to 0 and solve for x.".into(),
        step_by_step: "1. Compute f'(x)\n2. Write the equation f'(x) = 0\n3. Solve it\n4. Check which solutions lie in the domain".into(),
        key_insight: "Most polynomials of degree 2 or higher have critical points.".into(),
        common_mistake: "Concluding too early that there are none, or skipping the derivative.".into(),
        how_to_avoid: "Always carry out f'(x) = 0 in full before deciding there are no solutions.".into(),
        practice_tip: "Find the critical points of x²-4x+3, x³-3x and x⁴-2x².".into(),
        memory_aid: "Derivative to zero, then look for the points.".into(),
    }
}

fn partial_roots(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "x = 0 is not necessarily a critical point; f'(x) = 0 has to be solved properly.".into(),
        correct_method: "Set the derivative to 0 and solve the equation completely.".into(),
        step_by_step: "Example: f(x) = x²-4x\n1. f'(x) = 2x-4\n2. 2x-4 = 0\n3. 2x = 4\n4. x = 2".into(),
        key_insight: "Critical points are where the derivative is 0, not where x is 0.".into(),
        common_mistake: "Assuming x = 0 is always a critical point.".into(),
        how_to_avoid: "Solve the equation f'(x) = 0 instead of guessing.".into(),
        practice_tip: "Practice solving linear and quadratic equations.".into(),
        memory_aid: "The derivative is zero, x is not.".into(),
    }
}

fn wrong_roots(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The equation f'(x) = 0 was solved incorrectly, or the derivative itself is wrong.".into(),
        correct_method: "Recheck the derivative, then solve f'(x) = 0 again carefully.".into(),
        step_by_step: "1. Check the derivative\n2. Set up the equation f'(x) = 0\n3. Solve step by step\n4. Substitute the solutions back to check".into(),
        key_insight: "An error in the derivative carries through to every critical point.".into(),
        common_mistake: "Arithmetic slips while solving the equation.".into(),
        how_to_avoid: "Plug each solution back into f'(x) to confirm it gives 0.".into(),
        practice_tip: "After every solution, verify it by substitution.".into(),
        memory_aid: "Check the derivative, check the solution.".into(),
    }
}

fn fallback(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "There is a mistake in finding the critical points.".into(),
        correct_method: "Differentiate, set f'(x) = 0, solve, and check the solutions.".into(),
        step_by_step: "1. f'(x)\n2. f'(x) = 0\n3. Solve for x\n4. Check the results".into(),
        key_insight: "Critical points are exactly where the derivative equals 0.".into(),
        common_mistake: "Differentiation errors or mistakes while solving the equation.".into(),
        how_to_avoid: "Work in order and check every step.".into(),
        practice_tip: "Practice finding critical points of many different functions.".into(),
        memory_aid: "Differentiate, zero, solve, check.".into(),
    }
}
