//! Catch-all for mixed and unrecognized topics.

use super::{Cascade, ClassificationContext, DiagnosticBundle};

pub(super) static CASCADE: Cascade = Cascade {
    name: "generic",
    rules: &[],
    fallback,
};

fn fallback(_ctx: &ClassificationContext) -> DiagnosticBundle {
    DiagnosticBundle {
        why_wrong: "The answer does not match. A step in the computation went wrong.".into(),
        correct_method: "Identify the kind of problem, then choose the matching method.".into(),
        step_by_step: "1. Read the question carefully\n2. Identify what is asked\n3. Choose a method\n4. Compute\n5. Check the result".into(),
        key_insight: "Every kind of problem has a method that fits it.".into(),
        common_mistake: "Rushing, or skipping the check at the end.".into(),
        how_to_avoid: "Slow down and verify every step.".into(),
        practice_tip: "Solve more problems of this kind.".into(),
        memory_aid: "Slow and careful beats fast and wrong.".into(),
    }
}
