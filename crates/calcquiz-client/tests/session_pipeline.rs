//! Load -> answer -> score -> save, with the in-memory collaborators.

use std::collections::HashMap;
use std::sync::Arc;

use calcquiz_client::mock::{RecordingSink, StaticSource};
use calcquiz_client::save_in_background;
use calcquiz_core::diagnosis::{cascade_for, matched_rule_id, ClassificationContext};
use calcquiz_core::error::LoadError;
use calcquiz_core::model::{Difficulty, Topic};
use calcquiz_core::score::Grade;
use calcquiz_core::session::{AnswerOutcome, SessionController, Step};

const LIMITS: &str = r#"{
  "questions": [
    {"question": "lim(x→2) x+1", "options": ["3", "0", "∞"], "correct": "3"},
    {"question": "lim(x→0) sin(x)/x", "options": ["0", "1"], "correct": "1"},
    {"question": "lim(x→∞) 1/x", "options": ["0", "∞"], "correct": "0"},
    {"options": ["broken"]}
  ],
  "quiz_info": {"explanation": "Limits warm-up"}
}"#;

fn source() -> StaticSource {
    let mut bodies = HashMap::new();
    bodies.insert("limits".to_string(), LIMITS.to_string());
    StaticSource::new(bodies)
}

fn answer(controller: &mut SessionController, index: usize) -> bool {
    match controller.answer(index) {
        AnswerOutcome::Feedback(feedback) => feedback.is_correct,
        other => panic!("expected feedback, got {other:?}"),
    }
}

#[tokio::test]
async fn full_session_is_scored_and_saved() {
    let source = source();
    let mut controller = SessionController::load(&source, "/api/questions/limits/easy")
        .await
        .unwrap();

    assert_eq!(source.call_count(), 1);
    assert_eq!(
        source.last_location().as_deref(),
        Some("/api/questions/limits/easy")
    );
    let session = controller.session();
    assert_eq!(session.questions.len(), 3);
    assert_eq!(session.topic, Topic::Limits);
    assert_eq!(session.difficulty, Difficulty::Easy);
    assert_eq!(session.description.as_deref(), Some("Limits warm-up"));

    assert!(!answer(&mut controller, 1));
    assert_eq!(controller.advance(), Step::Presenting(1));
    assert!(answer(&mut controller, 1));
    assert_eq!(controller.advance(), Step::Presenting(2));
    assert!(answer(&mut controller, 0));
    let Step::Complete(report) = controller.advance() else {
        panic!("expected completion");
    };

    assert_eq!((report.correct, report.total), (2, 3));
    assert_eq!(report.percentage, 67);
    assert_eq!(report.grade, Grade::Passing);
    assert_eq!(report.tips.len(), 3);

    let sink = Arc::new(RecordingSink::new());
    save_in_background(sink.clone(), report.to_save_request())
        .await
        .unwrap();

    let saved = sink.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].topic, "limits");
    assert_eq!(saved[0].score, 2);
    assert_eq!(saved[0].total_questions, 3);
    assert_eq!(saved[0].details.percentage, 67);
    assert_eq!(saved[0].details.difficulty, "easy");
}

#[tokio::test]
async fn wrong_limit_answer_gets_limit_diagnosis() {
    let source = source();
    let mut controller = SessionController::load(&source, "/api/questions/limits/easy")
        .await
        .unwrap();

    let AnswerOutcome::Feedback(feedback) = controller.answer(1) else {
        panic!("expected feedback");
    };

    let ctx = ClassificationContext {
        question_text: "lim(x→2) x+1",
        user_answer: "0",
        correct_answer: "3",
        topic: Topic::Limits,
        difficulty: Difficulty::Easy,
    };
    assert_eq!(matched_rule_id(&ctx), "naive-zero");
    assert_eq!(
        feedback.diagnosis.bundle(),
        Some(&cascade_for(Topic::Limits).diagnose(&ctx))
    );
}

#[tokio::test]
async fn unknown_location_fails_to_load() {
    let source = source();
    let err = SessionController::load(&source, "/api/questions/integrals/easy")
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Http { status: 404, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn failing_sink_does_not_affect_report() {
    let source = StaticSource::with_fixed_body(LIMITS);
    let mut controller = SessionController::load(&source, "/api/questions/limits/hard")
        .await
        .unwrap();
    for index in [0, 1, 0] {
        answer(&mut controller, index);
        controller.advance();
    }
    let report = controller.report().cloned().unwrap();
    assert_eq!(report.percentage, 100);

    let sink = Arc::new(RecordingSink::failing());
    save_in_background(sink.clone(), report.to_save_request())
        .await
        .unwrap();
    assert_eq!(sink.call_count(), 1);
    assert!(sink.saved().is_empty());
    assert_eq!(controller.report(), Some(&report));
}
