//! End-to-end session tests: load a payload through a question source, play
//! it through the controller and check the final score.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use calcquiz_core::diagnosis::Diagnosis;
use calcquiz_core::error::LoadError;
use calcquiz_core::model::{Difficulty, Question, QuestionSet, Topic};
use calcquiz_core::score::Grade;
use calcquiz_core::session::{AnswerOutcome, SessionController, SessionState, Step};
use calcquiz_core::traits::QuestionSource;

struct FixedBody(&'static str);

#[async_trait]
impl QuestionSource for FixedBody {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch(&self, _location: &str) -> Result<String, LoadError> {
        Ok(self.0.to_string())
    }
}

const THREE_VALID_ONE_BROKEN: &str = r#"{
    "questions": [
        {"id": 1, "question": "\\( \\frac{d}{dx} x^3 \\)", "options": ["\\( 3x^2 \\)", "\\( x^2 \\)", "\\( 0 \\)"], "correct": "\\( 3x^2 \\)"},
        {"id": 2, "question": "\\( \\frac{d}{dx} \\cos(x) \\)", "options": ["\\( \\sin(x) \\)", "\\( -\\sin(x) \\)"], "correct": "\\( -\\sin(x) \\)"},
        {"id": 3, "question": "", "options": ["a"], "correct": "a"},
        {"id": 4, "question": "\\( \\frac{d}{dx} e^{2x} \\)", "options": ["\\( e^{2x} \\)", "\\( 2e^{2x} \\)"], "correct": "\\( 2e^{2x} \\)"}
    ],
    "quiz_info": {"explanation": "Basic derivatives", "quiz_type": "general"}
}"#;

fn play_all(controller: &mut SessionController, pick: impl Fn(&Question) -> usize) -> Step {
    loop {
        let question = controller.current_question().expect("question").clone();
        match controller.answer(pick(&question)) {
            AnswerOutcome::Feedback(_) => {}
            other => panic!("unexpected outcome {other:?}"),
        }
        match controller.advance() {
            Step::Presenting(_) => continue,
            step => return step,
        }
    }
}

#[tokio::test]
async fn malformed_entry_is_dropped_and_all_correct_completes() {
    let source = FixedBody(THREE_VALID_ONE_BROKEN);
    let mut controller =
        SessionController::load(&source, "http://localhost:5000/api/questions/derivatives/easy")
            .await
            .unwrap();

    assert_eq!(controller.session().questions.len(), 3);
    assert_eq!(controller.session().topic, Topic::Derivatives);
    assert_eq!(controller.session().difficulty, Difficulty::Easy);
    assert_eq!(
        controller.session().description.as_deref(),
        Some("Basic derivatives")
    );

    let step = play_all(&mut controller, |q| q.correct_option_index().unwrap());
    let report = match step {
        Step::Complete(report) => report,
        other => panic!("expected completion, got {other:?}"),
    };
    assert_eq!(report.correct, 3);
    assert_eq!(report.total, 3);
    assert_eq!(report.percentage, 100);
    assert_eq!(report.grade, Grade::Outstanding);
    assert_eq!(controller.state(), SessionState::Complete);
}

#[tokio::test]
async fn error_payload_fails_the_load() {
    let source = FixedBody(r#"{"error": "x"}"#);
    let err = SessionController::load(&source, "/api/questions/limits/hard")
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Source(ref m) if m == "x"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn all_wrong_gets_tips_and_diagnoses() {
    let source = FixedBody(THREE_VALID_ONE_BROKEN);
    let mut controller = SessionController::load(&source, "/api/questions/derivatives/basic")
        .await
        .unwrap();

    let mut diagnoses = Vec::new();
    loop {
        let question = controller.current_question().unwrap().clone();
        let wrong = (0..question.options.len())
            .find(|i| Some(*i) != question.correct_option_index())
            .unwrap();
        if let AnswerOutcome::Feedback(fb) = controller.answer(wrong) {
            diagnoses.push(fb.diagnosis);
        }
        if let Step::Complete(report) = controller.advance() {
            assert_eq!(report.percentage, 0);
            assert_eq!(report.grade, Grade::NeedsImprovement);
            assert_eq!(report.tips.len(), 3);
            break;
        }
    }

    assert_eq!(diagnoses.len(), 3);
    assert!(diagnoses.iter().all(|d| matches!(d, Diagnosis::Incorrect(_))));
}

fn synthetic_set(total: usize) -> QuestionSet {
    let questions = (0..total)
        .map(|i| {
            Question::new(
                format!("q{i}"),
                vec!["right".to_string(), "wrong".to_string()],
                "right",
            )
        })
        .collect();
    QuestionSet {
        questions,
        info: None,
        topic: Topic::Integrals,
        difficulty: Difficulty::Medium,
        dropped: 0,
    }
}

fn score_of(total: usize, correct: usize) -> calcquiz_core::score::ScoreReport {
    let start = Utc::now();
    let mut controller = SessionController::from_question_set(synthetic_set(total))
        .unwrap()
        .with_started_at(start);
    let mut answered = 0;
    loop {
        let pick = if answered < correct { 0 } else { 1 };
        controller.answer(pick);
        answered += 1;
        match controller.advance_at(start + Duration::seconds(75)) {
            Step::Presenting(_) => {}
            Step::Complete(report) => return report,
            Step::Ignored => panic!("advance ignored"),
        }
    }
}

#[test]
fn score_scenarios() {
    let report = score_of(20, 19);
    assert_eq!(report.percentage, 95);
    assert_eq!(report.grade, Grade::Outstanding);
    assert!(report.tips.is_empty());

    let report = score_of(20, 14);
    assert_eq!(report.percentage, 70);
    assert_eq!(report.grade, Grade::Good);
    assert!(report.tips.is_empty());

    let report = score_of(5, 0);
    assert_eq!(report.percentage, 0);
    assert_eq!(report.grade, Grade::NeedsImprovement);
    assert_eq!(report.tips.len(), 3);
    assert_eq!(report.elapsed_secs, Some(75));
}

#[test]
fn save_request_matches_wire_shape() {
    let report = score_of(5, 3);
    let json = serde_json::to_value(report.to_save_request()).unwrap();
    assert_eq!(json["topic"], "integrals");
    assert_eq!(json["score"], 3);
    assert_eq!(json["total_questions"], 5);
    assert_eq!(json["details"]["percentage"], 60);
    assert_eq!(json["details"]["difficulty"], "medium");
}
