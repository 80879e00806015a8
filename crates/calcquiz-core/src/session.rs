//! Session state machine.
//!
//! A [`SessionController`] owns one [`Session`] and moves it through
//! `Presenting(i) -> Feedback(i) -> Presenting(i + 1) ... -> Complete`.
//! Every transition takes `&mut self`; the controller never shares state
//! across sessions, and a reload simply builds a new controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::diagnosis::{classify, ClassificationContext, Diagnosis};
use crate::error::LoadError;
use crate::evaluator::MatchBreakdown;
use crate::model::{Difficulty, Question, QuestionSet, Topic};
use crate::parser::load_question_set;
use crate::score::ScoreReport;
use crate::traits::QuestionSource;

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum SessionState {
    /// Question `i` is shown and awaits an answer.
    Presenting(usize),
    /// Question `i` was answered and its feedback is shown.
    Feedback(usize),
    /// Every question was answered. Terminal.
    Complete,
}

/// The running quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub correct_count: usize,
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub started_at: DateTime<Utc>,
    /// Quiz description from the payload metadata.
    pub description: Option<String>,
    pub state: SessionState,
}

impl Session {
    /// Questions answered so far, counting one currently in feedback.
    pub fn answered(&self) -> usize {
        match self.state {
            SessionState::Presenting(i) => i,
            SessionState::Feedback(i) => i + 1,
            SessionState::Complete => self.questions.len(),
        }
    }

    pub fn wrong_count(&self) -> usize {
        self.answered() - self.correct_count
    }
}

/// Result of one answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub question_index: usize,
    pub is_correct: bool,
    pub selected_index: usize,
    pub selected_answer: String,
    pub correct_answer: String,
    pub diagnosis: Diagnosis,
    /// The question's own explanation, if it carried one.
    pub explanation: Option<String>,
    /// The next `advance` completes the quiz.
    pub is_last: bool,
}

impl Feedback {
    /// Text shown under a correct answer: the question's explanation when
    /// present, otherwise the topic's success reason.
    pub fn success_text(&self) -> Option<&str> {
        match &self.diagnosis {
            Diagnosis::Correct { success_reason } => {
                Some(self.explanation.as_deref().unwrap_or(success_reason))
            }
            Diagnosis::Incorrect(_) => None,
        }
    }

    /// Label for the control that moves past this feedback.
    pub fn continue_label(&self) -> &'static str {
        if self.is_last {
            "Finish"
        } else {
            "Next"
        }
    }
}

/// What `answer` did.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// The answer was evaluated; the session is now in feedback.
    Feedback(Box<Feedback>),
    /// The session was not presenting a question.
    Ignored,
    /// The index does not name an option of the current question.
    OutOfRange { index: usize, option_count: usize },
}

/// What `advance` did.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Question `i` is now presented.
    Presenting(usize),
    /// The quiz just finished. Produced exactly once per session.
    Complete(ScoreReport),
    /// Nothing to advance from.
    Ignored,
}

/// Question as a renderer needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub text: String,
    pub options: Vec<String>,
}

/// Everything a renderer shows around the current question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub state: SessionState,
    /// 1-based number of the current question.
    pub question_number: usize,
    pub total: usize,
    /// Fraction of questions already passed, in `0.0..=1.0`.
    pub progress: f64,
    pub correct: usize,
    pub wrong: usize,
    pub question: Option<QuestionView>,
    pub description: Option<String>,
}

/// Drives one [`Session`] from first question to score.
#[derive(Debug)]
pub struct SessionController {
    session: Session,
    report: Option<ScoreReport>,
}

impl SessionController {
    /// Fetch and parse a question set, then start a session over it.
    #[instrument(skip(source), fields(source = source.name()))]
    pub async fn load(source: &dyn QuestionSource, location: &str) -> Result<Self, LoadError> {
        let body = source.fetch(location).await?;
        let set = load_question_set(&body, location)?;
        Self::from_question_set(set)
    }

    /// Start a session over an already parsed set.
    pub fn from_question_set(set: QuestionSet) -> Result<Self, LoadError> {
        if set.questions.is_empty() {
            return Err(LoadError::NoValidQuestions {
                dropped: set.dropped,
            });
        }

        info!(
            topic = %set.topic,
            difficulty = %set.difficulty,
            questions = set.questions.len(),
            dropped = set.dropped,
            "question set loaded"
        );

        let description = set.info.and_then(|info| info.explanation);
        Ok(Self {
            session: Session {
                id: Uuid::new_v4(),
                questions: set.questions,
                current_index: 0,
                correct_count: 0,
                topic: set.topic,
                difficulty: set.difficulty,
                started_at: Utc::now(),
                description,
                state: SessionState::Presenting(0),
            },
            report: None,
        })
    }

    /// Replace the topic derived from the source location. Rules and tips
    /// follow the new topic.
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.session.topic = topic;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.session.difficulty = difficulty;
        self
    }

    /// Override the recorded start time.
    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.session.started_at = started_at;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn is_complete(&self) -> bool {
        self.session.state == SessionState::Complete
    }

    /// The score, once the session is complete.
    pub fn report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    /// The question being presented or reviewed.
    pub fn current_question(&self) -> Option<&Question> {
        match self.session.state {
            SessionState::Presenting(i) | SessionState::Feedback(i) => {
                self.session.questions.get(i)
            }
            SessionState::Complete => None,
        }
    }

    /// Answer the current question with the option at `selected_index`.
    pub fn answer(&mut self, selected_index: usize) -> AnswerOutcome {
        let selected_text = match self.current_question() {
            Some(q) if self.is_presenting() => match q.options.get(selected_index) {
                Some(text) => text.clone(),
                None => {
                    return AnswerOutcome::OutOfRange {
                        index: selected_index,
                        option_count: q.options.len(),
                    }
                }
            },
            _ => return AnswerOutcome::Ignored,
        };
        self.answer_text(selected_index, &selected_text)
    }

    /// Answer with an explicit option text, for renderers that re-supply
    /// what they displayed at `selected_index`.
    pub fn answer_text(&mut self, selected_index: usize, selected_text: &str) -> AnswerOutcome {
        let SessionState::Presenting(i) = self.session.state else {
            return AnswerOutcome::Ignored;
        };
        let total = self.session.questions.len();
        let question = &self.session.questions[i];
        if selected_index >= question.options.len() {
            return AnswerOutcome::OutOfRange {
                index: selected_index,
                option_count: question.options.len(),
            };
        }

        let breakdown = MatchBreakdown::compute(
            &question.options,
            selected_index,
            selected_text,
            &question.correct_answer,
        );
        if breakdown.positional_only() {
            warn!(
                question = i,
                selected = selected_text,
                correct = %question.correct_answer,
                "answer accepted by option position only"
            );
        }
        let is_correct = breakdown.is_correct();

        let ctx = ClassificationContext::new(
            question,
            selected_text,
            self.session.topic,
            self.session.difficulty,
        );
        let feedback = Feedback {
            question_index: i,
            is_correct,
            selected_index,
            selected_answer: selected_text.to_string(),
            correct_answer: question.correct_answer.clone(),
            diagnosis: classify(&ctx, is_correct),
            explanation: question.explanation.clone(),
            is_last: i + 1 == total,
        };

        if is_correct {
            self.session.correct_count += 1;
        }
        self.session.state = SessionState::Feedback(i);
        AnswerOutcome::Feedback(Box::new(feedback))
    }

    /// Move past the current feedback.
    pub fn advance(&mut self) -> Step {
        self.advance_at(Utc::now())
    }

    /// Like [`advance`](Self::advance), with an explicit completion time.
    pub fn advance_at(&mut self, now: DateTime<Utc>) -> Step {
        let SessionState::Feedback(i) = self.session.state else {
            return Step::Ignored;
        };

        let total = self.session.questions.len();
        if i + 1 < total {
            self.session.current_index = i + 1;
            self.session.state = SessionState::Presenting(i + 1);
            return Step::Presenting(i + 1);
        }

        self.session.current_index = total;
        self.session.state = SessionState::Complete;
        let report = ScoreReport::new(
            self.session.topic,
            self.session.difficulty,
            self.session.correct_count,
            total,
            Some(self.session.started_at),
            now,
        );
        info!(
            correct = report.correct,
            total = report.total,
            percentage = report.percentage,
            "session complete"
        );
        self.report = Some(report.clone());
        Step::Complete(report)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let session = &self.session;
        let total = session.questions.len();
        let question_number = match session.state {
            SessionState::Presenting(i) | SessionState::Feedback(i) => i + 1,
            SessionState::Complete => total,
        };
        let passed = match session.state {
            SessionState::Presenting(i) | SessionState::Feedback(i) => i,
            SessionState::Complete => total,
        };

        SessionSnapshot {
            session_id: session.id,
            topic: session.topic,
            difficulty: session.difficulty,
            state: session.state,
            question_number,
            total,
            progress: passed as f64 / total as f64,
            correct: session.correct_count,
            wrong: session.wrong_count(),
            question: self.current_question().map(|q| QuestionView {
                text: q.text.clone(),
                options: q.options.clone(),
            }),
            description: session.description.clone(),
        }
    }

    fn is_presenting(&self) -> bool {
        matches!(self.session.state, SessionState::Presenting(_))
    }
}
