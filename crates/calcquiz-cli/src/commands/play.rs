//! The `calcquiz play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use calcquiz_client::{
    load_config_from, save_in_background, FileQuestionSource, HttpQuestionSource,
    HttpResultSink, QuizConfig,
};
use calcquiz_core::model::{Difficulty, Topic};
use calcquiz_core::score::ScoreReport;
use calcquiz_core::session::{AnswerOutcome, SessionController, Step};
use calcquiz_core::traits::{QuestionSource, ResultSink};

use crate::render;

pub async fn execute(
    url: Option<String>,
    file: Option<PathBuf>,
    topic: Option<Topic>,
    difficulty: Option<Difficulty>,
    config_path: Option<PathBuf>,
    no_save: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let from_file = file.is_some();
    let (source, location) = resolve_source(&config, url, file, topic, difficulty)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut controller = loop {
        match SessionController::load(source.as_ref(), &location).await {
            Ok(controller) => break controller,
            Err(e) if e.is_retryable() => {
                render::load_error(&mut out, &e)?;
                let answer = read_line(&mut input)?.unwrap_or_default();
                if !answer.trim().eq_ignore_ascii_case("y") {
                    return Err(e).with_context(|| format!("failed to load {location}"));
                }
            }
            Err(e) => return Err(e).with_context(|| format!("failed to load {location}")),
        }
    };

    // explicit flags win over what the file path implies
    if from_file {
        if let Some(topic) = topic {
            controller = controller.with_topic(topic);
        }
        if let Some(difficulty) = difficulty {
            controller = controller.with_difficulty(difficulty);
        }
    }

    let Some(report) = run_session(&mut controller, &mut input, &mut out)? else {
        writeln!(out, "\nQuiz abandoned.")?;
        return Ok(());
    };

    let pending_save = if config.save_results && !no_save {
        let sink: Arc<dyn ResultSink> = Arc::new(
            HttpResultSink::new(&config.base_url, config.timeout_secs)
                .with_session_cookie(config.session_cookie.clone()),
        );
        Some(save_in_background(sink, report.to_save_request()))
    } else {
        None
    };

    render::report(&mut out, &report)?;

    if let Some(handle) = pending_save {
        if let Err(e) = handle.await {
            tracing::warn!("result save task failed: {e}");
        }
    }

    Ok(())
}

fn resolve_source(
    config: &QuizConfig,
    url: Option<String>,
    file: Option<PathBuf>,
    topic: Option<Topic>,
    difficulty: Option<Difficulty>,
) -> Result<(Box<dyn QuestionSource>, String)> {
    if let Some(file) = file {
        return Ok((
            Box::new(FileQuestionSource::new()),
            file.to_string_lossy().into_owned(),
        ));
    }

    let location = match (url, topic) {
        (Some(url), _) => url,
        (None, Some(topic)) => {
            config.questions_url(topic, difficulty.unwrap_or(config.default_difficulty))
        }
        (None, None) => anyhow::bail!("one of --url, --file or --topic is required"),
    };
    let source = HttpQuestionSource::new(config.timeout_secs)
        .with_session_cookie(config.session_cookie.clone());
    Ok((Box::new(source), location))
}

/// Play `controller` to completion on `input`/`out`.
///
/// Returns `None` if input ends before the last question is answered.
pub(crate) fn run_session(
    controller: &mut SessionController,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<ScoreReport>> {
    if let Some(description) = &controller.session().description {
        render::description(out, description)?;
    }

    loop {
        let snapshot = controller.snapshot();
        render::question(out, &snapshot)?;
        let option_count = snapshot.question.map(|q| q.options.len()).unwrap_or(0);

        let feedback = loop {
            write!(out, "Your answer: ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(None);
            };
            let Some(index) = parse_choice(&line) else {
                writeln!(out, "{}", choice_hint(option_count))?;
                continue;
            };
            match controller.answer(index) {
                AnswerOutcome::Feedback(feedback) => break feedback,
                AnswerOutcome::OutOfRange { option_count, .. } => {
                    writeln!(out, "{}", choice_hint(option_count))?;
                }
                AnswerOutcome::Ignored => {}
            }
        };

        render::feedback(out, &feedback)?;
        write!(out, "\n[Enter] {} ", feedback.continue_label())?;
        out.flush()?;
        read_line(input)?;
        writeln!(out)?;

        match controller.advance() {
            Step::Presenting(_) | Step::Ignored => continue,
            Step::Complete(report) => return Ok(Some(report)),
        }
    }
}

fn choice_hint(option_count: usize) -> String {
    let lettered = option_count.min(render::LETTERED_OPTIONS);
    let last = render::option_label(lettered.saturating_sub(1));
    format!("Answer with a letter (A-{last}) or a number (1-{option_count}).")
}

/// A letter (`b`, `B`) or a 1-based number (`2`) as a zero-based index.
fn parse_choice(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    if let Ok(n) = trimmed.parse::<usize>() {
        return n.checked_sub(1);
    }
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
        }
        _ => None,
    }
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("failed to read input")?;
    Ok((n > 0).then_some(line))
}
