//! Console renderer for snapshots, feedback and score reports.

use std::io::{self, Write};

use comfy_table::{Cell, Color, ContentArrangement, Table};

use calcquiz_core::diagnosis::DiagnosticBundle;
use calcquiz_core::error::LoadError;
use calcquiz_core::score::{format_elapsed, Grade, ScoreReport};
use calcquiz_core::session::{Feedback, SessionSnapshot};

const BAR_WIDTH: usize = 20;

/// Options that get a letter label; later ones are numbered.
pub const LETTERED_OPTIONS: usize = 26;

/// Label shown next to option `index`: `A`..`Z`, then the 1-based number.
pub fn option_label(index: usize) -> String {
    if index < LETTERED_OPTIONS {
        char::from(b'A' + index as u8).to_string()
    } else {
        (index + 1).to_string()
    }
}

fn grade_color(grade: Grade) -> Option<Color> {
    let hex = grade.color().strip_prefix('#')?;
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::Rgb {
        r: (rgb >> 16) as u8,
        g: (rgb >> 8) as u8,
        b: rgb as u8,
    })
}

fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round()) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn diagnosis_table(bundle: &DiagnosticBundle) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    for (heading, text) in bundle.sections() {
        table.add_row(vec![Cell::new(heading), Cell::new(text)]);
    }
    table
}

pub fn description(out: &mut impl Write, text: &str) -> io::Result<()> {
    writeln!(out, "{text}")?;
    writeln!(out)
}

pub fn question(out: &mut impl Write, snapshot: &SessionSnapshot) -> io::Result<()> {
    writeln!(
        out,
        "Question {} of {} {}",
        snapshot.question_number,
        snapshot.total,
        progress_bar(snapshot.progress)
    )?;
    if let Some(view) = &snapshot.question {
        writeln!(out, "\n{}\n", view.text)?;
        for (i, option) in view.options.iter().enumerate() {
            writeln!(out, "  {}) {option}", option_label(i))?;
        }
    }
    writeln!(
        out,
        "\nCorrect: {} | Wrong: {}",
        snapshot.correct, snapshot.wrong
    )
}

pub fn feedback(out: &mut impl Write, feedback: &Feedback) -> io::Result<()> {
    if feedback.is_correct {
        writeln!(out, "\n✅ Correct!")?;
    } else {
        writeln!(out, "\n❌ Not quite, but this is a chance to learn.")?;
    }
    writeln!(out, "Correct answer: {}", feedback.correct_answer)?;

    match (feedback.success_text(), feedback.diagnosis.bundle()) {
        (Some(text), _) => writeln!(out, "Why it's right: {text}")?,
        (None, Some(bundle)) => {
            writeln!(out, "You chose: {}", feedback.selected_answer)?;
            writeln!(out, "{}", diagnosis_table(bundle))?;
        }
        (None, None) => {}
    }
    Ok(())
}

pub fn diagnosis(out: &mut impl Write, rule_id: &str, bundle: &DiagnosticBundle) -> io::Result<()> {
    writeln!(out, "Matched rule: {rule_id}")?;
    writeln!(out, "{}", diagnosis_table(bundle))
}

pub fn report(out: &mut impl Write, report: &ScoreReport) -> io::Result<()> {
    writeln!(out, "\n🎉 Quiz complete!")?;

    let mut grade_cell = Cell::new(report.grade);
    if let Some(color) = grade_color(report.grade) {
        grade_cell = grade_cell.fg(color);
    }

    let mut table = Table::new();
    table.set_header(vec!["Score", "Grade", "Correct", "Wrong", "Time"]);
    table.add_row(vec![
        Cell::new(format!("{}%", report.percentage)),
        grade_cell,
        Cell::new(report.correct),
        Cell::new(report.wrong()),
        Cell::new(
            report
                .elapsed_secs
                .map(format_elapsed)
                .unwrap_or_else(|| "-".to_string()),
        ),
    ]);
    writeln!(out, "{table}")?;

    if report.tips.is_empty() {
        writeln!(out, "🌟 Well done! Keep it up.")
    } else {
        writeln!(out, "💪 How to improve:")?;
        for tip in &report.tips {
            writeln!(out, "  • {tip}")?;
        }
        Ok(())
    }
}

pub fn load_error(out: &mut impl Write, err: &LoadError) -> io::Result<()> {
    writeln!(out, "Could not load questions: {err}")?;
    if err.is_retryable() {
        write!(out, "Try again? [y/N] ")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcquiz_core::model::{Difficulty, Question, QuestionSet, Topic};
    use calcquiz_core::session::{AnswerOutcome, SessionController};

    fn controller() -> SessionController {
        SessionController::from_question_set(QuestionSet {
            questions: vec![Question::new(
                "d/dx x^2",
                vec!["2x".into(), "x".into()],
                "2x",
            )],
            info: None,
            topic: Topic::Derivatives,
            difficulty: Difficulty::Easy,
            dropped: 0,
        })
        .unwrap()
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn labels() {
        assert_eq!(option_label(0), "A");
        assert_eq!(option_label(3), "D");
        assert_eq!(option_label(25), "Z");
        assert_eq!(option_label(26), "27");
        assert_eq!(option_label(40), "41");
    }

    #[test]
    fn grade_colors_are_rgb() {
        assert_eq!(
            grade_color(Grade::Outstanding),
            Some(Color::Rgb {
                r: 0xFF,
                g: 0xD7,
                b: 0x00
            })
        );
        assert_eq!(
            grade_color(Grade::NeedsImprovement),
            Some(Color::Rgb {
                r: 0xDC,
                g: 0x26,
                b: 0x26
            })
        );
    }

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(1.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn question_lists_lettered_options() {
        let mut buf = Vec::new();
        question(&mut buf, &controller().snapshot()).unwrap();
        let out = text(buf);
        assert!(out.contains("Question 1 of 1"));
        assert!(out.contains("A) 2x"));
        assert!(out.contains("B) x"));
        assert!(out.contains("Correct: 0 | Wrong: 0"));
    }

    #[test]
    fn wrong_feedback_shows_all_sections() {
        let mut c = controller();
        let AnswerOutcome::Feedback(fb) = c.answer(1) else {
            panic!("expected feedback");
        };
        let mut buf = Vec::new();
        feedback(&mut buf, &fb).unwrap();
        let out = text(buf);
        assert!(out.contains("You chose: x"));
        for heading in ["Why it's wrong", "Step by step", "Memory aid"] {
            assert!(out.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn report_lists_tips_when_low() {
        let mut c = controller();
        c.answer(1);
        let calcquiz_core::session::Step::Complete(r) = c.advance() else {
            panic!("expected completion");
        };
        let mut buf = Vec::new();
        report(&mut buf, &r).unwrap();
        let out = text(buf);
        assert!(out.contains("0%"));
        assert!(out.contains("How to improve"));
    }
}
