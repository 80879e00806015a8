//! Answer evaluation.
//!
//! An answer is correct when any of three independent strategies agrees:
//! exact text, whitespace-normalized text, or option position.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The ECMAScript `\s` set. Unlike Unicode White_Space it contains U+FEFF
/// and leaves out U+0085.
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+")
        .expect("whitespace pattern is valid")
});

/// Which matching strategies accepted an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchBreakdown {
    /// `selected_text == correct_answer`.
    pub direct: bool,
    /// Equal after collapsing whitespace runs and trimming.
    pub normalized: bool,
    /// `selected_index` is the first option equal to the correct answer.
    pub positional: bool,
}

impl MatchBreakdown {
    /// Compute all three strategies.
    pub fn compute(
        options: &[String],
        selected_index: usize,
        selected_text: &str,
        correct_answer: &str,
    ) -> Self {
        let direct = selected_text == correct_answer;
        let normalized = normalize_whitespace(selected_text) == normalize_whitespace(correct_answer);
        let positional = options
            .iter()
            .position(|o| o == correct_answer)
            .is_some_and(|i| i == selected_index);

        Self {
            direct,
            normalized,
            positional,
        }
    }

    pub fn is_correct(&self) -> bool {
        self.direct || self.normalized || self.positional
    }

    /// Correct only because of the option index; the texts disagree.
    pub fn positional_only(&self) -> bool {
        self.positional && !self.direct && !self.normalized
    }
}

/// Decide whether the selected option is correct.
pub fn evaluate(
    options: &[String],
    selected_index: usize,
    selected_text: &str,
    correct_answer: &str,
) -> bool {
    MatchBreakdown::compute(options, selected_index, selected_text, correct_answer).is_correct()
}

/// Collapse every run of whitespace to a single space and trim both ends.
///
/// Whitespace is the set browsers use for `\s`, so a leading byte order mark
/// is trimmed while U+0085 is kept as text.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(text, " ")
        .trim_matches(' ')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn direct_match() {
        let options = opts(&["2x", "x", "0"]);
        assert!(evaluate(&options, 0, "2x", "2x"));
        let b = MatchBreakdown::compute(&options, 0, "2x", "2x");
        assert!(b.direct && b.normalized && b.positional);
    }

    #[test]
    fn direct_match_holds_even_with_wrong_index() {
        // the text agrees, so the index is irrelevant
        let options = opts(&["2x", "x"]);
        assert!(evaluate(&options, 1, "2x", "2x"));
    }

    #[test]
    fn whitespace_is_normalized() {
        let options = opts(&["\\( 2x \\)", "\\( x \\)"]);
        assert!(evaluate(&options, 5, "  \\(  2x \\)\n", "\\( 2x \\)"));
        assert!(evaluate(&options, 5, "\\( 2x \\)", "\\(\t2x   \\) "));
        assert!(!evaluate(&options, 5, "\\( 2 x \\)", "\\( 2x \\)"));
    }

    #[test]
    fn positional_match_tolerates_text_drift() {
        let options = opts(&["x^2", "2x"]);
        // correct answer is option 1 by text; selected text was re-rendered differently
        let b = MatchBreakdown::compute(&options, 1, "2·x", "2x");
        assert!(!b.direct && !b.normalized);
        assert!(b.positional);
        assert!(b.positional_only());
    }

    #[test]
    fn positional_never_fires_when_correct_answer_absent() {
        let options = opts(&["a", "b", "c"]);
        for idx in 0..options.len() {
            let b = MatchBreakdown::compute(&options, idx, &options[idx], "d");
            assert!(!b.positional);
            assert!(!b.is_correct());
        }
    }

    #[test]
    fn positional_uses_first_occurrence() {
        let options = opts(&["a", "b", "a"]);
        let b = MatchBreakdown::compute(&options, 2, "z", "a");
        assert!(!b.positional);
    }

    #[test]
    fn case_sensitive() {
        let options = opts(&["C", "c"]);
        assert!(!evaluate(&options, 1, "c", "C"));
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_whitespace("  a \t b\n\nc "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn normalize_uses_browser_whitespace_set() {
        assert_eq!(normalize_whitespace("\u{FEFF}2x"), "2x");
        assert_eq!(normalize_whitespace("a\u{00A0}\u{3000}b"), "a b");
        assert_eq!(normalize_whitespace("a\u{0085}b"), "a\u{0085}b");
        assert_eq!(normalize_whitespace("\u{0085}"), "\u{0085}");
    }

    #[test]
    fn byte_order_mark_does_not_break_normalized_match() {
        let options = opts(&["x", "2x"]);
        let b = MatchBreakdown::compute(&options, 0, "\u{FEFF}2x", "2x");
        assert!(b.normalized);
        assert!(b.is_correct());
    }
}
