//! Textual patterns shared by the topic cascades.

use std::sync::LazyLock;

use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern is valid")
}

/// Any `x`, optionally raised to a power. Effectively "mentions x".
static POLYNOMIAL: LazyLock<Regex> = LazyLock::new(|| compile(r"x\^?\d*"));
static EXPLICIT_POWER: LazyLock<Regex> = LazyLock::new(|| compile(r"x\^"));
static TRIGONOMETRIC: LazyLock<Regex> = LazyLock::new(|| compile(r"sin|cos|tan"));
static PARENTHESIZED_POWER: LazyLock<Regex> = LazyLock::new(|| compile(r"\([^)]+\)\^?\d*"));
static FUNCTION_CALL: LazyLock<Regex> = LazyLock::new(|| compile(r"sin\(|cos\(|exp\("));
static COEFFICIENT: LazyLock<Regex> = LazyLock::new(|| compile(r"\d*x"));
static LEADING_BARE_X: LazyLock<Regex> = LazyLock::new(|| compile(r"^x[^0-9]"));

pub(crate) fn is_polynomial(text: &str) -> bool {
    POLYNOMIAL.is_match(text)
}

pub(crate) fn has_explicit_power(text: &str) -> bool {
    EXPLICIT_POWER.is_match(text)
}

pub(crate) fn is_trigonometric(text: &str) -> bool {
    TRIGONOMETRIC.is_match(text)
}

/// A parenthesized group (optionally raised to a power) or a function call
/// with an inner argument.
pub(crate) fn is_composite(text: &str) -> bool {
    PARENTHESIZED_POWER.is_match(text) || FUNCTION_CALL.is_match(text)
}

/// An `x` term that is not a bare leading `x`, i.e. one that may carry a
/// coefficient.
pub(crate) fn has_coefficient(text: &str) -> bool {
    COEFFICIENT.is_match(text) && !LEADING_BARE_X.is_match(text)
}

/// Mentions infinity, as a symbol or as LaTeX `\infty`.
pub(crate) fn mentions_infinity(text: &str) -> bool {
    text.contains('∞') || text.contains("infty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_matches_any_x() {
        assert!(is_polynomial("x^3"));
        assert!(is_polynomial("\\frac{d}{dx} 5"));
        assert!(!is_polynomial("5"));
    }

    #[test]
    fn composite_forms() {
        assert!(is_composite("(x+1)^2"));
        assert!(is_composite("sin(2x)"));
        assert!(is_composite("exp(3x)"));
        assert!(!is_composite("x^2 + 1"));
        assert!(!is_composite("()"));
    }

    #[test]
    fn coefficient_excludes_leading_bare_x() {
        assert!(has_coefficient("\\int 3x dx"));
        assert!(has_coefficient("x2"));
        assert!(!has_coefficient("x dx"));
        assert!(!has_coefficient("5"));
    }

    #[test]
    fn infinity() {
        assert!(mentions_infinity("x → ∞"));
        assert!(mentions_infinity("x \\to \\infty"));
        assert!(!mentions_infinity("x → 0"));
    }
}
