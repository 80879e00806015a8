//! Error types for loading question sets and persisting results.
//!
//! Defined in `calcquiz-core` so the session controller and the renderer can
//! classify failures (retry affordance, log-only) without string matching.

use thiserror::Error;

/// Errors that prevent a session from starting.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source answered with a non-success HTTP status.
    #[error("question source returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request timed out.
    #[error("question source timed out after {0}s")]
    Timeout(u64),

    /// A network or I/O error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// A local payload file could not be read.
    #[error("failed to read question file: {0}")]
    Io(String),

    /// The source reported an error of its own (`{"error": "..."}`).
    #[error("question source error: {0}")]
    Source(String),

    /// The body was not valid JSON.
    #[error("invalid JSON from question source: {0}")]
    InvalidJson(String),

    /// The body was JSON but not one of the accepted shapes.
    #[error("unrecognized question payload: {0}")]
    UnrecognizedShape(String),

    /// Every question in the payload was malformed (or there were none).
    #[error("no valid questions ({dropped} malformed entries dropped)")]
    NoValidQuestions { dropped: usize },
}

impl LoadError {
    /// Returns `true` if trying the same load again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LoadError::Timeout(_) | LoadError::Network(_) => true,
            LoadError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Errors from the result sink. These are logged, never surfaced.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The sink answered with a non-success HTTP status.
    #[error("result sink returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request timed out.
    #[error("result sink timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}
