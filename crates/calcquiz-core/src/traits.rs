//! Collaborator traits for fetching questions and persisting results.
//!
//! Implemented by the `calcquiz-client` crate (HTTP, file and in-memory).

use async_trait::async_trait;

use crate::error::{LoadError, PersistError};
use crate::score::{SaveReceipt, SaveResultRequest};

// ---------------------------------------------------------------------------
// Question source
// ---------------------------------------------------------------------------

/// Anything that can hand back a raw question payload for a location.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "http").
    fn name(&self) -> &str;

    /// Fetch the raw payload body stored at `location`.
    async fn fetch(&self, location: &str) -> Result<String, LoadError>;
}

// ---------------------------------------------------------------------------
// Result sink
// ---------------------------------------------------------------------------

/// Destination for completed session results.
#[async_trait]
pub trait ResultSink: Send + Sync {
    fn name(&self) -> &str;

    /// Persist one result. Callers treat failures as log-only.
    async fn save(&self, request: &SaveResultRequest) -> Result<SaveReceipt, PersistError>;
}
