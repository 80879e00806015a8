//! In-memory collaborators for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use calcquiz_core::error::{LoadError, PersistError};
use calcquiz_core::score::{SaveReceipt, SaveResultRequest};
use calcquiz_core::traits::{QuestionSource, ResultSink};

/// A question source that serves canned bodies.
///
/// Bodies are matched by location substring; the default body answers
/// everything else, and without one unmatched locations get a 404.
pub struct StaticSource {
    bodies: HashMap<String, String>,
    default_body: Option<String>,
    call_count: AtomicU32,
    last_location: Mutex<Option<String>>,
}

impl StaticSource {
    pub fn new(bodies: HashMap<String, String>) -> Self {
        Self {
            bodies,
            default_body: None,
            call_count: AtomicU32::new(0),
            last_location: Mutex::new(None),
        }
    }

    /// A source that answers every location with `body`.
    pub fn with_fixed_body(body: &str) -> Self {
        Self {
            bodies: HashMap::new(),
            default_body: Some(body.to_string()),
            call_count: AtomicU32::new(0),
            last_location: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_location(&self) -> Option<String> {
        self.last_location.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_location.lock().unwrap() = Some(location.to_string());

        self.bodies
            .iter()
            .find(|(key, _)| location.contains(key.as_str()))
            .map(|(_, body)| body.clone())
            .or_else(|| self.default_body.clone())
            .ok_or_else(|| LoadError::Http {
                status: 404,
                body: format!("no canned body for {location}"),
            })
    }
}

/// A result sink that records every request.
pub struct RecordingSink {
    fail: bool,
    call_count: AtomicU32,
    saved: Mutex<Vec<SaveResultRequest>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            fail: false,
            call_count: AtomicU32::new(0),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// A sink whose every save fails with a 500.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Requests saved successfully, in order.
    pub fn saved(&self) -> Vec<SaveResultRequest> {
        self.saved.lock().unwrap().clone()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn save(&self, request: &SaveResultRequest) -> Result<SaveReceipt, PersistError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed) + 1;
        if self.fail {
            return Err(PersistError::Http {
                status: 500,
                message: "recording sink set to fail".into(),
            });
        }
        self.saved.lock().unwrap().push(request.clone());
        Ok(SaveReceipt {
            success: true,
            result_id: Some(serde_json::json!(n)),
            message: None,
        })
    }
}
