//! HTTP result sink and the fire-and-forget save helper.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use calcquiz_core::error::PersistError;
use calcquiz_core::score::{SaveReceipt, SaveResultRequest};
use calcquiz_core::traits::ResultSink;

use crate::http::{build_client, DEFAULT_TIMEOUT_SECS};

/// Posts results to `{base_url}/api/save-result`.
pub struct HttpResultSink {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
    session_cookie: Option<String>,
}

impl HttpResultSink {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let timeout_secs = if timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_secs
        };
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout_secs),
            timeout_secs,
            session_cookie: None,
        }
    }

    /// Send `Cookie: session=<value>`; the endpoint requires a logged-in user.
    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie.filter(|c| !c.is_empty());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api/save-result", self.base_url)
    }
}

#[async_trait]
impl ResultSink for HttpResultSink {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(topic = %request.topic, score = request.score))]
    async fn save(&self, request: &SaveResultRequest) -> Result<SaveReceipt, PersistError> {
        let mut builder = self.client.post(self.endpoint()).json(request);
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(COOKIE, format!("session={cookie}"));
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                PersistError::Timeout(self.timeout_secs)
            } else {
                PersistError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_redirection() {
            return Err(PersistError::Http {
                status: status.as_u16(),
                message: "redirected, session cookie missing or expired".into(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PersistError::Http {
                status: status.as_u16(),
                message,
            });
        }

        // the body is informational; a 2xx is what counts
        let receipt = response.json::<SaveReceipt>().await.unwrap_or(SaveReceipt {
            success: true,
            ..Default::default()
        });
        Ok(receipt)
    }
}

/// Save `request` on the runtime without waiting for it.
///
/// The outcome is logged and never reported back; await the handle only to
/// keep the runtime alive until the save has finished.
pub fn save_in_background(sink: Arc<dyn ResultSink>, request: SaveResultRequest) -> JoinHandle<()> {
    tokio::spawn(async move {
        match sink.save(&request).await {
            Ok(receipt) => info!(
                sink = sink.name(),
                result_id = ?receipt.result_id,
                "result saved"
            ),
            Err(e) => warn!(sink = sink.name(), "failed to save result: {e}"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcquiz_core::score::SaveResultDetails;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::mock::RecordingSink;

    fn request() -> SaveResultRequest {
        SaveResultRequest {
            topic: "limits".into(),
            score: 4,
            total_questions: 5,
            time_spent: Some(81),
            details: SaveResultDetails {
                percentage: 80,
                difficulty: "hard".into(),
                date: "2026-03-01T12:00:00+00:00".into(),
            },
        }
    }

    #[tokio::test]
    async fn posts_request_and_parses_receipt() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/save-result"))
            .and(header("cookie", "session=tok"))
            .and(body_json(serde_json::to_value(request()).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "result_id": 17,
                "message": "saved"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sink = HttpResultSink::new(&format!("{}/", server.uri()), 5)
            .with_session_cookie(Some("tok".into()));
        let receipt = sink.save(&request()).await.unwrap();
        assert!(receipt.success);
        assert_eq!(receipt.result_id, Some(serde_json::json!(17)));
        assert_eq!(receipt.message.as_deref(), Some("saved"));
    }

    #[tokio::test]
    async fn non_json_success_still_counts() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let sink = HttpResultSink::new(&server.uri(), 5);
        let receipt = sink.save(&request()).await.unwrap();
        assert!(receipt.success);
        assert!(receipt.result_id.is_none());
    }

    #[tokio::test]
    async fn missing_fields_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"error": "missing"})),
            )
            .mount(&server)
            .await;

        let sink = HttpResultSink::new(&server.uri(), 5);
        let err = sink.save(&request()).await.unwrap_err();
        assert!(matches!(err, PersistError::Http { status: 400, .. }));
    }

    #[tokio::test]
    async fn login_redirect_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login"))
            .mount(&server)
            .await;

        let sink = HttpResultSink::new(&server.uri(), 5);
        let err = sink.save(&request()).await.unwrap_err();
        assert!(err.to_string().contains("302"));
    }

    #[tokio::test]
    async fn background_save_swallows_failures() {
        let failing = Arc::new(RecordingSink::failing());
        save_in_background(failing.clone(), request()).await.unwrap();
        assert_eq!(failing.call_count(), 1);
        assert!(failing.saved().is_empty());

        let ok = Arc::new(RecordingSink::new());
        save_in_background(ok.clone(), request()).await.unwrap();
        assert_eq!(ok.saved(), vec![request()]);
    }
}
