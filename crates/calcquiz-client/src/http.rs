//! HTTP question source.

use async_trait::async_trait;
use reqwest::header::COOKIE;
use tracing::{debug, instrument};

use calcquiz_core::error::LoadError;
use calcquiz_core::parser::source_error_message;
use calcquiz_core::traits::QuestionSource;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Build the client shared by the HTTP source and sink.
///
/// Redirects are not followed: the server answers unauthenticated requests
/// with a redirect to its login page, which is an error here, not a payload.
pub(crate) fn build_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("failed to build HTTP client")
}

/// Fetches question payloads with `GET <location>`.
pub struct HttpQuestionSource {
    client: reqwest::Client,
    timeout_secs: u64,
    session_cookie: Option<String>,
}

impl HttpQuestionSource {
    pub fn new(timeout_secs: u64) -> Self {
        let timeout_secs = if timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_secs
        };
        Self {
            client: build_client(timeout_secs),
            timeout_secs,
            session_cookie: None,
        }
    }

    /// Send `Cookie: session=<value>` with every request.
    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie.filter(|c| !c.is_empty());
        self
    }
}

impl Default for HttpQuestionSource {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(url = %location))]
    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        let mut request = self.client.get(location);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, format!("session={cookie}"));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(self.timeout_secs)
            } else {
                LoadError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(self.timeout_secs)
            } else {
                LoadError::Network(e.to_string())
            }
        })?;

        if !status.is_success() {
            if let Some(message) = source_error_message(&body) {
                return Err(LoadError::Source(message));
            }
            return Err(LoadError::Http {
                status: status.as_u16(),
                body,
            });
        }

        debug!(bytes = body.len(), "question payload received");
        Ok(body)
    }
}
