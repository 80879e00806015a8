//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use calcquiz_core::model::{Difficulty, Topic};

/// Top-level calcquiz configuration.
///
/// Note: Custom Debug impl masks the session cookie to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Server hosting the question and result endpoints.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout for both endpoints.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Value of the server's `session` cookie, for endpoints that need a
    /// logged-in user.
    #[serde(default)]
    pub session_cookie: Option<String>,
    /// Post results to the server when a session completes.
    #[serde(default = "default_save_results")]
    pub save_results: bool,
    /// Difficulty used when none is given on the command line.
    #[serde(default)]
    pub default_difficulty: Difficulty,
}

impl std::fmt::Debug for QuizConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "***"),
            )
            .field("save_results", &self.save_results)
            .field("default_difficulty", &self.default_difficulty)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_save_results() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            session_cookie: None,
            save_results: default_save_results(),
            default_difficulty: Difficulty::default(),
        }
    }
}

impl QuizConfig {
    /// URL of the question endpoint for a topic and difficulty.
    ///
    /// `mixed` maps to the `basic` route for derivatives, integrals and
    /// limits, and to the bare route for critical points. General and
    /// personalized quizzes have a single route each.
    pub fn questions_url(&self, topic: Topic, difficulty: Difficulty) -> String {
        let base = self.base_url.trim_end_matches('/');
        let route = match (topic, difficulty) {
            (Topic::Personalized, _) => "personalized".to_string(),
            (Topic::General | Topic::Unknown, _) => "general".to_string(),
            (Topic::CriticalPoints, Difficulty::Mixed) => "criticalpoints".to_string(),
            (topic, Difficulty::Mixed) => format!("{topic}/basic"),
            (topic, difficulty) => format!("{topic}/{difficulty}"),
        };
        format!("{base}/api/questions/{route}")
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        // do not rescan substituted text
        from = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `calcquiz.toml` in the current directory
/// 2. `~/.config/calcquiz/config.toml`
///
/// Environment variable overrides: `CALCQUIZ_BASE_URL`, `CALCQUIZ_SESSION_COOKIE`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("calcquiz.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    if let Ok(url) = std::env::var("CALCQUIZ_BASE_URL") {
        if !url.is_empty() {
            config.base_url = url;
        }
    }
    if let Ok(cookie) = std::env::var("CALCQUIZ_SESSION_COOKIE") {
        if !cookie.is_empty() {
            config.session_cookie = Some(cookie);
        }
    }

    Ok(config)
}

/// Parse TOML config text and expand `${VAR}` references.
pub fn parse_config(content: &str) -> Result<QuizConfig> {
    let mut config: QuizConfig = toml::from_str(content)?;
    config.base_url = resolve_env_vars(&config.base_url);
    config.session_cookie = config
        .session_cookie
        .as_deref()
        .map(resolve_env_vars)
        .filter(|c| !c.is_empty());
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("calcquiz"))
}
