//! calcquiz-client: Question sources, result sinks and configuration.
//!
//! Implements the `QuestionSource` and `ResultSink` traits from
//! `calcquiz-core` over HTTP, the local filesystem and memory, and loads the
//! TOML configuration that points them at a server.

pub mod config;
pub mod file;
pub mod http;
pub mod mock;
pub mod sink;

pub use config::{load_config, load_config_from, QuizConfig};
pub use file::FileQuestionSource;
pub use http::HttpQuestionSource;
pub use sink::{save_in_background, HttpResultSink};
