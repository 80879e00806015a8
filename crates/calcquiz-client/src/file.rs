//! Local file question source.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::instrument;

use calcquiz_core::error::LoadError;
use calcquiz_core::traits::QuestionSource;

/// Reads payloads from disk. Locations are paths, resolved against `root`
/// when relative.
#[derive(Debug, Default)]
pub struct FileQuestionSource {
    root: Option<PathBuf>,
}

impl FileQuestionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(location),
            None => PathBuf::from(location),
        }
    }
}

#[async_trait]
impl QuestionSource for FileQuestionSource {
    fn name(&self) -> &str {
        "file"
    }

    #[instrument(skip(self))]
    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        let path = self.resolve(location);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| LoadError::Io(format!("{}: {e}", path.display())))
    }
}
