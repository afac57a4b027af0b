use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{SourceFetchError, SourceFetcher};

/// Reads source files from a directory on disk.
pub struct LocalSourceFetcher {
    root: PathBuf,
}

impl LocalSourceFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, SourceFetchError> {
        let relative = Path::new(path);
        let escapes_root = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes_root {
            return Err(SourceFetchError::NotFound(format!(
                "{path} is outside the source root"
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl SourceFetcher for LocalSourceFetcher {
    async fn fetch(&self, path: &str) -> Result<String, SourceFetchError> {
        let full_path = self.resolve(path)?;
        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SourceFetchError::NotFound(path.to_string()),
                _ => SourceFetchError::FetchFailed(format!("{}: {e}", full_path.display())),
            })
    }
}
