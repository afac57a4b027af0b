use async_trait::async_trait;

/// Reads the text of one project source file for the export archive.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String, SourceFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceFetchError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("fetch failed: {0}")]
    FetchFailed(String),
}
