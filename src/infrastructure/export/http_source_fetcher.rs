use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{SourceFetchError, SourceFetcher};

/// Fetches source files from the origin that serves them.
pub struct HttpSourceFetcher {
    client: Client,
    base_url: String,
}

impl HttpSourceFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get(&self, path: &str) -> Result<String, SourceFetchError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceFetchError::FetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceFetchError::NotFound(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceFetchError::FetchFailed(e.to_string()))
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    /// Tries the full path first, then the bare file name at the origin root.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, path: &str) -> Result<String, SourceFetchError> {
        match self.get(path).await {
            Ok(content) => Ok(content),
            Err(first) => {
                let file_name = path.rsplit('/').next().unwrap_or(path);
                if file_name == path {
                    return Err(first);
                }
                tracing::debug!(error = %first, file_name, "Retrying at origin root");
                self.get(file_name).await
            }
        }
    }
}
