use async_trait::async_trait;

/// Opaque text-completion oracle: one flat prompt in, generated text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("timed out after {0}s")]
    Timeout(u64),
    #[error("invalid configuration: {0}")]
    Configuration(String),
}
