use crate::application::ports::{LlmClient, LlmClientError};

/// Answers every prompt with the same canned text.
pub struct MockLlmClient {
    answer: String,
}

impl MockLlmClient {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new("Mock answer")
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Ok(self.answer.clone())
    }
}
