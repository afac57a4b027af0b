use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::infrastructure::observability::sanitize_prompt;

use super::prompt_builder::{build_answer_prompt, build_summary_prompt};

pub const ANSWER_FALLBACK: &str = "I couldn't find an answer to that in the document.";
pub const SUMMARY_FALLBACK: &str = "I couldn't produce a summary of this document.";

/// Wraps the completion port with a deadline and a single failure shape.
pub struct InferenceService {
    llm_client: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl InferenceService {
    pub fn new(llm_client: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        Self {
            llm_client,
            timeout,
        }
    }

    #[tracing::instrument(skip_all, fields(prompt_chars = prompt.len()))]
    pub async fn infer(&self, prompt: &str) -> Result<String, InferenceError> {
        tracing::debug!(prompt = %sanitize_prompt(prompt), "Sending prompt");

        match tokio::time::timeout(self.timeout, self.llm_client.complete(prompt)).await {
            Ok(Ok(answer)) => Ok(answer),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Completion request failed");
                Err(InferenceError::Failed(e.to_string()))
            }
            Err(_) => {
                tracing::error!(timeout_secs = self.timeout.as_secs(), "Completion timed out");
                Err(InferenceError::Failed(
                    LlmClientError::Timeout(self.timeout.as_secs()).to_string(),
                ))
            }
        }
    }

    pub async fn answer(
        &self,
        document_text: &str,
        question: &str,
    ) -> Result<String, InferenceError> {
        let answer = self
            .infer(&build_answer_prompt(document_text, question))
            .await?;
        Ok(with_fallback(answer, ANSWER_FALLBACK))
    }

    pub async fn summarize(
        &self,
        document_text: &str,
        question: Option<&str>,
    ) -> Result<String, InferenceError> {
        let summary = self
            .infer(&build_summary_prompt(document_text, question))
            .await?;
        Ok(with_fallback(summary, SUMMARY_FALLBACK))
    }
}

/// Never hand an empty answer to the chat history.
pub fn with_fallback(answer: String, fallback: &str) -> String {
    if answer.trim().is_empty() {
        fallback.to_string()
    } else {
        answer
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("inference failed: {0}")]
    Failed(String),
}
