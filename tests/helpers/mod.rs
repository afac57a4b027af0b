use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use docuchat::application::ports::{
    FileLoader, LlmClient, LlmClientError, RepositoryError, SessionRepository,
};
use docuchat::application::services::{ChatService, InferenceService, SessionStore};
use docuchat::domain::ChatSession;
use docuchat::infrastructure::llm::MockLlmClient;
use docuchat::infrastructure::persistence::InMemorySessionRepository;
use docuchat::infrastructure::text_processing::MockFileLoader;

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct FailingLlmClient;

#[async_trait::async_trait]
impl LlmClient for FailingLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::ApiRequestFailed("HTTP 500: boom".to_string()))
    }
}

/// Keeps every prompt it receives.
pub struct RecordingLlmClient {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingLlmClient {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

/// Blocks every completion until [`GatedLlmClient::release`] is called.
pub struct GatedLlmClient {
    gate: Notify,
    answer: String,
}

impl GatedLlmClient {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            gate: Notify::new(),
            answer: answer.into(),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait::async_trait]
impl LlmClient for GatedLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        self.gate.notified().await;
        Ok(self.answer.clone())
    }
}

pub struct SlowLlmClient(pub Duration);

#[async_trait::async_trait]
impl LlmClient for SlowLlmClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        tokio::time::sleep(self.0).await;
        Ok("too late".to_string())
    }
}

/// In-memory repository whose saves can be slowed down or made to fail.
#[derive(Default)]
pub struct ControlledRepository {
    inner: InMemorySessionRepository,
    save_delay: Duration,
    fail_saves: AtomicBool,
}

impl ControlledRepository {
    pub fn with_save_delay(save_delay: Duration) -> Self {
        Self {
            save_delay,
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_saves.store(failing, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl SessionRepository for ControlledRepository {
    async fn load(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        self.inner.load().await
    }

    async fn save(&self, sessions: &[ChatSession]) -> Result<(), RepositoryError> {
        tokio::time::sleep(self.save_delay).await;
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Io(std::io::Error::other("disk full")));
        }
        self.inner.save(sessions).await
    }
}

pub fn chat_service_with(
    llm_client: Arc<dyn LlmClient>,
    file_loader: Arc<dyn FileLoader>,
    repository: Arc<dyn SessionRepository>,
) -> Arc<ChatService> {
    Arc::new(ChatService::new(
        SessionStore::new(repository),
        file_loader,
        InferenceService::new(llm_client, TEST_TIMEOUT),
    ))
}

pub fn mock_chat_service(repository: Arc<InMemorySessionRepository>) -> Arc<ChatService> {
    chat_service_with(
        Arc::new(MockLlmClient::default()),
        Arc::new(MockFileLoader::new()),
        repository,
    )
}

/// Polls until `condition` holds; panics after a second.
pub async fn wait_until<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if condition().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not met in time");
}
