use std::sync::Mutex;

use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::ChatSession;

/// Holds the serialized history in memory, the same single-value layout the
/// file backend uses.
#[derive(Default)]
pub struct InMemorySessionRepository {
    raw: Mutex<Option<String>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with arbitrary content, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.lock().map(|raw| raw.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn load(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        let Some(raw) = self.raw() else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| RepositoryError::Corrupt(e.to_string()))
    }

    async fn save(&self, sessions: &[ChatSession]) -> Result<(), RepositoryError> {
        let serialized = serde_json::to_string(sessions)?;
        let mut raw = self
            .raw
            .lock()
            .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;
        *raw = Some(serialized);
        Ok(())
    }
}
