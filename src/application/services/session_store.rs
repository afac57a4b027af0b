use std::collections::HashSet;
use std::sync::Arc;

use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::ChatSession;

/// Loads and saves the session collection through a pluggable repository.
pub struct SessionStore {
    repository: Arc<dyn SessionRepository>,
}

impl SessionStore {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Unreadable or malformed history is treated as no history.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Vec<ChatSession> {
        match self.repository.load().await {
            Ok(sessions) => {
                let sessions = drop_duplicate_ids(sessions);
                tracing::info!(session_count = sessions.len(), "Chat history loaded");
                sessions
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable chat history");
                Vec::new()
            }
        }
    }

    /// An empty collection is never written, so whatever was stored before
    /// survives (including after the last session is deleted).
    #[tracing::instrument(skip_all, fields(session_count = sessions.len()))]
    pub async fn save(&self, sessions: &[ChatSession]) -> Result<(), RepositoryError> {
        if sessions.is_empty() {
            tracing::debug!("Skipping save of empty chat history");
            return Ok(());
        }

        self.repository.save(sessions).await
    }
}

/// Keeps the first session for each id.
fn drop_duplicate_ids(sessions: Vec<ChatSession>) -> Vec<ChatSession> {
    let mut seen = HashSet::with_capacity(sessions.len());
    let before = sessions.len();
    let unique: Vec<ChatSession> = sessions
        .into_iter()
        .filter(|s| seen.insert(s.id()))
        .collect();

    if unique.len() != before {
        tracing::warn!(dropped = before - unique.len(), "Dropped sessions with duplicate ids");
    }
    unique
}
