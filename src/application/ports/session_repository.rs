use async_trait::async_trait;

use crate::domain::ChatSession;

use super::RepositoryError;

/// Durable home of the whole session collection, written and read as one value.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Returns an empty vector when nothing has been stored yet.
    async fn load(&self) -> Result<Vec<ChatSession>, RepositoryError>;

    async fn save(&self, sessions: &[ChatSession]) -> Result<(), RepositoryError>;
}
