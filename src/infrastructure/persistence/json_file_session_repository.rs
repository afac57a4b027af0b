use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use crate::application::ports::{RepositoryError, SessionRepository};
use crate::domain::ChatSession;

/// Keeps the whole history as one JSON array in a single file.
pub struct JsonFileSessionRepository {
    path: PathBuf,
}

impl JsonFileSessionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes next to the target and renames so readers never see half a file.
    fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), RepositoryError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(&dir)?;
        temp_file.write_all(contents)?;
        temp_file.as_file().sync_all()?;
        temp_file
            .persist(path)
            .map_err(|e| RepositoryError::Io(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for JsonFileSessionRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RepositoryError::Io(e)),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| RepositoryError::Corrupt(e.to_string()))
    }

    #[instrument(skip_all, fields(path = %self.path.display(), session_count = sessions.len()))]
    async fn save(&self, sessions: &[ChatSession]) -> Result<(), RepositoryError> {
        let contents = serde_json::to_vec(sessions)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || Self::write_atomically(&path, &contents))
            .await
            .map_err(|e| RepositoryError::Io(std::io::Error::other(e.to_string())))?
    }
}
