mod file_loader;
mod llm_client;
mod repository_error;
mod session_repository;
mod source_fetcher;

pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use repository_error::RepositoryError;
pub use session_repository::SessionRepository;
pub use source_fetcher::{SourceFetchError, SourceFetcher};
