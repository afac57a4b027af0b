mod in_memory_session_repository;
mod json_file_session_repository;

pub use in_memory_session_repository::InMemorySessionRepository;
pub use json_file_session_repository::JsonFileSessionRepository;
