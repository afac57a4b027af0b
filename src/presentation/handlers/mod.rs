mod chat;
mod error;
mod export;
mod health;
mod sessions;

pub use chat::{SendMessageRequest, SendMessageResponse, new_chat_handler, send_message_handler};
pub use error::ErrorResponse;
pub use export::{EXPORT_MISSING_HEADER, export_handler};
pub use health::health_handler;
pub use sessions::{
    create_session_handler, delete_session_handler, get_session_handler, list_sessions_handler,
    select_session_handler, summarize_session_handler,
};
