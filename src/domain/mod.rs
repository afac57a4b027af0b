mod chat_session;
mod document;
mod message;
mod message_role;
mod session_id;

pub use chat_session::ChatSession;
pub use document::{ContentType, Document};
pub use message::Message;
pub use message_role::MessageRole;
pub use session_id::{SessionId, SessionIdGenerator};
