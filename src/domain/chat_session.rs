use serde::{Deserialize, Serialize};

use super::{Message, SessionId};

/// One uploaded document and the question/answer history about it.
///
/// Serialized with the field names of the persisted history array
/// (`id`, `fileName`, `documentText`, `messages`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    id: SessionId,
    file_name: String,
    document_text: String,
    messages: Vec<Message>,
}

impl ChatSession {
    /// Creates a session seeded with the greeting the assistant shows after
    /// reading the document.
    pub fn new(id: SessionId, file_name: String, document_text: String) -> Self {
        let greeting = Message::ai(format!(
            "I've finished reading \"{}\". Ask me anything!",
            file_name
        ));
        Self {
            id,
            file_name,
            document_text,
            messages: vec![greeting],
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn document_text(&self) -> &str {
        &self.document_text
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drops every message from `len` onwards; no-op when already shorter.
    pub(crate) fn truncate_messages(&mut self, len: usize) {
        self.messages.truncate(len);
    }
}
