//! Chat state machine.
//!
//! [`transition`] is a pure function from the current [`ChatState`] and one
//! [`ChatEvent`] to the next state plus the side effects the caller must run.
//! Nothing here touches storage, the network or the clock.

use std::collections::HashMap;

use crate::domain::{ChatSession, Message, SessionId};

use super::inference_service::{ANSWER_FALLBACK, with_fallback};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    /// Upload view.
    NoActiveSession,
    ActiveSession(SessionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingExchange {
    request_id: RequestId,
    rollback_len: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ChatState {
    sessions: Vec<ChatSession>,
    active_session_id: Option<SessionId>,
    pending: HashMap<SessionId, PendingExchange>,
    next_request_id: RequestId,
}

impl ChatState {
    /// Rehydrated state always starts in the upload view.
    pub fn new(sessions: Vec<ChatSession>) -> Self {
        Self {
            sessions,
            ..Self::default()
        }
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn session(&self, id: SessionId) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    fn session_mut(&mut self, id: SessionId) -> Option<&mut ChatSession> {
        self.sessions.iter_mut().find(|s| s.id() == id)
    }

    /// A dangling active id counts as no session at all.
    pub fn active_session(&self) -> Option<&ChatSession> {
        self.active_session_id.and_then(|id| self.session(id))
    }

    pub fn mode(&self) -> ChatMode {
        match self.active_session() {
            Some(session) => ChatMode::ActiveSession(session.id()),
            None => ChatMode::NoActiveSession,
        }
    }

    pub fn is_loading(&self, id: SessionId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Prepends a freshly read document as the newest session and activates
    /// it. Returns `false` and leaves the state alone if the id is taken.
    pub fn create_session(
        &mut self,
        id: SessionId,
        file_name: String,
        document_text: String,
    ) -> bool {
        if self.session(id).is_some() {
            return false;
        }

        self.sessions
            .insert(0, ChatSession::new(id, file_name, document_text));
        self.active_session_id = Some(id);
        true
    }

    pub fn delete_session(&mut self, id: SessionId) -> Option<ChatSession> {
        let index = self.sessions.iter().position(|s| s.id() == id)?;
        let removed = self.sessions.remove(index);

        if self.active_session_id == Some(id) {
            self.active_session_id = None;
        }

        Some(removed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    DocumentExtracted {
        session_id: SessionId,
        file_name: String,
        document_text: String,
    },
    ExtractionFailed {
        file_name: String,
        reason: String,
    },
    NewChat,
    SelectSession(SessionId),
    DeleteSession(SessionId),
    SubmitMessage {
        text: String,
    },
    InferenceSucceeded {
        session_id: SessionId,
        request_id: RequestId,
        answer: String,
    },
    InferenceFailed {
        session_id: SessionId,
        request_id: RequestId,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEffect {
    /// Write the whole session collection.
    PersistSessions,
    RequestInference {
        session_id: SessionId,
        request_id: RequestId,
        document_text: String,
        question: String,
    },
    CancelInference {
        session_id: SessionId,
        request_id: RequestId,
    },
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Destructive,
}

/// User-facing toast.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn extraction_failed() -> Self {
        Self {
            level: NotificationLevel::Destructive,
            title: "Error reading file".to_string(),
            description:
                "There was a problem reading your document. Please try another file.".to_string(),
        }
    }

    pub fn inference_failed() -> Self {
        Self {
            level: NotificationLevel::Destructive,
            title: "An error occurred".to_string(),
            description: "Sorry, I couldn't process that. Please try again.".to_string(),
        }
    }

    pub fn save_failed() -> Self {
        Self {
            level: NotificationLevel::Destructive,
            title: "Could not save".to_string(),
            description: "Your chat history could not be saved. Please try again.".to_string(),
        }
    }

    pub fn request_in_flight() -> Self {
        Self {
            level: NotificationLevel::Info,
            title: "Still thinking".to_string(),
            description: "Wait for the current answer before asking another question."
                .to_string(),
        }
    }
}

pub fn transition(mut state: ChatState, event: ChatEvent) -> (ChatState, Vec<ChatEffect>) {
    let effects = match event {
        ChatEvent::DocumentExtracted {
            session_id,
            file_name,
            document_text,
        } => {
            if state.create_session(session_id, file_name, document_text) {
                vec![ChatEffect::PersistSessions]
            } else {
                tracing::warn!(session_id = %session_id, "Session id already in use");
                vec![ChatEffect::Notify(Notification::extraction_failed())]
            }
        }
        ChatEvent::ExtractionFailed { file_name, reason } => {
            tracing::warn!(file_name = %file_name, reason = %reason, "Document could not be read");
            vec![ChatEffect::Notify(Notification::extraction_failed())]
        }
        ChatEvent::NewChat => {
            state.active_session_id = None;
            Vec::new()
        }
        ChatEvent::SelectSession(id) => {
            if state.session(id).is_some() {
                state.active_session_id = Some(id);
            }
            Vec::new()
        }
        ChatEvent::DeleteSession(id) => match state.delete_session(id) {
            Some(_) => {
                let mut effects = Vec::with_capacity(2);
                if let Some(pending) = state.pending.remove(&id) {
                    effects.push(ChatEffect::CancelInference {
                        session_id: id,
                        request_id: pending.request_id,
                    });
                }
                effects.push(ChatEffect::PersistSessions);
                effects
            }
            None => Vec::new(),
        },
        ChatEvent::SubmitMessage { text } => submit_message(&mut state, text),
        ChatEvent::InferenceSucceeded {
            session_id,
            request_id,
            answer,
        } => match take_pending(&mut state, session_id, request_id) {
            Some(_) => {
                if let Some(session) = state.session_mut(session_id) {
                    session.push_message(Message::ai(with_fallback(answer, ANSWER_FALLBACK)));
                }
                vec![ChatEffect::PersistSessions]
            }
            None => Vec::new(),
        },
        ChatEvent::InferenceFailed {
            session_id,
            request_id,
            reason,
        } => match take_pending(&mut state, session_id, request_id) {
            Some(pending) => {
                tracing::warn!(session_id = %session_id, reason = %reason, "Rolling back unanswered question");
                if let Some(session) = state.session_mut(session_id) {
                    session.truncate_messages(pending.rollback_len);
                }
                vec![
                    ChatEffect::Notify(Notification::inference_failed()),
                    ChatEffect::PersistSessions,
                ]
            }
            None => Vec::new(),
        },
    };

    (state, effects)
}

fn submit_message(state: &mut ChatState, text: String) -> Vec<ChatEffect> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let Some(session_id) = state.active_session().map(ChatSession::id) else {
        return Vec::new();
    };

    if state.is_loading(session_id) {
        return vec![ChatEffect::Notify(Notification::request_in_flight())];
    }

    let request_id = state.next_request_id;
    state.next_request_id += 1;

    let Some(session) = state.session_mut(session_id) else {
        return Vec::new();
    };
    let rollback_len = session.messages().len();
    session.push_message(Message::user(text.clone()));
    let document_text = session.document_text().to_string();

    state.pending.insert(
        session_id,
        PendingExchange {
            request_id,
            rollback_len,
        },
    );

    vec![
        ChatEffect::PersistSessions,
        ChatEffect::RequestInference {
            session_id,
            request_id,
            document_text,
            question: text,
        },
    ]
}

/// Stale results (deleted session, superseded request) yield `None`.
fn take_pending(
    state: &mut ChatState,
    session_id: SessionId,
    request_id: RequestId,
) -> Option<PendingExchange> {
    let is_current = state
        .pending
        .get(&session_id)
        .is_some_and(|pending| pending.request_id == request_id);

    if is_current {
        state.pending.remove(&session_id)
    } else {
        None
    }
}
