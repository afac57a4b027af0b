use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{FileLoader, FileLoaderError, RepositoryError};
use crate::domain::{ChatSession, Document, Message, SessionId, SessionIdGenerator};

use super::chat_controller::{
    ChatEffect, ChatEvent, ChatState, Notification, RequestId, transition,
};
use super::inference_service::{InferenceError, InferenceService};
use super::session_store::SessionStore;

/// Drives [`transition`] and runs the effects it asks for.
///
/// The state lock is held while an event is applied and persisted, never
/// while waiting on the model. Every state change runs on a spawned task.
pub struct ChatService {
    state: Mutex<ChatState>,
    store: SessionStore,
    file_loader: Arc<dyn FileLoader>,
    inference: InferenceService,
    id_generator: SessionIdGenerator,
    in_flight: Mutex<HashMap<SessionId, (RequestId, CancellationToken)>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank message or no active session.
    Ignored,
    Busy(Notification),
    Answered(Message),
    /// The question was rolled back.
    Failed(Notification),
    /// The session went away before the answer arrived.
    Cancelled,
}

impl ChatService {
    pub fn new(
        store: SessionStore,
        file_loader: Arc<dyn FileLoader>,
        inference: InferenceService,
    ) -> Self {
        Self {
            state: Mutex::new(ChatState::default()),
            store,
            file_loader,
            inference,
            id_generator: SessionIdGenerator::new(),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Rehydrates the session collection from storage.
    pub async fn start(&self) {
        let sessions = self.store.load().await;
        for session in &sessions {
            self.id_generator.observe(session.id());
        }
        *self.state.lock().await = ChatState::new(sessions);
    }

    pub async fn snapshot(&self) -> ChatState {
        self.state.lock().await.clone()
    }

    pub async fn session(&self, id: SessionId) -> Option<ChatSession> {
        self.state.lock().await.session(id).cloned()
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn upload(
        self: &Arc<Self>,
        filename: String,
        data: &[u8],
    ) -> Result<ChatSession, ChatServiceError> {
        let document = Document::new(filename.clone(), data.len() as u64);

        let document_text = match self.file_loader.extract_text(data, &document).await {
            Ok(text) => text,
            Err(e) => {
                self.dispatch(ChatEvent::ExtractionFailed {
                    file_name: filename,
                    reason: e.to_string(),
                })
                .await?;
                return Err(ChatServiceError::Extraction(e));
            }
        };

        let session_id = self.id_generator.next_id();
        let effects = self
            .dispatch(ChatEvent::DocumentExtracted {
                session_id,
                file_name: filename,
                document_text,
            })
            .await?;
        if !persists(&effects) {
            return Err(ChatServiceError::SessionIdConflict(session_id));
        }

        let session = self
            .session(session_id)
            .await
            .ok_or(ChatServiceError::SessionNotFound(session_id))?;

        tracing::info!(session_id = %session_id, chars = session.document_text().len(), "Chat session created");
        Ok(session)
    }

    pub async fn new_chat(self: &Arc<Self>) -> Result<(), ChatServiceError> {
        self.dispatch(ChatEvent::NewChat).await?;
        Ok(())
    }

    /// Returns `false` when no such session exists.
    pub async fn select_session(
        self: &Arc<Self>,
        id: SessionId,
    ) -> Result<bool, ChatServiceError> {
        self.dispatch(ChatEvent::SelectSession(id)).await?;
        Ok(self.state.lock().await.active_session().map(ChatSession::id) == Some(id))
    }

    /// Returns `false` when no such session exists. A failed save keeps the
    /// session and its pending question.
    pub async fn delete_session(
        self: &Arc<Self>,
        id: SessionId,
    ) -> Result<bool, ChatServiceError> {
        if self.session(id).await.is_none() {
            return Ok(false);
        }
        self.dispatch(ChatEvent::DeleteSession(id)).await?;
        tracing::info!(session_id = %id, "Chat session deleted");
        Ok(true)
    }

    /// Asks the active session's document a question.
    ///
    /// Submission, inference and reconciliation all run on one spawned task,
    /// so a caller that stops waiting still gets its question answered or
    /// rolled back.
    #[tracing::instrument(skip_all)]
    pub async fn send_message(
        self: &Arc<Self>,
        text: String,
    ) -> Result<SendOutcome, ChatServiceError> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.submit_and_answer(text).await }).await?
    }

    /// Read-only summary of a session's document; history is left untouched.
    #[tracing::instrument(skip(self))]
    pub async fn summarize(
        &self,
        id: SessionId,
        question: Option<String>,
    ) -> Result<String, ChatServiceError> {
        let document_text = self
            .session(id)
            .await
            .map(|s| s.document_text().to_string())
            .ok_or(ChatServiceError::SessionNotFound(id))?;

        Ok(self
            .inference
            .summarize(&document_text, question.as_deref())
            .await?)
    }

    async fn submit_and_answer(&self, text: String) -> Result<SendOutcome, ChatServiceError> {
        let mut request = None;
        let mut notice = None;
        for effect in self.apply(ChatEvent::SubmitMessage { text }).await? {
            match effect {
                ChatEffect::RequestInference {
                    session_id,
                    request_id,
                    document_text,
                    question,
                } => request = Some((session_id, request_id, document_text, question)),
                ChatEffect::Notify(notification) => notice = Some(notification),
                _ => {}
            }
        }

        let Some((session_id, request_id, document_text, question)) = request else {
            return Ok(match notice {
                Some(notification) => SendOutcome::Busy(notification),
                None => SendOutcome::Ignored,
            });
        };

        let Some(token) = self.registered_token(session_id, request_id).await else {
            return Ok(SendOutcome::Cancelled);
        };

        self.run_exchange(session_id, request_id, document_text, question, token)
            .await
    }

    async fn run_exchange(
        &self,
        session_id: SessionId,
        request_id: RequestId,
        document_text: String,
        question: String,
        token: CancellationToken,
    ) -> Result<SendOutcome, ChatServiceError> {
        let result = tokio::select! {
            _ = token.cancelled() => None,
            result = self.inference.answer(&document_text, &question) => Some(result),
        };

        self.release_token(session_id, request_id).await;

        let Some(result) = result else {
            tracing::info!(session_id = %session_id, request_id, "Inference cancelled");
            return Ok(SendOutcome::Cancelled);
        };

        match result {
            Ok(answer) => {
                let effects = self
                    .apply(ChatEvent::InferenceSucceeded {
                        session_id,
                        request_id,
                        answer: answer.clone(),
                    })
                    .await?;
                Ok(if effects.is_empty() {
                    SendOutcome::Cancelled
                } else {
                    SendOutcome::Answered(Message::ai(answer))
                })
            }
            Err(e) => {
                let effects = self
                    .apply(ChatEvent::InferenceFailed {
                        session_id,
                        request_id,
                        reason: e.to_string(),
                    })
                    .await?;
                Ok(effects
                    .into_iter()
                    .find_map(|effect| match effect {
                        ChatEffect::Notify(notification) => Some(SendOutcome::Failed(notification)),
                        _ => None,
                    })
                    .unwrap_or(SendOutcome::Cancelled))
            }
        }
    }

    async fn registered_token(
        &self,
        session_id: SessionId,
        request_id: RequestId,
    ) -> Option<CancellationToken> {
        self.in_flight
            .lock()
            .await
            .get(&session_id)
            .filter(|(current, _)| *current == request_id)
            .map(|(_, token)| token.clone())
    }

    async fn release_token(&self, session_id: SessionId, request_id: RequestId) {
        let mut in_flight = self.in_flight.lock().await;
        let is_current = in_flight
            .get(&session_id)
            .is_some_and(|(current, _)| *current == request_id);
        if is_current {
            in_flight.remove(&session_id);
        }
    }

    async fn cancel(&self, session_id: SessionId, request_id: RequestId) {
        let in_flight = self.in_flight.lock().await;
        if let Some((current, token)) = in_flight.get(&session_id) {
            if *current == request_id {
                token.cancel();
            }
        }
    }

    /// Applies one event on its own task, so the transition and its save
    /// complete even when the caller is dropped.
    async fn dispatch(
        self: &Arc<Self>,
        event: ChatEvent,
    ) -> Result<Vec<ChatEffect>, ChatServiceError> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.apply(event).await }).await?
    }

    /// Applies one event and runs its effects while the state lock is held,
    /// so a cancellation can never overtake the registration of its request.
    ///
    /// The collection is saved before any other effect runs. When the save
    /// fails, a user action is undone in memory. An inference result is kept,
    /// with its request settled, and goes out with the next successful save.
    async fn apply(&self, event: ChatEvent) -> Result<Vec<ChatEffect>, ChatServiceError> {
        let keep_on_save_failure = matches!(
            event,
            ChatEvent::InferenceSucceeded { .. } | ChatEvent::InferenceFailed { .. }
        );

        let mut state = self.state.lock().await;
        let previous = (!keep_on_save_failure).then(|| state.clone());
        let (next, effects) = transition(std::mem::take(&mut *state), event);
        *state = next;

        if persists(&effects) {
            if let Err(e) = self.store.save(state.sessions()).await {
                tracing::error!(error = %e, "Failed to persist chat history");
                if let Some(previous) = previous {
                    *state = previous;
                }
                return Err(ChatServiceError::Persistence(e));
            }
        }

        for effect in &effects {
            match effect {
                ChatEffect::PersistSessions => {}
                ChatEffect::CancelInference {
                    session_id,
                    request_id,
                } => self.cancel(*session_id, *request_id).await,
                ChatEffect::Notify(notification) => {
                    tracing::info!(title = %notification.title, "Notification raised");
                }
                ChatEffect::RequestInference {
                    session_id,
                    request_id,
                    ..
                } => {
                    self.in_flight
                        .lock()
                        .await
                        .insert(*session_id, (*request_id, CancellationToken::new()));
                }
            }
        }

        Ok(effects)
    }
}

fn persists(effects: &[ChatEffect]) -> bool {
    effects
        .iter()
        .any(|effect| matches!(effect, ChatEffect::PersistSessions))
}

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] FileLoaderError),
    #[error("inference: {0}")]
    Inference(#[from] InferenceError),
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),
    #[error("session id already in use: {0}")]
    SessionIdConflict(SessionId),
    #[error("saving chat history failed: {0}")]
    Persistence(#[from] RepositoryError),
    #[error("chat task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
