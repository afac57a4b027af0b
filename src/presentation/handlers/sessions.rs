use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::{ChatServiceError, ChatState, Notification};
use crate::domain::{ChatSession, SessionId};
use crate::presentation::state::AppState;

use super::error::{error_response, notification_response, service_error_response};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: SessionId,
    pub file_name: String,
    pub message_count: usize,
    pub is_loading: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSessionsResponse {
    pub sessions: Vec<SessionSummary>,
    pub active_session_id: Option<SessionId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: ChatSession,
    pub is_active: bool,
    pub is_loading: bool,
}

impl SessionResponse {
    fn from_state(state: &ChatState, session: ChatSession) -> Self {
        let id = session.id();
        Self {
            is_active: state.active_session().map(ChatSession::id) == Some(id),
            is_loading: state.is_loading(id),
            session,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct SummaryRequest {
    pub question: Option<String>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

pub async fn list_sessions_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.chat_service.snapshot().await;
    let sessions = snapshot
        .sessions()
        .iter()
        .map(|s| SessionSummary {
            id: s.id(),
            file_name: s.file_name().to_string(),
            message_count: s.messages().len(),
            is_loading: snapshot.is_loading(s.id()),
        })
        .collect();

    Json(ListSessionsResponse {
        sessions,
        active_session_id: snapshot.active_session().map(ChatSession::id),
    })
}

#[tracing::instrument(skip(state, multipart))]
pub async fn create_session_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Upload request with no file");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read multipart: {}", e),
            );
        }
    };

    let filename = field.file_name().unwrap_or("untitled.txt").to_string();

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return error_response(StatusCode::BAD_REQUEST, format!("Failed to read file: {}", e));
        }
    };

    let max_bytes = state.settings.upload.max_file_size_bytes();
    if data.len() > max_bytes {
        tracing::warn!(bytes = data.len(), max_bytes, "Upload too large");
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("File exceeds {} MB", state.settings.upload.max_file_size_mb),
        );
    }

    tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

    match state.chat_service.upload(filename, &data).await {
        Ok(session) => {
            let snapshot = state.chat_service.snapshot().await;
            (
                StatusCode::CREATED,
                Json(SessionResponse::from_state(&snapshot, session)),
            )
                .into_response()
        }
        Err(ChatServiceError::Extraction(e)) => {
            tracing::warn!(error = %e, "Document extraction failed");
            notification_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                Notification::extraction_failed(),
            )
        }
        Err(e) => service_error_response(e),
    }
}

pub async fn get_session_handler(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Response {
    let snapshot = state.chat_service.snapshot().await;
    match snapshot.session(id).cloned() {
        Some(session) => Json(SessionResponse::from_state(&snapshot, session)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, format!("Session {} not found", id)),
    }
}

pub async fn delete_session_handler(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Response {
    match state.chat_service.delete_session(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, format!("Session {} not found", id)),
        Err(e) => service_error_response(e),
    }
}

pub async fn select_session_handler(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Response {
    match state.chat_service.select_session(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, format!("Session {} not found", id)),
        Err(e) => service_error_response(e),
    }
}

/// The body is optional; `{"question": "..."}` focuses the summary.
#[tracing::instrument(skip(state, body))]
pub async fn summarize_session_handler(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    body: Bytes,
) -> Response {
    let request = if body.is_empty() {
        SummaryRequest::default()
    } else {
        match serde_json::from_slice::<SummaryRequest>(&body) {
            Ok(request) => request,
            Err(e) => {
                return error_response(StatusCode::BAD_REQUEST, format!("Invalid body: {}", e));
            }
        }
    };
    let question = request.question;

    match state.chat_service.summarize(id, question).await {
        Ok(summary) => Json(SummaryResponse { summary }).into_response(),
        Err(ChatServiceError::SessionNotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, format!("Session {} not found", id))
        }
        Err(e) => {
            tracing::error!(error = %e, "Summary failed");
            notification_response(StatusCode::BAD_GATEWAY, Notification::inference_failed())
        }
    }
}
