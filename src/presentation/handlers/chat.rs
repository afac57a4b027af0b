use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::SendOutcome;
use crate::domain::Message;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::{error_response, notification_response, service_error_response};

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct SendMessageResponse {
    pub message: Message,
}

/// Leaves the chat view without deleting anything.
pub async fn new_chat_handler(State(state): State<AppState>) -> Response {
    match state.chat_service.new_chat().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => service_error_response(e),
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn send_message_handler(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Response {
    tracing::debug!(question = %sanitize_prompt(&request.message), "Processing question");

    match state.chat_service.send_message(request.message).await {
        Ok(SendOutcome::Answered(message)) => {
            tracing::info!("Question answered");
            (StatusCode::OK, Json(SendMessageResponse { message })).into_response()
        }
        Ok(SendOutcome::Ignored) => error_response(
            StatusCode::BAD_REQUEST,
            "Message is empty or no chat session is active",
        ),
        Ok(SendOutcome::Busy(notification)) => {
            notification_response(StatusCode::CONFLICT, notification)
        }
        Ok(SendOutcome::Failed(notification)) => {
            notification_response(StatusCode::BAD_GATEWAY, notification)
        }
        Ok(SendOutcome::Cancelled) => error_response(
            StatusCode::GONE,
            "The chat session was removed before the answer arrived",
        ),
        Err(e) => service_error_response(e),
    }
}
