use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{ChatServiceError, Notification};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            notification: None,
        }),
    )
        .into_response()
}

pub fn notification_response(status: StatusCode, notification: Notification) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: notification.description.clone(),
            notification: Some(notification),
        }),
    )
        .into_response()
}

/// Fallback mapping for chat failures the handler has no specific answer for.
pub fn service_error_response(error: ChatServiceError) -> Response {
    match error {
        ChatServiceError::Persistence(e) => {
            tracing::error!(error = %e, "Chat history was not saved");
            notification_response(StatusCode::INTERNAL_SERVER_ERROR, Notification::save_failed())
        }
        e => {
            tracing::error!(error = %e, "Chat request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
