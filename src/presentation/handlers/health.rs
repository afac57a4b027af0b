use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub session_count: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session_count = state.chat_service.snapshot().await.sessions().len();

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            session_count,
        }),
    )
}
