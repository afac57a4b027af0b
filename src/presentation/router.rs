use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_session_handler, delete_session_handler, export_handler, get_session_handler,
    health_handler, list_sessions_handler, new_chat_handler, select_session_handler,
    send_message_handler, summarize_session_handler,
};
use crate::presentation::state::AppState;

/// Headroom for multipart framing on top of the file size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.settings.upload.max_file_size_bytes() + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/sessions",
            get(list_sessions_handler).post(create_session_handler),
        )
        .route(
            "/api/v1/sessions/{id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route("/api/v1/sessions/{id}/select", post(select_session_handler))
        .route(
            "/api/v1/sessions/{id}/summary",
            post(summarize_session_handler),
        )
        .route("/api/v1/chat/new", post(new_chat_handler))
        .route("/api/v1/chat/messages", post(send_message_handler))
        .route("/api/v1/export", get(export_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
