use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::presentation::state::AppState;

use super::error::error_response;

pub const EXPORT_MISSING_HEADER: &str = "x-export-missing";

pub async fn export_handler(State(state): State<AppState>) -> Response {
    let archive = match state.export_service.export().await {
        Ok(archive) => archive,
        Err(e) => {
            tracing::error!(error = %e, "Source export failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    let mut response = (StatusCode::OK, archive.bytes).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/zip"));
    if let Ok(disposition) =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", archive.file_name))
    {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }
    headers.insert(EXPORT_MISSING_HEADER, HeaderValue::from(archive.missing.len()));

    response
}
