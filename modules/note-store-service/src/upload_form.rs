//! Static HTML upload form handler.

use crate::routes::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

// GET /UploadForm.html
#[utoipa::path(get, path = "/UploadForm.html", tag = "Form",
    responses(
        (status = 200, description = "HTML form for creating notes", body = String,
            content_type = "text/html"),
        (status = 500, description = "Form could not be loaded"),
    ))]
pub async fn upload_form(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read_to_string(&state.config.upload_form).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            log::error!(
                "Failed to load upload form from {}: {}",
                state.config.upload_form.display(),
                e
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load HTML form").into_response()
        }
    }
}
