//! Axum route handlers for the note store API.

use crate::config::Config;
use crate::store::{NoteError, NoteStore};
use crate::submission::NoteSubmission;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use note_store_types::*;
use std::sync::Arc;

pub struct AppState {
    pub store: NoteStore,
    pub config: Config,
}

impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        match self {
            NoteError::InvalidName | NoteError::EmptyContent | NoteError::AlreadyExists => {
                log::warn!("Rejected request: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            NoteError::NotFound => {
                log::warn!("Rejected request: {}", self);
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            NoteError::Io(e) => {
                log::error!("Note storage failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::server_error(e)),
                )
                    .into_response()
            }
        }
    }
}

// GET /
#[utoipa::path(get, path = "/", tag = "Notes",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain"),
    ))]
pub async fn hello() -> &'static str {
    "Hello World"
}

// GET /notes
#[utoipa::path(get, path = "/notes", tag = "Notes",
    responses(
        (status = 200, description = "Every note in the cache directory", body = [Note]),
        (status = 500, description = "A note could not be read", body = ErrorResponse),
    ))]
pub async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>, NoteError> {
    let notes = state.store.list().await?;
    log::debug!(
        "Listing {} notes: {:?}",
        notes.len(),
        notes.iter().map(|n| n.name.as_str()).collect::<Vec<_>>()
    );
    Ok(Json(notes))
}

// GET /notes/{name}
#[utoipa::path(get, path = "/notes/{name}", tag = "Notes",
    params(("name" = String, Path, description = "Note name")),
    responses(
        (status = 200, description = "Note content", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid note name"),
        (status = 404, description = "Note not found"),
    ))]
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<String, NoteError> {
    state.store.get(&name).await
}

// PUT /notes/{name}
#[utoipa::path(put, path = "/notes/{name}", tag = "Notes",
    params(("name" = String, Path, description = "Note name")),
    request_body(content = String, content_type = "text/plain", description = "New note content"),
    responses(
        (status = 201, description = "Note updated"),
        (status = 400, description = "Invalid note name"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Server error", body = ErrorResponse),
    ))]
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: String,
) -> Result<(StatusCode, &'static str), NoteError> {
    state.store.update(&name, &body).await?;
    log::debug!("Updated note '{}' ({} bytes)", name, body.len());
    Ok((StatusCode::CREATED, "Note updated"))
}

// DELETE /notes/{name}
#[utoipa::path(delete, path = "/notes/{name}", tag = "Notes",
    params(("name" = String, Path, description = "Note name")),
    responses(
        (status = 200, description = "Note deleted"),
        (status = 400, description = "Invalid note name"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Server error", body = ErrorResponse),
    ))]
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<(StatusCode, &'static str), NoteError> {
    state.store.delete(&name).await?;
    log::debug!("Deleted note '{}'", name);
    Ok((StatusCode::OK, "Note deleted"))
}

// POST /write
#[utoipa::path(post, path = "/write", tag = "Notes",
    request_body = WriteNoteRequest,
    responses(
        (status = 201, description = "Note created"),
        (status = 400, description = "Malformed body, empty content, invalid name, \
            or a note with this name already exists"),
        (status = 500, description = "Server error", body = ErrorResponse),
    ))]
pub async fn write_note(
    State(state): State<Arc<AppState>>,
    NoteSubmission(req): NoteSubmission,
) -> Result<(StatusCode, &'static str), NoteError> {
    state.store.create(&req.note_name, &req.note).await?;
    log::debug!("Created note '{}'", req.note_name);
    Ok((StatusCode::CREATED, "Note created"))
}
