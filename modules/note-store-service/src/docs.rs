//! OpenAPI document and Swagger UI. The document is derived from the
//! `#[utoipa::path]` annotations on the same handlers the router mounts.

use crate::{routes, upload_form};
use note_store_types::{ErrorResponse, Note, WriteNoteRequest};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Note Store API",
        version = "1.0.0",
        description = "Plain-text notes stored as one file per note"
    ),
    paths(
        routes::hello,
        routes::list_notes,
        routes::get_note,
        routes::update_note,
        routes::delete_note,
        routes::write_note,
        upload_form::upload_form,
    ),
    components(schemas(Note, WriteNoteRequest, ErrorResponse)),
    tags(
        (name = "Notes", description = "Note CRUD"),
        (name = "Form", description = "Browser upload form"),
    )
)]
pub struct ApiDoc;

/// Interactive documentation at `/docs`, raw document at [`OPENAPI_JSON_PATH`].
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
