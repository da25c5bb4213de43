//! Shared types for the note store service and its HTTP clients.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

// =====================================================
// Domain Types
// =====================================================

/// A named plain-text note, as returned by `GET /notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Note {
    /// Note name (file basename without the `.txt` suffix)
    #[schema(example = "todo")]
    pub name: String,
    /// Note content
    #[schema(example = "buy milk")]
    pub text: String,
}

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /write`. Accepted as JSON or as form fields.
/// Missing and `null` fields both read as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WriteNoteRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "my_note")]
    pub note_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(example = "This is a new note.")]
    pub note: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// =====================================================
// Response Types
// =====================================================

/// JSON body sent with 500 responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn server_error(detail: impl ToString) -> Self {
        Self {
            message: "server error".to_string(),
            error: detail.to_string(),
        }
    }
}
