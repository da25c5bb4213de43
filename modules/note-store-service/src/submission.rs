//! Extractor for `POST /write` bodies. Browsers post the upload form as
//! `multipart/form-data` or urlencoded fields; API clients send JSON.
//! Any other body carries no note fields at all.

use axum::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{StatusCode, header};
use axum::{Form, Json};
use note_store_types::WriteNoteRequest;

pub struct NoteSubmission(pub WriteNoteRequest);

type SubmissionRejection = (StatusCode, String);

fn bad_request(detail: String) -> SubmissionRejection {
    log::warn!("Rejected note submission: {}", detail);
    (StatusCode::BAD_REQUEST, detail)
}

#[async_trait]
impl<S> FromRequest<S> for NoteSubmission
where
    S: Send + Sync,
{
    type Rejection = SubmissionRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<WriteNoteRequest>::from_request(req, state)
                .await
                .map_err(|e| bad_request(e.body_text()))?;
            return Ok(Self(body));
        }

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| bad_request(e.body_text()))?;
            return read_multipart(multipart).await.map(Self);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<WriteNoteRequest>::from_request(req, state)
                .await
                .map_err(|e| bad_request(e.body_text()))?;
            return Ok(Self(body));
        }

        Ok(Self(WriteNoteRequest::default()))
    }
}

async fn read_multipart(
    mut multipart: Multipart,
) -> Result<WriteNoteRequest, SubmissionRejection> {
    let mut body = WriteNoteRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(e.body_text()))?
    {
        let target = match field.name() {
            Some("note_name") => &mut body.note_name,
            Some("note") => &mut body.note,
            _ => continue,
        };
        *target = field
            .text()
            .await
            .map_err(|e| bad_request(format!("Invalid form field: {}", e.body_text())))?;
    }

    Ok(body)
}
