//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `home`: the HTML review form at `/`
//! - `predict`: the JSON prediction API at `/predict`
//! - `health`: liveness, readiness, and Prometheus metrics

pub mod health;
pub mod home;
pub mod predict;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::FormRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Form;
use std::sync::Arc;

/// Form field carrying the review on both routes.
pub const REVIEW_FIELD: &str = "review_text";

/// Reads `review_text` from a form body, url-encoded or multipart.
///
/// The first occurrence wins when the field repeats; a missing field and a
/// body of any other content type both read as an empty review. Multipart
/// file parts are skipped.
pub(crate) async fn read_form_review(
    state: &Arc<ServerState>,
    request: Request,
) -> ServerResult<String> {
    if is_multipart_request(request.headers()) {
        let mut multipart = Multipart::from_request(request, state).await?;
        while let Some(field) = multipart.next_field().await? {
            if field.name() == Some(REVIEW_FIELD) && field.file_name().is_none() {
                return Ok(field.text().await?);
            }
        }
        return Ok(String::new());
    }

    match Form::<Vec<(String, String)>>::from_request(request, state).await {
        Ok(Form(pairs)) => Ok(first_review(pairs)),
        Err(FormRejection::InvalidFormContentType(_)) => Ok(String::new()),
        Err(rejection) => Err(rejection.into()),
    }
}

fn first_review(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find(|(key, _)| key == REVIEW_FIELD)
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// Media type of the request, lowercased and without parameters.
pub(crate) fn media_type(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    Some(mime.to_ascii_lowercase())
}

fn is_multipart_request(headers: &HeaderMap) -> bool {
    media_type(headers).is_some_and(|mime| mime == "multipart/form-data")
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
