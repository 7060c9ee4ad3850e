use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{BytesRejection, FormRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use model::ModelError;
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Message returned by `/predict` for an absent or blank review.
pub const INVALID_REVIEW_MESSAGE: &str = "Please provide a valid review.";

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{}", INVALID_REVIEW_MESSAGE)]
    InvalidReview,

    /// Body could not be read as the review payload the client announced,
    /// including bodies over the size limit.
    #[error("{0}")]
    MalformedPayload(String),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("Internal server error")]
    Redacted,

    #[error("Metrics endpoint disabled")]
    MetricsDisabled,

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidReview => StatusCode::BAD_REQUEST,
            ServerError::MetricsDisabled | ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::MalformedPayload(_) | ServerError::Model(_) | ServerError::Redacted => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short machine-readable kind, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::InvalidReview => "invalid_review",
            ServerError::MalformedPayload(_) => "malformed_payload",
            ServerError::Model(err) => err.kind(),
            ServerError::Redacted => "internal",
            ServerError::MetricsDisabled => "metrics_disabled",
            ServerError::NotFound => "not_found",
        }
    }

    /// Hide the detail of server-side failures; client errors pass through.
    pub fn redact(self) -> Self {
        if self.status_code().is_server_error() {
            ServerError::Redacted
        } else {
            self
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::MalformedPayload(format!("Failed to decode JSON object: {err}"))
    }
}

impl From<BytesRejection> for ServerError {
    fn from(rejection: BytesRejection) -> Self {
        ServerError::MalformedPayload(rejection.body_text())
    }
}

impl From<FormRejection> for ServerError {
    fn from(rejection: FormRejection) -> Self {
        ServerError::MalformedPayload(rejection.body_text())
    }
}

impl From<MultipartRejection> for ServerError {
    fn from(rejection: MultipartRejection) -> Self {
        ServerError::MalformedPayload(rejection.body_text())
    }
}

impl From<MultipartError> for ServerError {
    fn from(err: MultipartError) -> Self {
        ServerError::MalformedPayload(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_review_is_client_error() {
        let err = ServerError::InvalidReview;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Please provide a valid review.");
    }

    #[test]
    fn model_errors_keep_their_message() {
        let err = ServerError::from(ModelError::Inference("decision score is not finite".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("decision score is not finite"));
        assert_eq!(err.kind(), "inference");
    }

    #[test]
    fn json_errors_are_server_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ServerError::from(json_err);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Failed to decode JSON object"));
    }

    #[test]
    fn redact_hides_server_errors_only() {
        let err = ServerError::MalformedPayload("secret detail".into()).redact();
        assert!(matches!(err, ServerError::Redacted));
        assert_eq!(err.to_string(), "Internal server error");

        let err = ServerError::InvalidReview.redact();
        assert!(matches!(err, ServerError::InvalidReview));
    }

    #[test]
    fn unreadable_bodies_are_server_errors() {
        let err = ServerError::MalformedPayload("length limit exceeded".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), "malformed_payload");
        assert_eq!(err.to_string(), "length limit exceeded");
    }

    #[test]
    fn not_found_message() {
        assert_eq!(ServerError::NotFound.to_string(), "Not found");
        assert_eq!(ServerError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }
}
