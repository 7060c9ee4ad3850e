use crate::error::{ServerError, ServerResult};
use crate::routes::{media_type, read_form_review};
use crate::state::ServerState;
use crate::telemetry::{record_prediction, record_prediction_error};
use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use model::Label;
use sentiment::{is_blank, predict_sentiment};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const ROUTE: &str = "predict";

/// Successful `/predict` response
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    /// `"positive"` or `"negative"`
    pub sentiment_prediction: Label,
}

/// `POST /predict`
///
/// Reads `review_text` from a JSON object when the request is JSON, else
/// from a url-encoded or multipart form. Blank reviews are a 400; anything
/// else that goes wrong, an unreadable or oversized body included, is a 500
/// carrying the error message.
pub async fn predict(State(state): State<Arc<ServerState>>, request: Request) -> Response {
    match classify_request(&state, request).await {
        Ok(label) => {
            record_prediction(ROUTE, label);
            Json(PredictResponse {
                sentiment_prediction: label,
            })
            .into_response()
        }
        Err(err) => {
            record_prediction_error(ROUTE, err.kind());
            if err.status_code().is_server_error() {
                tracing::error!(error = %err, kind = err.kind(), "prediction request failed");
            } else {
                tracing::debug!(error = %err, kind = err.kind(), "prediction request rejected");
            }

            if state.config.redact_internal_errors {
                err.redact().into_response()
            } else {
                err.into_response()
            }
        }
    }
}

async fn classify_request(state: &Arc<ServerState>, request: Request) -> ServerResult<Label> {
    let review = read_review(state, request).await?;
    if is_blank(&review) {
        return Err(ServerError::InvalidReview);
    }
    Ok(predict_sentiment(&state.model, &review)?.label)
}

async fn read_review(state: &Arc<ServerState>, request: Request) -> ServerResult<String> {
    if is_json_request(request.headers()) {
        let body = Bytes::from_request(request, state).await?;
        return review_from_json(&body);
    }

    read_form_review(state, request).await
}

/// `application/json` or any `application/*+json` media type.
pub(crate) fn is_json_request(headers: &HeaderMap) -> bool {
    let Some(mime) = media_type(headers) else {
        return false;
    };

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Pull `review_text` out of a JSON body. A missing field reads as empty;
/// a non-object body or a non-string field is malformed.
pub(crate) fn review_from_json(body: &[u8]) -> ServerResult<String> {
    let value: Value = serde_json::from_slice(body)?;
    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(ServerError::MalformedPayload(format!(
                "JSON body must be an object, got {}",
                json_type(&other)
            )))
        }
    };

    match fields.remove("review_text") {
        None => Ok(String::new()),
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(ServerError::MalformedPayload(format!(
            "review_text must be a string, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
