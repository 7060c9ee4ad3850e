use crate::routes::read_form_review;
use crate::state::ServerState;
use crate::telemetry::{record_prediction, record_prediction_error};
use crate::view::{render_index, Outcome};
use axum::extract::{Request, State};
use axum::response::Html;
use sentiment::{is_blank, predict_sentiment};
use std::sync::Arc;

pub const INVALID_REVIEW_TEXT: &str = "Please enter a valid review.";
pub const PREDICTION_FAILED_TEXT: &str = "An error occurred during prediction. Please try again.";

const ROUTE: &str = "home";

/// `GET /`: the empty form.
pub async fn index() -> Html<String> {
    render_index(None, Outcome::Empty)
}

/// `POST /`: classify the submitted review and render the result.
///
/// Always answers 200; failures are shown as a message on the page. A body
/// that is neither url-encoded nor multipart is treated as a missing review.
pub async fn submit(State(state): State<Arc<ServerState>>, request: Request) -> Html<String> {
    let review = match read_form_review(&state, request).await {
        Ok(review) => review,
        Err(err) => {
            tracing::warn!(error = %err, kind = err.kind(), "unreadable review form");
            record_prediction_error(ROUTE, err.kind());
            return render_index(None, Outcome::Error(PREDICTION_FAILED_TEXT));
        }
    };

    if is_blank(&review) {
        record_prediction_error(ROUTE, "invalid_review");
        return render_index(Some(review.as_str()), Outcome::Error(INVALID_REVIEW_TEXT));
    }

    match predict_sentiment(&state.model, &review) {
        Ok(prediction) => {
            tracing::debug!(
                label = %prediction.label,
                probability = prediction.probability,
                "review classified"
            );
            record_prediction(ROUTE, prediction.label);
            render_index(Some(review.as_str()), Outcome::Prediction(prediction.label))
        }
        Err(err) => {
            tracing::error!(error = %err, kind = err.kind(), "prediction failed");
            record_prediction_error(ROUTE, err.kind());
            render_index(Some(review.as_str()), Outcome::Error(PREDICTION_FAILED_TEXT))
        }
    }
}
