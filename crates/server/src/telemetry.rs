//! Prometheus wiring for prediction counters and per-stage inference timings.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sentiment::{InferenceMetrics, InferenceStage, Label, ModelError};
use std::time::Duration;

pub const PREDICTIONS_TOTAL: &str = "sentiment_predictions_total";
pub const PREDICTION_ERRORS_TOTAL: &str = "sentiment_prediction_errors_total";
pub const INFERENCE_STAGE_SECONDS: &str = "sentiment_inference_stage_seconds";

/// Install the process-wide Prometheus recorder.
///
/// Only one recorder can be installed per process; a second call fails.
pub fn install_prometheus() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|err| anyhow::anyhow!("failed to install Prometheus recorder: {err}"))?;

    metrics::describe_counter!(PREDICTIONS_TOTAL, "Successful predictions by route and label");
    metrics::describe_counter!(
        PREDICTION_ERRORS_TOTAL,
        "Failed prediction requests by route and error kind"
    );
    metrics::describe_histogram!(
        INFERENCE_STAGE_SECONDS,
        metrics::Unit::Seconds,
        "Time spent in each inference stage"
    );

    Ok(handle)
}

pub fn record_prediction(route: &'static str, label: Label) {
    metrics::counter!(PREDICTIONS_TOTAL, "route" => route, "label" => label.as_str()).increment(1);
}

pub fn record_prediction_error(route: &'static str, kind: &'static str) {
    metrics::counter!(PREDICTION_ERRORS_TOTAL, "route" => route, "kind" => kind).increment(1);
}

/// Forwards stage timings from [`sentiment::predict_sentiment`] to the
/// `metrics` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrometheusInferenceMetrics;

impl PrometheusInferenceMetrics {
    fn record_stage(stage: InferenceStage, latency: Duration) {
        metrics::histogram!(INFERENCE_STAGE_SECONDS, "stage" => stage.as_str())
            .record(latency.as_secs_f64());
    }
}

impl InferenceMetrics for PrometheusInferenceMetrics {
    fn record_vectorize(&self, latency: Duration, _nnz: usize) {
        Self::record_stage(InferenceStage::Vectorize, latency);
    }

    fn record_classify(&self, latency: Duration, _result: Result<Label, &ModelError>) {
        Self::record_stage(InferenceStage::Classify, latency);
    }
}
