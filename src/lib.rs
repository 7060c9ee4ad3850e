//! Workspace umbrella crate for the review sentiment classifier.
//!
//! This crate ties the text analyzer and the fitted model together so callers
//! can classify raw review text through a single entry point,
//! [`predict_sentiment`], which reports per-stage timings to an optional
//! process-wide [`InferenceMetrics`] recorder.

pub use canonical::{
    Analyzer, AnalyzerConfig, AnalyzerError, AnalyzerKind, StripAccents, Token, analyze,
    collapse_whitespace_runs, is_blank, tokenize,
};
pub use model::{
    ArtifactInfo, ArtifactKind, Label, ModelConfig, ModelError, Prediction, SentimentModel,
    SparseVector,
};

use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

/// The two stages every prediction passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InferenceStage {
    Vectorize,
    Classify,
}

impl InferenceStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            InferenceStage::Vectorize => "vectorize",
            InferenceStage::Classify => "classify",
        }
    }
}

impl fmt::Display for InferenceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics observer for inference stages.
pub trait InferenceMetrics: Send + Sync {
    /// Called after vectorization with the number of non-zero features.
    fn record_vectorize(&self, latency: Duration, nnz: usize);
    fn record_classify(&self, latency: Duration, result: Result<Label, &ModelError>);
}

/// Install or clear the global inference metrics recorder.
pub fn set_inference_metrics(recorder: Option<Arc<dyn InferenceMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn InferenceMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn InferenceMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn InferenceMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn InferenceMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_vectorize(self, nnz: usize) {
        self.recorder.record_vectorize(self.start.elapsed(), nnz);
    }

    fn record_classify(self, result: Result<Label, &ModelError>) {
        self.recorder.record_classify(self.start.elapsed(), result);
    }
}

/// Vectorize and classify `text` with `model`, timing each stage.
///
/// Produces the same result as [`SentimentModel::predict_detailed`]; the
/// stages are only split so an installed recorder can observe them.
pub fn predict_sentiment(model: &SentimentModel, text: &str) -> Result<Prediction, ModelError> {
    let vectorize_span = MetricsSpan::start();
    let features = model.transform(text);
    if let Some(span) = vectorize_span {
        span.record_vectorize(features.nnz());
    }

    let classify_span = MetricsSpan::start();
    let result = model.predict_features(&features);
    if let Some(span) = classify_span {
        span.record_classify(result.as_ref().map(|p| p.label));
    }

    match &result {
        Ok(prediction) => tracing::trace!(
            nnz = features.nnz(),
            score = prediction.score,
            label = %prediction.label,
            "review classified"
        ),
        Err(err) => tracing::debug!(error = %err, "review classification failed"),
    }
    result
}

/// Label-only shorthand for [`predict_sentiment`].
pub fn predict_label(model: &SentimentModel, text: &str) -> Result<Label, ModelError> {
    predict_sentiment(model, text).map(|p| p.label)
}
