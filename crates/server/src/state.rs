use crate::config::ServerConfig;
use crate::error::ServerResult;
use metrics_exporter_prometheus::PrometheusHandle;
use model::SentimentModel;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Loaded vectorizer and classifier (read-only, shared across requests)
    pub model: Arc<SentimentModel>,

    /// Prometheus render handle; `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state, loading both artifacts from the configured
    /// paths. A missing or invalid artifact is an error here, so the server
    /// never starts listening without a model.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let model = SentimentModel::load(&config.model_config())?;
        Ok(Self::with_model(config, Arc::new(model)))
    }

    /// State around an already-loaded model.
    pub fn with_model(config: ServerConfig, model: Arc<SentimentModel>) -> Self {
        Self {
            config: Arc::new(config),
            model,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}
