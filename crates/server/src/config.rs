use model::ModelConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable prefix, e.g. `REVIEW_SERVER__PORT=8000`.
pub const ENV_PREFIX: &str = "REVIEW_SERVER";

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Development mode: human-readable logs at debug level
    #[serde(default = "default_true")]
    pub debug: bool,

    /// Fitted classifier artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Fitted vectorizer artifact
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable permissive CORS
    #[serde(default)]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Replace raw error text in JSON 500 responses with a generic message
    #[serde(default)]
    pub redact_internal_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            debug: default_true(),
            model_path: default_model_path(),
            vectorizer_path: default_vectorizer_path(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: false,
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            redact_internal_errors: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional `server.{toml,yaml,json}` file and
    /// `REVIEW_SERVER__*` environment variables
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("server")
    }

    /// Like [`ServerConfig::load`] with a different config file stem.
    pub fn load_from(file_stem: &str) -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name(file_stem).required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if self.max_body_size_mb == 0 {
            anyhow::bail!("max_body_size_mb must be greater than zero");
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Artifact locations for the model loader
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model_path: self.model_path.clone(),
            vectorizer_path: self.vectorizer_path.clone(),
        }
    }

    /// Level used when `RUST_LOG` is unset. Debug mode raises the default
    /// `info` to `debug`; an explicit level is kept.
    pub fn effective_log_level(&self) -> &str {
        if self.debug && self.log_level == default_log_level() {
            "debug"
        } else {
            &self.log_level
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_model_path() -> PathBuf {
    PathBuf::from(model::DEFAULT_MODEL_PATH)
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from(model::DEFAULT_VECTORIZER_PATH)
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
