use std::io;
use thiserror::Error;

use canonical::AnalyzerError;

/// Errors surfaced while loading artifacts or running inference.
#[derive(Debug, Error)]
pub enum ModelError {
    /// One or both artifact files do not exist.
    #[error("artifact file not found: {0}")]
    ArtifactNotFound(String),
    /// An artifact exists but is not valid JSON for its schema.
    #[error("failed to parse artifact: {0}")]
    Parse(String),
    /// An artifact parsed but its contents are inconsistent.
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),
    /// The vectorizer's analyzer settings cannot be compiled.
    #[error("analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),
    /// Low-level IO failures while reading artifacts.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// Vectorization or classification failed for a specific input.
    #[error("inference failure: {0}")]
    Inference(String),
}

impl ModelError {
    /// Short machine-readable name, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            ModelError::ArtifactNotFound(_) => "artifact_not_found",
            ModelError::Parse(_) => "parse",
            ModelError::InvalidArtifact(_) => "invalid_artifact",
            ModelError::Analyzer(_) => "analyzer",
            ModelError::Io(_) => "io",
            ModelError::Inference(_) => "inference",
        }
    }
}
