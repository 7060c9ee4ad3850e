use thiserror::Error;

/// Errors that can occur while building a text analyzer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("invalid analyzer configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid token pattern `{pattern}`: {reason}")]
    InvalidTokenPattern { pattern: String, reason: String },
}
