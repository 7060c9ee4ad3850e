use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the classifier artifact, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "logistic_regression_model.json";

/// Default location of the vectorizer artifact, relative to the working directory.
pub const DEFAULT_VECTORIZER_PATH: &str = "tfidf_vectorizer.json";

/// Where the two artifacts live.
///
/// # Example
/// ```
/// use model::ModelConfig;
/// use std::path::PathBuf;
///
/// let cfg = ModelConfig {
///     model_path: PathBuf::from("/srv/models/logistic_regression_model.json"),
///     ..Default::default()
/// };
/// assert_eq!(cfg.vectorizer_path, PathBuf::from("tfidf_vectorizer.json"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelConfig {
    /// Logistic regression artifact (`coef`, `intercept`, `classes`).
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// TF-IDF vectorizer artifact (`vocabulary`, `idf`, analyzer settings).
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            vectorizer_path: default_vectorizer_path(),
        }
    }
}

impl ModelConfig {
    /// Both artifacts inside `dir`, using the default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            model_path: dir.join(DEFAULT_MODEL_PATH),
            vectorizer_path: dir.join(DEFAULT_VECTORIZER_PATH),
        }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from(DEFAULT_VECTORIZER_PATH)
}
