//! Review sentiment model
//!
//! Loads the two fitted artifacts (a TF-IDF vectorizer and a binary logistic
//! regression) and turns raw review text into a [`Label`].
//!
//! Both artifacts are JSON dumps of the fitted estimator attributes. They
//! are read once, validated against each other, and never change afterwards,
//! so a [`SentimentModel`] can be shared across threads without locking.
//!
//! ## Artifacts
//!
//! - `tfidf_vectorizer.json`: `vocabulary`, `idf`, analyzer settings
//!   (`lowercase`, `strip_accents`, `token_pattern`, `ngram_range`,
//!   `stop_words`, `analyzer`), `norm`, `use_idf`, `sublinear_tf`, `binary`.
//! - `logistic_regression_model.json`: `coef` (one row), `intercept` (one
//!   value), `classes` (two values, class `1` is positive).
//!
//! Missing files are a hard error; there is no fallback model.
//!
//! ## Quick example
//!
//! ```no_run
//! use model::{ModelConfig, SentimentModel};
//!
//! let model = SentimentModel::load(&ModelConfig::default())?;
//! let label = model.predict("An absolute joy from start to finish")?;
//! println!("{label}");
//! # Ok::<(), model::ModelError>(())
//! ```

pub mod config;
pub mod error;
pub mod types;

mod assets;
mod classifier;
mod inference;
mod normalize;
mod vectorizer;

pub use crate::assets::{ArtifactInfo, ArtifactKind};
pub use crate::classifier::{ClassifierArtifact, LogisticRegression};
pub use crate::config::{ModelConfig, DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};
pub use crate::error::ModelError;
pub use crate::inference::SentimentModel;
pub use crate::types::{Label, Prediction, SparseVector};
pub use crate::vectorizer::{Norm, TfidfVectorizer, VectorizerArtifact};
