//! Configuration types for the text analyzer.
//!
//! [`AnalyzerConfig`] mirrors the analysis attributes stored in a fitted
//! TF-IDF vectorizer artifact. Field names and defaults follow the exporting
//! side so an artifact that omits a field gets the same behavior it was
//! trained with.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{AnalyzerConfig, AnalyzerKind};
//!
//! let config = AnalyzerConfig::default();
//! assert_eq!(config.analyzer, AnalyzerKind::Word);
//! assert!(config.lowercase);
//! assert_eq!(config.ngram_range, (1, 1));
//! ```
//!
//! Bigram configuration:
//!
//! ```rust
//! use canonical::AnalyzerConfig;
//!
//! let config = AnalyzerConfig {
//!     ngram_range: (1, 2),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;

/// Token pattern used when the artifact does not carry one: runs of two or
/// more word characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Which unit the analyzer produces features from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    /// Word tokens and word n-grams.
    #[default]
    Word,
    /// Character n-grams over the whole (whitespace-collapsed) text.
    Char,
    /// Character n-grams taken only inside word boundaries, padded with spaces.
    CharWb,
}

/// Accent stripping applied after lowercasing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StripAccents {
    /// NFKD decomposition followed by removal of combining marks.
    Unicode,
    /// NFKD decomposition followed by removal of every non-ASCII character.
    Ascii,
}

/// Analysis settings for the TF-IDF vectorizer.
///
/// Cheap to clone and serde-compatible so it can be embedded directly in a
/// vectorizer artifact:
///
/// ```json
/// {
///   "analyzer": "word",
///   "lowercase": true,
///   "strip_accents": null,
///   "token_pattern": "(?u)\\b\\w\\w+\\b",
///   "ngram_range": [1, 2],
///   "stop_words": ["the", "a"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Feature unit.
    #[serde(default)]
    pub analyzer: AnalyzerKind,

    /// Lowercase the text before tokenizing.
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Optional accent stripping, applied after lowercasing.
    #[serde(default)]
    pub strip_accents: Option<StripAccents>,

    /// Token regex for the word analyzer. When the pattern has one capture
    /// group, the group is the token.
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Inclusive `(min_n, max_n)` n-gram range.
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Words removed before n-gram generation. Only applies to the word analyzer.
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerKind::default(),
            lowercase: true,
            strip_accents: None,
            token_pattern: default_token_pattern(),
            ngram_range: default_ngram_range(),
            stop_words: None,
        }
    }
}

impl AnalyzerConfig {
    /// Checks the settings that do not need compilation.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 {
            return Err(AnalyzerError::InvalidConfig(
                "ngram_range lower bound must be >= 1".into(),
            ));
        }
        if min_n > max_n {
            return Err(AnalyzerError::InvalidConfig(format!(
                "ngram_range lower bound {min_n} exceeds upper bound {max_n}"
            )));
        }
        if self.analyzer == AnalyzerKind::Word && self.token_pattern.is_empty() {
            return Err(AnalyzerError::InvalidConfig(
                "token_pattern must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// True when the word analyzer can use the built-in tokenizer instead of
    /// compiling `token_pattern`.
    pub fn uses_default_pattern(&self) -> bool {
        self.token_pattern == DEFAULT_TOKEN_PATTERN
    }
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}
