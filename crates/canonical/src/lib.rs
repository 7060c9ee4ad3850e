//! Review sentiment text analysis layer.
//!
//! This crate turns raw review text into the terms a TF-IDF vectorizer
//! counts. It reproduces the analyzer a fitted vectorizer artifact was trained
//! with, so the same settings give the same terms the model saw in training.
//!
//! ## What we do
//!
//! - Lowercasing and optional accent stripping (NFKD based)
//! - Word tokenization: runs of two or more word characters by default, or a
//!   custom token regex
//! - Stop word removal and word n-grams
//! - Character n-grams (`char`) and word-bounded character n-grams (`char_wb`)
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text and config give
//! the same terms on any machine.
//!
//! ```rust
//! use canonical::{Analyzer, AnalyzerConfig};
//!
//! let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
//! assert_eq!(analyzer.analyze("An AMAZING film!"), vec!["an", "amazing", "film"]);
//! ```

mod accents;
mod config;
mod error;
mod pipeline;
mod token;
mod whitespace;

pub use crate::config::{AnalyzerConfig, AnalyzerKind, StripAccents, DEFAULT_TOKEN_PATTERN};
pub use crate::error::AnalyzerError;
pub use crate::pipeline::{analyze, Analyzer};
pub use crate::token::{tokenize, Token};
pub use crate::whitespace::{collapse_whitespace_runs, is_blank};
