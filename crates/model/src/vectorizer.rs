//! TF-IDF vectorizer restored from a fitted artifact.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use canonical::{Analyzer, AnalyzerConfig};

use crate::normalize::{l1_normalize_in_place, l2_normalize_in_place};
use crate::types::SparseVector;
use crate::ModelError;

/// Row normalization applied after IDF weighting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of the vectorizer: the fitted attributes, as exported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorizerArtifact {
    /// Term to column index.
    pub vocabulary: FxHashMap<String, usize>,
    /// Per-column inverse document frequency. Required when `use_idf` is set.
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    /// Analysis settings the vocabulary was built with.
    #[serde(flatten)]
    pub analyzer: AnalyzerConfig,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default = "default_true")]
    pub use_idf: bool,
    /// Replace a term count `tf` with `1 + ln(tf)`.
    #[serde(default)]
    pub sublinear_tf: bool,
    /// Clip term counts to 1.
    #[serde(default)]
    pub binary: bool,
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_true() -> bool {
    true
}

/// A validated, ready-to-use TF-IDF transform.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: FxHashMap<String, usize>,
    idf: Option<Vec<f64>>,
    analyzer: Analyzer,
    norm: Option<Norm>,
    sublinear_tf: bool,
    binary: bool,
}

impl TfidfVectorizer {
    /// Validates an artifact and compiles its analyzer.
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, ModelError> {
        let n_features = artifact.vocabulary.len();
        if n_features == 0 {
            return Err(ModelError::InvalidArtifact(
                "vectorizer vocabulary is empty".into(),
            ));
        }

        let mut seen = vec![false; n_features];
        for (term, &idx) in &artifact.vocabulary {
            if idx >= n_features {
                return Err(ModelError::InvalidArtifact(format!(
                    "vocabulary index {idx} for term {term:?} out of range for {n_features} features"
                )));
            }
            if std::mem::replace(&mut seen[idx], true) {
                return Err(ModelError::InvalidArtifact(format!(
                    "vocabulary index {idx} assigned to more than one term"
                )));
            }
        }

        let idf = if artifact.use_idf {
            let idf = artifact.idf.ok_or_else(|| {
                ModelError::InvalidArtifact("use_idf is set but idf is missing".into())
            })?;
            if idf.len() != n_features {
                return Err(ModelError::InvalidArtifact(format!(
                    "idf length {} does not match vocabulary size {n_features}",
                    idf.len()
                )));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(ModelError::InvalidArtifact(
                    "idf contains non-finite values".into(),
                ));
            }
            Some(idf)
        } else {
            None
        };

        let analyzer = Analyzer::new(artifact.analyzer)?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf,
            analyzer,
            norm: artifact.norm,
            sublinear_tf: artifact.sublinear_tf,
            binary: artifact.binary,
        })
    }

    /// Parses and validates a JSON artifact.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: VectorizerArtifact = serde_json::from_slice(bytes)
            .map_err(|e| ModelError::Parse(format!("vectorizer: {e}")))?;
        Self::from_artifact(artifact)
    }

    /// Number of output columns (vocabulary size).
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column of `term`, if it is in the vocabulary.
    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Maps a text to its TF-IDF row. Terms outside the vocabulary are
    /// ignored, so an input with no known terms gives an all-zero row.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: FxHashMap<usize, f64> = FxHashMap::default();
        for term in self.analyzer.analyze(text) {
            if let Some(idx) = self.feature_index(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row = SparseVector::from_pairs(self.n_features(), counts.into_iter().collect());
        let indices = row.indices().to_vec();
        let values = row.values_mut();

        for (value, idx) in values.iter_mut().zip(indices) {
            if self.binary {
                *value = 1.0;
            }
            if self.sublinear_tf {
                *value = value.ln() + 1.0;
            }
            if let Some(idf) = &self.idf {
                *value *= idf[idx];
            }
        }

        match self.norm {
            Some(Norm::L2) => l2_normalize_in_place(values),
            Some(Norm::L1) => l1_normalize_in_place(values),
            None => {}
        }

        row
    }
}
