use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Maps a classifier class to a label: `1` is positive, anything else negative.
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            Label::Positive
        } else {
            Label::Negative
        }
    }

    /// Lowercase form used by the JSON API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
        }
    }

    /// Capitalized form used by the HTML page.
    pub fn title(&self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Negative => "Negative",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full inference output for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    /// Raw class reported by the classifier.
    pub class: i64,
    /// Logistic decision value, `coef · x + intercept`.
    pub score: f64,
    /// `sigmoid(score)`: probability of the second class.
    pub probability: f64,
}

/// One sparse row of the TF-IDF matrix.
///
/// `indices` are strictly increasing and every index is `< dim`; `values`
/// holds the weight at the matching position. Rows only come out of
/// [`TfidfVectorizer::transform`](crate::TfidfVectorizer::transform) or
/// [`SparseVector::zeros`], so callers cannot build one with an index past
/// `dim`:
///
/// ```compile_fail
/// let row = model::SparseVector::from_pairs(2, vec![(5, 1.0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SparseVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Builds a row from `(index, value)` pairs in any order. Later duplicates
    /// are summed into the first occurrence.
    pub(crate) fn from_pairs(dim: usize, mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_unstable_by_key(|(idx, _)| *idx);
        let mut indices: Vec<usize> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (idx, value) in pairs {
            debug_assert!(idx < dim, "feature index {idx} out of bounds for {dim}");
            if indices.last() == Some(&idx) {
                if let Some(last) = values.last_mut() {
                    *last += value;
                }
            } else {
                indices.push(idx);
                values.push(value);
            }
        }
        Self {
            dim,
            indices,
            values,
        }
    }

    /// An all-zero row.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Width of the row (vocabulary size).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Value at `idx`, zero when not stored.
    pub fn get(&self, idx: usize) -> f64 {
        self.indices
            .binary_search(&idx)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Iterates stored `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Dot product with a dense weight vector of the same width.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.iter().map(|(idx, value)| dense[idx] * value).sum()
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for (idx, value) in self.iter() {
            dense[idx] = value;
        }
        dense
    }
}
