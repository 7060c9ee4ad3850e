//! Binary logistic regression restored from a fitted artifact.

use serde::{Deserialize, Serialize};

use crate::types::SparseVector;
use crate::ModelError;

/// On-disk form of the classifier, shaped like the fitted estimator's
/// attributes: `coef` is `(1, n_features)`, `intercept` is `(1,)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierArtifact {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

/// Validated linear decision function over a TF-IDF row.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LogisticRegression {
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self, ModelError> {
        let ClassifierArtifact {
            coef,
            intercept,
            classes,
        } = artifact;

        let [weights]: [Vec<f64>; 1] = coef.try_into().map_err(|rows: Vec<Vec<f64>>| {
            ModelError::InvalidArtifact(format!(
                "expected a single coefficient row for a binary classifier, got {}",
                rows.len()
            ))
        })?;
        if weights.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "coefficient row is empty".into(),
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::InvalidArtifact(
                "coefficients contain non-finite values".into(),
            ));
        }

        let [intercept]: [f64; 1] = intercept.try_into().map_err(|values: Vec<f64>| {
            ModelError::InvalidArtifact(format!(
                "expected exactly one intercept, got {}",
                values.len()
            ))
        })?;
        if !intercept.is_finite() {
            return Err(ModelError::InvalidArtifact(
                "intercept is not finite".into(),
            ));
        }

        let classes: [i64; 2] = classes.try_into().map_err(|values: Vec<i64>| {
            ModelError::InvalidArtifact(format!(
                "expected exactly two classes, got {}",
                values.len()
            ))
        })?;
        if classes[0] == classes[1] {
            return Err(ModelError::InvalidArtifact(format!(
                "classes must be distinct, got {classes:?}"
            )));
        }

        Ok(Self {
            weights,
            intercept,
            classes,
        })
    }

    /// Parses and validates a JSON artifact.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: ClassifierArtifact = serde_json::from_slice(bytes)
            .map_err(|e| ModelError::Parse(format!("classifier: {e}")))?;
        Self::from_artifact(artifact)
    }

    /// Width of the coefficient row.
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    pub fn classes(&self) -> [i64; 2] {
        self.classes
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// `coef · x + intercept`.
    pub fn decision_function(&self, x: &SparseVector) -> Result<f64, ModelError> {
        if x.dim() != self.weights.len() {
            return Err(ModelError::Inference(format!(
                "feature width {} does not match classifier width {}",
                x.dim(),
                self.weights.len()
            )));
        }
        let score = x.dot(&self.weights) + self.intercept;
        if !score.is_finite() {
            return Err(ModelError::Inference(
                "decision score is not finite".into(),
            ));
        }
        Ok(score)
    }

    /// Probability of the second class.
    pub fn predict_proba(&self, x: &SparseVector) -> Result<f64, ModelError> {
        self.decision_function(x).map(sigmoid)
    }

    /// Second class when the decision score is strictly positive, else the first.
    pub fn predict(&self, x: &SparseVector) -> Result<i64, ModelError> {
        let score = self.decision_function(x)?;
        Ok(self.class_for(score))
    }

    pub(crate) fn class_for(&self, score: f64) -> i64 {
        if score > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        }
    }
}

pub(crate) fn sigmoid(score: f64) -> f64 {
    if score >= 0.0 {
        1.0 / (1.0 + (-score).exp())
    } else {
        let e = score.exp();
        e / (1.0 + e)
    }
}
