use crate::assets::{read_artifacts, ArtifactInfo};
use crate::classifier::{sigmoid, LogisticRegression};
use crate::types::{Label, Prediction, SparseVector};
use crate::vectorizer::TfidfVectorizer;
use crate::{ModelConfig, ModelError};

/// The vectorizer and classifier pair, frozen after load.
///
/// All methods take `&self`; wrap it in an `Arc` to share it between request
/// handlers.
#[derive(Debug, Clone)]
pub struct SentimentModel {
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
    artifacts: Vec<ArtifactInfo>,
}

impl SentimentModel {
    /// Loads both artifacts from disk.
    ///
    /// Fails with [`ModelError::ArtifactNotFound`] when either file is
    /// missing, and with a parse/validation error when either is unusable.
    pub fn load(cfg: &ModelConfig) -> Result<Self, ModelError> {
        let files = read_artifacts(cfg)?;
        let vectorizer = TfidfVectorizer::from_json_slice(&files.vectorizer.bytes)?;
        let classifier = LogisticRegression::from_json_slice(&files.classifier.bytes)?;

        let mut model = Self::new(vectorizer, classifier)?;
        model.artifacts = vec![files.classifier.info, files.vectorizer.info];

        for artifact in &model.artifacts {
            tracing::info!(
                kind = ?artifact.kind,
                path = %artifact.path.display(),
                sha256 = %artifact.sha256,
                size_bytes = artifact.size_bytes,
                "loaded sentiment artifact"
            );
        }
        tracing::debug!(
            n_features = model.n_features(),
            classes = ?model.classifier.classes(),
            "sentiment model ready"
        );

        Ok(model)
    }

    /// Pairs an in-memory vectorizer and classifier, checking that their
    /// widths agree.
    pub fn new(
        vectorizer: TfidfVectorizer,
        classifier: LogisticRegression,
    ) -> Result<Self, ModelError> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(ModelError::InvalidArtifact(format!(
                "classifier expects {} features but vectorizer produces {}",
                classifier.n_features(),
                vectorizer.n_features()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
            artifacts: Vec::new(),
        })
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    /// Files the model was loaded from; empty for models built in memory.
    pub fn artifacts(&self) -> &[ArtifactInfo] {
        &self.artifacts
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }

    /// TF-IDF row for `text`.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.vectorizer.transform(text)
    }

    /// Sentiment label for `text`. Deterministic for a given model.
    pub fn predict(&self, text: &str) -> Result<Label, ModelError> {
        self.predict_detailed(text).map(|p| p.label)
    }

    /// Label plus class, decision score and probability.
    pub fn predict_detailed(&self, text: &str) -> Result<Prediction, ModelError> {
        let features = self.transform(text);
        self.predict_features(&features)
    }

    /// Classifies an already-vectorized row.
    pub fn predict_features(&self, features: &SparseVector) -> Result<Prediction, ModelError> {
        let score = self.classifier.decision_function(features)?;
        let class = self.classifier.class_for(score);
        Ok(Prediction {
            label: Label::from_class(class),
            class,
            score,
            probability: sigmoid(score),
        })
    }
}
