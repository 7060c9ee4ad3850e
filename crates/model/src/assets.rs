use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::{ModelConfig, ModelError};

/// Which of the two artifacts a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Classifier,
    Vectorizer,
}

/// Identity of a loaded artifact, surfaced in logs and readiness output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactInfo {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub sha256: String,
    pub size_bytes: u64,
}

#[derive(Debug)]
pub(crate) struct LoadedArtifact {
    pub(crate) info: ArtifactInfo,
    pub(crate) bytes: Vec<u8>,
}

#[derive(Debug)]
pub(crate) struct ArtifactFiles {
    pub(crate) classifier: LoadedArtifact,
    pub(crate) vectorizer: LoadedArtifact,
}

/// Reads both artifacts, failing before any read when either path is missing.
pub(crate) fn read_artifacts(cfg: &ModelConfig) -> Result<ArtifactFiles, ModelError> {
    let missing: Vec<String> = [&cfg.model_path, &cfg.vectorizer_path]
        .into_iter()
        .filter(|path| !path.exists())
        .map(|path| path.display().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ModelError::ArtifactNotFound(missing.join(", ")));
    }

    Ok(ArtifactFiles {
        classifier: read_artifact(&cfg.model_path, ArtifactKind::Classifier)?,
        vectorizer: read_artifact(&cfg.vectorizer_path, ArtifactKind::Vectorizer)?,
    })
}

fn read_artifact(path: &Path, kind: ArtifactKind) -> Result<LoadedArtifact, ModelError> {
    let bytes = fs::read(path)?;
    let info = ArtifactInfo {
        kind,
        path: path.to_path_buf(),
        sha256: sha256_hex(&bytes),
        size_bytes: bytes.len() as u64,
    };
    Ok(LoadedArtifact { info, bytes })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
