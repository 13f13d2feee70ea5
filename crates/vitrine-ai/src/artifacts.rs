//! Loading of the fitted artifact bundle from disk.
//!
//! A serving process needs four files in the artifact directory:
//! `classifier.json`, `scaler.json`, `label_encoder.json` and `meta.json`.
//! All are training exports; the bundle is loaded once at startup and never
//! reloaded.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use vitrine_core::{MetaError, MetaRecord};

use crate::{LabelCodec, SoftmaxClassifier, StandardScaler};

pub const CLASSIFIER_FILE: &str = "classifier.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const LABELS_FILE: &str = "label_encoder.json";
pub const META_FILE: &str = "meta.json";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact not found: {0} — place the training exports in the artifact directory")]
    Missing(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Meta(#[from] MetaError),
}

/// The four fitted artifacts, immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub classifier: SoftmaxClassifier,
    pub scaler: StandardScaler,
    pub labels: LabelCodec,
    pub meta: MetaRecord,
}

impl ArtifactBundle {
    /// Load the bundle from an artifact directory.
    ///
    /// All four paths are checked for existence before anything is parsed,
    /// so a missing file is reported as such rather than as a parse failure.
    /// The meta record must name the embedding model the artifacts were
    /// trained with.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let classifier_path = dir.join(CLASSIFIER_FILE);
        let scaler_path = dir.join(SCALER_FILE);
        let labels_path = dir.join(LABELS_FILE);
        let meta_path = dir.join(META_FILE);

        for path in [&classifier_path, &scaler_path, &labels_path, &meta_path] {
            if !path.is_file() {
                return Err(ArtifactError::Missing(path.clone()));
            }
        }

        let classifier: SoftmaxClassifier = read_json(&classifier_path)?;
        let scaler: StandardScaler = read_json(&scaler_path)?;
        let labels: LabelCodec = read_json(&labels_path)?;
        let meta: MetaRecord = read_json(&meta_path)?;

        let model = meta.embedding_model_name()?;
        info!(model, classes = labels.len(), "loaded artifact bundle");

        Ok(Self {
            classifier,
            scaler,
            labels,
            meta,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_artifacts(dir: &Path) {
        fs::write(
            dir.join(CLASSIFIER_FILE),
            r#"{"coef": [[1.0, 0.0], [0.0, 1.0]], "intercept": [0.0, 0.0]}"#,
        )
        .unwrap();
        fs::write(
            dir.join(SCALER_FILE),
            r#"{"mean": [0.0, 0.0], "scale": [1.0, 1.0]}"#,
        )
        .unwrap();
        fs::write(
            dir.join(LABELS_FILE),
            r#"{"classes": ["festa", "inverno"]}"#,
        )
        .unwrap();
        fs::write(
            dir.join(META_FILE),
            r#"{"embedding_model_name": "all-MiniLM-L6-v2"}"#,
        )
        .unwrap();
    }

    #[test]
    fn loads_complete_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());

        let bundle = ArtifactBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.classifier.n_classes(), 2);
        assert_eq!(bundle.scaler.dim(), Some(2));
        assert_eq!(bundle.labels.len(), 2);
        assert_eq!(
            bundle.meta.embedding_model_name().unwrap(),
            "all-MiniLM-L6-v2"
        );
    }

    #[test]
    fn reports_first_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        fs::remove_file(dir.path().join(CLASSIFIER_FILE)).unwrap();
        fs::remove_file(dir.path().join(META_FILE)).unwrap();

        // Both files are gone; the error names the classifier, checked first.
        match ArtifactBundle::load(dir.path()).unwrap_err() {
            ArtifactError::Missing(path) => {
                assert!(path.ends_with(CLASSIFIER_FILE), "got {path:?}")
            }
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn missing_labels_file_halts_load() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        fs::remove_file(dir.path().join(LABELS_FILE)).unwrap();

        assert!(matches!(
            ArtifactBundle::load(dir.path()).unwrap_err(),
            ArtifactError::Missing(_)
        ));
    }

    #[test]
    fn unparseable_artifact_names_its_path() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        fs::write(dir.path().join(SCALER_FILE), "not json").unwrap();

        match ArtifactBundle::load(dir.path()).unwrap_err() {
            ArtifactError::Parse { path, .. } => {
                assert!(path.ends_with(SCALER_FILE))
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn meta_without_model_name_halts_load() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        fs::write(dir.path().join(META_FILE), r#"{"train_rows": 12}"#).unwrap();

        assert!(matches!(
            ArtifactBundle::load(dir.path()).unwrap_err(),
            ArtifactError::Meta(MetaError::MissingKey("embedding_model_name"))
        ));
    }

    #[test]
    fn meta_extras_survive_loading() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        fs::write(
            dir.path().join(META_FILE),
            r#"{"embedding_model_name": "all-MiniLM-L6-v2", "exported_at": "2026-05-12"}"#,
        )
        .unwrap();

        let bundle = ArtifactBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.meta.extra["exported_at"], "2026-05-12");
    }
}
