//! Per-request prediction pipeline: dimension check, scale, classify, rank,
//! decode.

use std::cmp::Ordering;

use thiserror::Error;
use tracing::{info, warn};

use vitrine_core::Prediction;

use crate::{ArtifactBundle, LabelCodec, SoftmaxClassifier, StandardScaler};

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Error)]
pub enum PredictError {
    /// The embedding came from a different model than the artifacts were
    /// trained with.
    #[error("embedding has {embedding_dim} dimensions, expected {expected_dim}")]
    DimensionMismatch {
        embedding_dim: usize,
        expected_dim: usize,
    },

    /// Scaling or classification failed on an artifact-internal error.
    #[error("{0}")]
    Inference(String),
}

/// Immutable prediction pipeline built once at startup.
///
/// The feature width the artifacts expect is resolved here, once: from the
/// scaler's fitted mean, else from the classifier's coefficient rows. When
/// neither declares one, the per-request dimension check is skipped — the
/// embedding model is loaded independently of the artifacts, so the check is
/// what catches an operator pairing them with the wrong model.
pub struct Predictor {
    scaler: StandardScaler,
    classifier: SoftmaxClassifier,
    labels: LabelCodec,
    expected_dim: Option<usize>,
}

impl Predictor {
    pub fn new(bundle: ArtifactBundle) -> Self {
        let expected_dim = bundle
            .scaler
            .dim()
            .or_else(|| bundle.classifier.n_features());
        match expected_dim {
            Some(dim) => info!(expected_dim = dim, "resolved expected embedding dimension"),
            None => warn!("expected embedding dimension unknown; dimension check disabled"),
        }

        Self {
            scaler: bundle.scaler,
            classifier: bundle.classifier,
            labels: bundle.labels,
            expected_dim,
        }
    }

    /// Feature width the fitted artifacts expect, when known.
    pub fn expected_dim(&self) -> Option<usize> {
        self.expected_dim
    }

    /// Number of known categories.
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Run the pipeline on one embedding, returning the `top_k` best
    /// categories in descending probability order.
    ///
    /// `top_k` is clamped to at least 1; values above the class count return
    /// every class. Ties keep the classifier's native class order.
    pub fn predict(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<Prediction>, PredictError> {
        if let Some(expected_dim) = self.expected_dim
            && embedding.len() != expected_dim
        {
            return Err(PredictError::DimensionMismatch {
                embedding_dim: embedding.len(),
                expected_dim,
            });
        }

        let scaled = self
            .scaler
            .transform(embedding)
            .map_err(|e| PredictError::Inference(e.to_string()))?;
        let probs = self
            .classifier
            .predict_proba(&scaled)
            .map_err(|e| PredictError::Inference(e.to_string()))?;

        let mut ranked: Vec<usize> = (0..probs.len()).collect();
        // Stable sort: equal probabilities keep the native class ordering.
        ranked.sort_by(|&a, &b| probs[b].partial_cmp(&probs[a]).unwrap_or(Ordering::Equal));

        ranked
            .iter()
            .take(top_k.max(1))
            .map(|&i| {
                let label = self
                    .labels
                    .decode(i)
                    .map_err(|e| PredictError::Inference(e.to_string()))?;
                Ok(Prediction::new(label, probs[i]))
            })
            .collect()
    }
}
