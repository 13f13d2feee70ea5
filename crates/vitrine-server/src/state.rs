//! Shared application state, loaded once at startup and read-only afterwards.

use std::sync::Arc;

use anyhow::Context;

use vitrine_ai::{ArtifactBundle, Embedder, Predictor, TextEncoder};

use crate::config::ServerConfig;

/// Everything a request handler needs. Cloning is cheap (all `Arc`s); no
/// field is mutated after startup, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub encoder: Arc<dyn TextEncoder>,
    pub predictor: Arc<Predictor>,
    pub embedding_model: Arc<str>,
}

impl AppState {
    /// Load artifacts and the embedding model per the configuration.
    ///
    /// Fails — and the process with it — if any artifact is missing, the
    /// meta record lacks the embedding model name, or the model files are
    /// absent.
    pub fn load(config: &ServerConfig) -> anyhow::Result<Self> {
        let bundle =
            ArtifactBundle::load(&config.artifacts_dir).context("loading artifact bundle")?;
        let model_name = bundle.meta.embedding_model_name()?.to_string();

        let model_dir = config.models_dir.join(&model_name);
        let embedder = Embedder::load(&model_dir)
            .with_context(|| format!("loading embedding model {model_name}"))?;

        Ok(Self::new(
            Arc::new(embedder),
            Predictor::new(bundle),
            model_name,
        ))
    }

    /// Assemble state from already-built parts (tests use this with a stub
    /// encoder).
    pub fn new(
        encoder: Arc<dyn TextEncoder>,
        predictor: Predictor,
        embedding_model: String,
    ) -> Self {
        Self {
            encoder,
            predictor: Arc::new(predictor),
            embedding_model: embedding_model.into(),
        }
    }
}
