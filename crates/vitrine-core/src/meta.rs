//! Training-run metadata exported alongside the fitted artifacts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetaError {
    #[error("meta record is missing '{0}'")]
    MissingKey(&'static str),
}

/// Metadata record written by the training export (`meta.json`).
///
/// Only `embedding_model_name` is contractual; training runs attach extra
/// keys (corpus size, export date, ...) which are preserved verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaRecord {
    #[serde(default)]
    pub embedding_model_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MetaRecord {
    /// The embedding model the artifacts were trained against.
    ///
    /// The scaler and classifier are only valid for vectors produced by this
    /// exact model, so a record without it cannot be served.
    pub fn embedding_model_name(&self) -> Result<&str, MetaError> {
        self.embedding_model_name
            .as_deref()
            .ok_or(MetaError::MissingKey("embedding_model_name"))
    }
}
