//! Label encoder: category names ↔ the integer class indices the classifier
//! scores.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("class index {index} out of range for {n_classes} classes")]
    OutOfRange { index: usize, n_classes: usize },
}

/// Bidirectional mapping between category names and class indices.
///
/// `classes[i]` is the category decoded from class index `i`, mirroring the
/// ordering the classifier and scaler were fitted with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelCodec {
    pub classes: Vec<String>,
}

impl LabelCodec {
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Decode a class index back to its category name.
    pub fn decode(&self, index: usize) -> Result<&str, LabelError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(LabelError::OutOfRange {
                index,
                n_classes: self.classes.len(),
            })
    }

    /// Encode a category name to its class index.
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }
}
