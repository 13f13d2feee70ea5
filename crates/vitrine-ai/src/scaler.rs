//! Fitted standardization applied to raw embeddings before classification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScalerError {
    #[error("input has {got} features, scaler was fitted on {expected}")]
    WidthMismatch { got: usize, expected: usize },

    #[error("scaler artifact is malformed: mean has {mean} entries, scale has {scale}")]
    Malformed { mean: usize, scale: usize },
}

/// Fitted standard scaler: `(x - mean) / scale`.
///
/// `mean` and `scale` come from the training export and must match the
/// preprocessing the classifier was trained behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl StandardScaler {
    /// Number of features the scaler was fitted on, if it declares any.
    pub fn dim(&self) -> Option<usize> {
        (!self.mean.is_empty()).then_some(self.mean.len())
    }

    /// Standardize one embedding.
    ///
    /// A zero `scale` entry (constant feature during fitting) centres the
    /// feature without dividing.
    pub fn transform(&self, x: &[f32]) -> Result<Vec<f32>, ScalerError> {
        if self.mean.len() != self.scale.len() {
            return Err(ScalerError::Malformed {
                mean: self.mean.len(),
                scale: self.scale.len(),
            });
        }
        if x.len() != self.mean.len() {
            return Err(ScalerError::WidthMismatch {
                got: x.len(),
                expected: self.mean.len(),
            });
        }

        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&v, (&m, &s))| if s != 0.0 { (v - m) / s } else { v - m })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardizes_each_feature() {
        let scaler = StandardScaler {
            mean: vec![1.0, 2.0, 0.0],
            scale: vec![2.0, 1.0, 0.5],
        };
        let out = scaler.transform(&[3.0, 2.0, 1.0]).unwrap();
        assert_eq!(out, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn zero_scale_centres_without_dividing() {
        let scaler = StandardScaler {
            mean: vec![5.0],
            scale: vec![0.0],
        };
        let out = scaler.transform(&[7.0]).unwrap();
        assert_eq!(out, vec![2.0]);
    }

    #[test]
    fn rejects_wrong_width() {
        let scaler = StandardScaler {
            mean: vec![0.0; 4],
            scale: vec![1.0; 4],
        };
        let err = scaler.transform(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            ScalerError::WidthMismatch {
                got: 2,
                expected: 4
            }
        ));
    }

    #[test]
    fn rejects_mismatched_mean_and_scale() {
        let scaler = StandardScaler {
            mean: vec![0.0; 4],
            scale: vec![1.0; 3],
        };
        assert!(matches!(
            scaler.transform(&[0.0; 4]).unwrap_err(),
            ScalerError::Malformed { mean: 4, scale: 3 }
        ));
    }

    #[test]
    fn dim_is_none_when_unfitted() {
        let scaler = StandardScaler {
            mean: vec![],
            scale: vec![],
        };
        assert_eq!(scaler.dim(), None);

        let fitted = StandardScaler {
            mean: vec![0.0; 384],
            scale: vec![1.0; 384],
        };
        assert_eq!(fitted.dim(), Some(384));
    }
}
