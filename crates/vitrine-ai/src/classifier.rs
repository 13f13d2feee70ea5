//! Fitted multinomial logistic classifier.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("input has {got} features, classifier expects {expected}")]
    WidthMismatch { got: usize, expected: usize },

    #[error("classifier artifact is malformed: {0}")]
    Malformed(String),
}

/// Fitted multinomial logistic-regression classifier.
///
/// One coefficient row and one intercept per class, in the class order the
/// label encoder was fitted with. `predict_proba` is a numerically stable
/// softmax over `Wx + b`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxClassifier {
    pub coef: Vec<Vec<f32>>,
    pub intercept: Vec<f32>,
}

impl SoftmaxClassifier {
    /// Number of classes the classifier scores.
    pub fn n_classes(&self) -> usize {
        self.coef.len()
    }

    /// Declared input width, when the artifact carries at least one
    /// non-empty coefficient row.
    pub fn n_features(&self) -> Option<usize> {
        self.coef.first().map(Vec::len).filter(|&n| n > 0)
    }

    /// Per-class probabilities for one standardized vector.
    ///
    /// The output has one entry per class, each in [0, 1], summing to ~1.0.
    pub fn predict_proba(&self, x: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        if self.coef.is_empty() {
            return Err(ClassifierError::Malformed("no fitted classes".into()));
        }
        if self.coef.len() != self.intercept.len() {
            return Err(ClassifierError::Malformed(format!(
                "{} coefficient rows vs {} intercepts",
                self.coef.len(),
                self.intercept.len()
            )));
        }

        let mut logits = Vec::with_capacity(self.coef.len());
        for (row, &b) in self.coef.iter().zip(&self.intercept) {
            if row.len() != x.len() {
                return Err(ClassifierError::WidthMismatch {
                    got: x.len(),
                    expected: row.len(),
                });
            }
            let z: f32 = row.iter().zip(x).map(|(&w, &v)| w * v).sum::<f32>() + b;
            logits.push(z);
        }

        Ok(softmax(&logits))
    }
}

/// Numerically stable softmax (shifts by the max logit before exponentiating).
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&z| (z - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
