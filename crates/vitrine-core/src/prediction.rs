//! Wire type for a single ranked category prediction.

use serde::{Deserialize, Serialize};

/// One ranked prediction as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Category (collection) name decoded from the label encoder.
    pub colecao: String,
    /// Class probability in [0, 1].
    pub proba: f32,
    /// `proba` as a percentage, rounded to 2 decimal places.
    pub proba_pct: f32,
}

impl Prediction {
    pub fn new(colecao: impl Into<String>, proba: f32) -> Self {
        Self {
            colecao: colecao.into(),
            proba,
            proba_pct: round_pct(proba),
        }
    }
}

/// Probability → percentage with 2 decimal places.
fn round_pct(proba: f32) -> f32 {
    (proba * 10_000.0).round() / 100.0
}
