//! `POST /predict` — classify one item description.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vitrine_ai::DEFAULT_TOP_K;
use vitrine_core::Prediction;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Item description to classify. Absent and blank are both rejected.
    #[serde(default)]
    pub descricao: String,

    /// Number of ranked categories to return.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// Best match (head of `top_k`).
    pub predicao: Prediction,
    /// Ranked matches, best first.
    pub top_k: Vec<Prediction>,
}

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> ServerResult<Json<PredictResponse>> {
    if req.descricao.trim().is_empty() {
        return Err(ServerError::EmptyDescription);
    }

    let embedding = state
        .encoder
        .encode(&req.descricao)
        .map_err(|e| ServerError::Internal(e.to_string()))?;
    debug!(dim = embedding.len(), top_k = req.top_k, "embedded description");

    let results = state.predictor.predict(&embedding, req.top_k)?;

    // predict() clamps top_k to at least 1, so the head always exists.
    let predicao = results
        .first()
        .cloned()
        .ok_or_else(|| ServerError::Internal("empty prediction list".into()))?;

    Ok(Json(PredictResponse {
        predicao,
        top_k: results,
    }))
}
