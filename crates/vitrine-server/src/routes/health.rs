//! `GET /health` — liveness probe with the loaded model's vitals.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub embedding_model: String,
    pub classes: usize,
    pub expected_dim: Option<usize>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        embedding_model: state.embedding_model.to_string(),
        classes: state.predictor.n_classes(),
        expected_dim: state.predictor.expected_dim(),
    })
}
