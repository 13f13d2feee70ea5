//! Request-scoped errors and their mapping onto the JSON error contract.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use vitrine_ai::PredictError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Errors a single request can surface. Startup failures never reach this
/// type — they abort the process before the router exists.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Descrição vazia")]
    EmptyDescription,

    #[error("Dimensão do embedding incompatível.")]
    DimensionMismatch {
        embedding_dim: usize,
        expected_dim: usize,
    },

    #[error("Falha interna ao preparar/predizer")]
    Internal(String),
}

impl From<PredictError> for ServerError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::DimensionMismatch {
                embedding_dim,
                expected_dim,
            } => ServerError::DimensionMismatch {
                embedding_dim,
                expected_dim,
            },
            PredictError::Inference(text) => ServerError::Internal(text),
        }
    }
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::EmptyDescription => StatusCode::BAD_REQUEST,
            ServerError::DimensionMismatch { .. } | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ServerError::EmptyDescription => json!({ "error": "Descrição vazia" }),
            ServerError::DimensionMismatch {
                embedding_dim,
                expected_dim,
            } => json!({
                "error": "Dimensão do embedding incompatível.",
                "details": {
                    "embedding_dim": embedding_dim,
                    "expected_dim": expected_dim,
                    "message": "Gere embeddings com o mesmo modelo usado no treino (veja meta.json).",
                }
            }),
            ServerError::Internal(exc) => json!({
                "error": "Falha interna ao preparar/predizer",
                "exc": exc,
            }),
        };
        (status, Json(body)).into_response()
    }
}
