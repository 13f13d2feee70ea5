//! Inference layer: fitted artifact bundle, the prediction pipeline, and
//! ONNX Runtime sentence embeddings.

pub mod artifacts;
pub mod classifier;
pub mod encoder;
pub mod labels;
pub mod pipeline;
pub mod scaler;

#[cfg(feature = "onnx")]
mod embedder;
#[cfg(feature = "onnx")]
pub use embedder::Embedder;

pub use artifacts::{ArtifactBundle, ArtifactError};
pub use classifier::SoftmaxClassifier;
pub use encoder::TextEncoder;
pub use labels::LabelCodec;
pub use pipeline::{DEFAULT_TOP_K, PredictError, Predictor};
pub use scaler::StandardScaler;
