//! Seam between the request path and the embedding backend.

/// Text → embedding backend.
///
/// Implemented by the ONNX [`Embedder`](crate::Embedder) in production and
/// by lightweight stubs in tests, so the request path does not require ONNX
/// Runtime to be linked.
pub trait TextEncoder: Send + Sync {
    /// Embed one text into a fixed-length vector.
    fn encode(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}
