//! Shared types for the Vitrine inference service.

pub mod meta;
pub mod prediction;

pub use meta::{MetaError, MetaRecord};
pub use prediction::Prediction;
