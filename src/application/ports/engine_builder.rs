use std::sync::Arc;

use crate::domain::EngineSpec;

use super::RecognitionEngine;

/// Reports whether a hardware accelerator can be used for inference.
pub trait AcceleratorProbe: Send + Sync {
    fn accelerator_available(&self) -> bool;
}

/// Constructs a concrete engine for a given spec.
pub trait EngineBuilder: Send + Sync {
    fn build(
        &self,
        spec: &EngineSpec,
    ) -> Result<Arc<dyn RecognitionEngine>, InitializationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InitializationError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),
}
