use crate::domain::{EngineOutput, InferenceOptions};

/// Pretrained speech recognition model.
///
/// Calls are synchronous and compute bound; async callers should move them to
/// the blocking pool.
pub trait RecognitionEngine: Send + Sync {
    fn infer(
        &self,
        samples: &[f32],
        options: &InferenceOptions,
    ) -> Result<EngineOutput, InvocationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("engine state poisoned")]
    Poisoned,
    #[error("engine task aborted: {0}")]
    Aborted(String),
}
