use std::fmt;
use std::sync::Arc;

use crate::application::ports::{InvocationError, RecognitionEngine};
use crate::domain::{EngineConfig, EngineOutput, EngineSpec, InferenceOptions};

/// Ready-to-use recognition engine shared by every request.
///
/// Cloning is cheap and yields a handle to the same engine instance.
#[derive(Clone)]
pub struct EngineHandle {
    engine: Arc<dyn RecognitionEngine>,
    spec: Arc<EngineSpec>,
}

impl EngineHandle {
    pub fn new(engine: Arc<dyn RecognitionEngine>, spec: EngineSpec) -> Self {
        Self {
            engine,
            spec: Arc::new(spec),
        }
    }

    pub fn spec(&self) -> &EngineSpec {
        &self.spec
    }

    pub fn config(&self) -> EngineConfig {
        self.spec.config
    }

    pub fn model_id(&self) -> &str {
        &self.spec.model_id
    }

    pub fn chunk_length_secs(&self) -> u32 {
        self.spec.chunk_length_secs
    }

    pub fn infer(
        &self,
        samples: &[f32],
        options: &InferenceOptions,
    ) -> Result<EngineOutput, InvocationError> {
        self.engine.infer(samples, options)
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHandle")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}
