use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{AcceleratorProbe, EngineBuilder, InitializationError};
use crate::domain::{EngineConfig, EngineSpec};

use super::EngineHandle;

/// One-shot startup step that turns the host's model hook into an [`EngineHandle`].
pub struct EngineLoader {
    probe: Arc<dyn AcceleratorProbe>,
    builder: Arc<dyn EngineBuilder>,
}

impl EngineLoader {
    pub fn new(probe: Arc<dyn AcceleratorProbe>, builder: Arc<dyn EngineBuilder>) -> Self {
        Self { probe, builder }
    }

    pub fn select_config(&self) -> EngineConfig {
        EngineConfig::for_accelerator_availability(self.probe.accelerator_available())
    }

    /// Builds a fresh engine. `model_directory_hint` is accepted for the host's
    /// call signature only; the model identity is fixed.
    pub fn initialize(
        &self,
        model_directory_hint: &Path,
    ) -> Result<EngineHandle, InitializationError> {
        tracing::debug!(
            hint = %model_directory_hint.display(),
            "Ignoring model directory hint"
        );

        let spec = EngineSpec::new(self.select_config());

        tracing::info!(
            model = %spec.model_id,
            device = %spec.config.device(),
            precision = %spec.config.precision(),
            chunk_length_secs = spec.chunk_length_secs,
            "Initializing recognition engine"
        );

        let engine = self.builder.build(&spec).inspect_err(|e| {
            tracing::error!(error = %e, "Recognition engine initialization failed");
        })?;

        Ok(EngineHandle::new(engine, spec))
    }
}
