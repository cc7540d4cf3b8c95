use std::path::Path;
use std::sync::{Arc, Mutex};

use whisper_endpoint::application::ports::{
    AcceleratorProbe, EngineBuilder, InitializationError, RecognitionEngine,
};
use whisper_endpoint::application::services::EngineLoader;
use whisper_endpoint::domain::{
    CHUNK_LENGTH_SECS, ComputeDevice, EngineConfig, EngineSpec, MODEL_ID, Precision,
};
use whisper_endpoint::infrastructure::audio::{ScaffoldRecognitionEngine, StaticAcceleratorProbe};

struct RecordingBuilder {
    fail: bool,
    specs: Mutex<Vec<EngineSpec>>,
}

impl RecordingBuilder {
    fn new() -> Self {
        Self {
            fail: false,
            specs: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            specs: Mutex::new(Vec::new()),
        }
    }

    fn specs(&self) -> Vec<EngineSpec> {
        self.specs.lock().unwrap().clone()
    }
}

impl EngineBuilder for RecordingBuilder {
    fn build(
        &self,
        spec: &EngineSpec,
    ) -> Result<Arc<dyn RecognitionEngine>, InitializationError> {
        self.specs.lock().unwrap().push(spec.clone());
        if self.fail {
            return Err(InitializationError::ModelLoadFailed(
                "model.safetensors: missing".to_string(),
            ));
        }
        Ok(Arc::new(ScaffoldRecognitionEngine::default()))
    }
}

fn loader(accelerator: bool, builder: Arc<RecordingBuilder>) -> EngineLoader {
    let probe: Arc<dyn AcceleratorProbe> = Arc::new(StaticAcceleratorProbe(accelerator));
    EngineLoader::new(probe, builder)
}

#[test]
fn given_accelerator_available_when_initializing_then_uses_accelerator_with_half_precision() {
    let builder = Arc::new(RecordingBuilder::new());

    let handle = loader(true, builder.clone())
        .initialize(Path::new("/some/model/dir"))
        .unwrap();

    assert_eq!(handle.config().device(), ComputeDevice::Accelerator);
    assert_eq!(handle.config().precision(), Precision::Half16);
    assert_eq!(
        builder.specs(),
        vec![EngineSpec {
            model_id: MODEL_ID.to_string(),
            config: EngineConfig::accelerator(),
            chunk_length_secs: CHUNK_LENGTH_SECS,
        }]
    );
}

#[test]
fn given_no_accelerator_when_initializing_then_uses_cpu_with_full_precision() {
    let builder = Arc::new(RecordingBuilder::new());

    let handle = loader(false, builder.clone())
        .initialize(Path::new("/some/model/dir"))
        .unwrap();

    assert_eq!(handle.config(), EngineConfig::cpu());
    assert_eq!(handle.model_id(), "openai/whisper-small");
    assert_eq!(handle.chunk_length_secs(), 30);
    assert_eq!(builder.specs(), vec![handle.spec().clone()]);
    assert_eq!(handle.spec().config.precision(), Precision::Full32);
}

#[test]
fn given_different_directory_hints_when_initializing_then_spec_is_unchanged() {
    let builder = Arc::new(RecordingBuilder::new());
    let loader = loader(false, builder.clone());

    loader.initialize(Path::new("/unused/model/dir")).unwrap();
    loader.initialize(Path::new("")).unwrap();

    let specs = builder.specs();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0], specs[1]);
}

#[test]
fn given_builder_failure_when_initializing_then_error_propagates() {
    let builder = Arc::new(RecordingBuilder::failing());

    let result = loader(true, builder.clone()).initialize(Path::new("/opt/ml/model"));

    assert!(matches!(
        result,
        Err(InitializationError::ModelLoadFailed(_))
    ));
    assert_eq!(builder.specs().len(), 1);
}
