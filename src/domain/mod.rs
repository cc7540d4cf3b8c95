mod artifact_path;
mod engine_config;
mod inference_options;
mod object_location;
mod process_outcome;
mod request_stage;
mod task;
mod transcription_request;
mod transcription_result;

pub use artifact_path::{ArtifactNaming, ArtifactPath, InvalidArtifactName};
pub use engine_config::{
    CHUNK_LENGTH_SECS, ComputeDevice, EngineConfig, EngineSpec, MODEL_ID, Precision,
};
pub use inference_options::{GenerationOptions, InferenceOptions};
pub use object_location::ObjectLocation;
pub use process_outcome::{CleanupWarning, ProcessOutcome};
pub use request_stage::RequestStage;
pub use task::Task;
pub use transcription_request::{AUTO_LANGUAGE, TranscriptionRequest};
pub use transcription_result::{EngineOutput, TimestampedChunk, TranscriptionResult};
