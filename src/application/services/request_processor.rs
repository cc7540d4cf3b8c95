use std::path::PathBuf;
use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::application::ports::{
    AudioDecoder, DecodeError, FetchError, InvocationError, ObjectSource, ScratchError,
    ScratchStore,
};
use crate::domain::{
    ArtifactNaming, ArtifactPath, CleanupWarning, InferenceOptions, ObjectLocation,
    ProcessOutcome, RequestStage, TranscriptionRequest, TranscriptionResult,
};

use super::EngineHandle;

/// Runs one invocation end to end: fetch, decode, normalize, invoke, clean up.
pub struct RequestProcessor {
    object_source: Arc<dyn ObjectSource>,
    scratch_store: Arc<dyn ScratchStore>,
    audio_decoder: Arc<dyn AudioDecoder>,
    scratch_root: PathBuf,
    naming: ArtifactNaming,
}

impl RequestProcessor {
    pub fn new(
        object_source: Arc<dyn ObjectSource>,
        scratch_store: Arc<dyn ScratchStore>,
        audio_decoder: Arc<dyn AudioDecoder>,
        scratch_root: PathBuf,
    ) -> Self {
        Self {
            object_source,
            scratch_store,
            audio_decoder,
            scratch_root,
            naming: ArtifactNaming::default(),
        }
    }

    pub fn with_naming(mut self, naming: ArtifactNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn artifact_path(
        &self,
        location: &ObjectLocation,
        request_id: Uuid,
    ) -> Result<ArtifactPath, ProcessError> {
        ArtifactPath::derive(&self.scratch_root, location, self.naming, request_id)
            .map_err(|e| ProcessError::InvalidRequest(e.to_string()))
    }

    pub async fn process(
        &self,
        request: TranscriptionRequest,
        engine: &EngineHandle,
    ) -> Result<ProcessOutcome, ProcessError> {
        let request_id = Uuid::new_v4();
        let location = request.source();

        let span = tracing::info_span!(
            "invocation",
            request_id = %request_id,
            bucket = %location.bucket(),
            key = %location.key(),
            stage = %RequestStage::Idle,
        );

        self.process_in_span(request, location, request_id, engine)
            .instrument(span)
            .await
    }

    async fn process_in_span(
        &self,
        request: TranscriptionRequest,
        location: ObjectLocation,
        request_id: Uuid,
        engine: &EngineHandle,
    ) -> Result<ProcessOutcome, ProcessError> {
        let artifact = self.artifact_path(&location, request_id).inspect_err(|e| {
            enter_stage(RequestStage::Failed);
            tracing::error!(error = %e, "Rejected invocation");
        })?;

        let result = self
            .run_stages(&request, &location, &artifact, engine)
            .await;

        enter_stage(RequestStage::CleaningUp);
        let cleanup = self.cleanup(&artifact).await;

        match result {
            Ok(result) => {
                enter_stage(RequestStage::Done);
                tracing::info!(chars = result.text.len(), "Invocation completed");
                Ok(ProcessOutcome { result, cleanup })
            }
            Err(e) => {
                enter_stage(RequestStage::Failed);
                tracing::error!(
                    error = %e,
                    failed_stage = %e.stage(),
                    "Invocation failed"
                );
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        request: &TranscriptionRequest,
        location: &ObjectLocation,
        artifact: &ArtifactPath,
        engine: &EngineHandle,
    ) -> Result<TranscriptionResult, ProcessError> {
        enter_stage(RequestStage::Fetching);
        let data = self.object_source.fetch(location).await?;
        let written = self.scratch_store.write(artifact.as_path(), &data).await?;
        drop(data);
        tracing::info!(bytes = written, path = %artifact, "Downloaded audio object");

        enter_stage(RequestStage::Decoding);
        let decoder = Arc::clone(&self.audio_decoder);
        let path = artifact.as_path().to_path_buf();
        let audio = tokio::task::spawn_blocking(move || decoder.decode(&path))
            .await
            .map_err(|e| DecodeError::DecodingFailed(format!("decoder task: {}", e)))??;

        // The engine assumes its own sample rate; ours is informational.
        tracing::debug!(
            samples = audio.samples.len(),
            sample_rate = audio.sample_rate,
            duration_secs = audio.duration_secs(),
            "Audio decoded"
        );

        let options = InferenceOptions::from_request(request);

        enter_stage(RequestStage::Invoking);
        let handle = engine.clone();
        let invoke_options = options.clone();
        let output = tokio::task::spawn_blocking(move || {
            handle.infer(&audio.samples, &invoke_options)
        })
        .await
        .map_err(|e| InvocationError::Aborted(e.to_string()))??;

        Ok(TranscriptionResult {
            text: output.text,
            detected_language: if options.return_language {
                output.language
            } else {
                None
            },
            chunks: options.return_timestamps.then_some(output.chunks),
        })
    }

    async fn cleanup(&self, artifact: &ArtifactPath) -> Option<CleanupWarning> {
        match self.scratch_store.delete(artifact.as_path()).await {
            Ok(()) => {
                tracing::debug!(path = %artifact, "Transient artifact removed");
                None
            }
            Err(ScratchError::NotFound(_)) => {
                tracing::warn!(path = %artifact, "Transient artifact already absent");
                Some(CleanupWarning::already_absent(artifact))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %artifact,
                    "Failed to delete transient artifact"
                );
                Some(CleanupWarning::delete_failed(artifact, e.to_string()))
            }
        }
    }
}

fn enter_stage(stage: RequestStage) {
    tracing::Span::current().record("stage", stage.as_str());
    tracing::debug!(stage = %stage, "Stage transition");
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),
    #[error("scratch storage: {0}")]
    Scratch(#[from] ScratchError),
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),
    #[error("invocation: {0}")]
    Invocation(#[from] InvocationError),
}

impl ProcessError {
    /// Stage the request was in when it failed.
    pub fn stage(&self) -> RequestStage {
        match self {
            ProcessError::InvalidRequest(_) => RequestStage::Idle,
            ProcessError::Fetch(_) | ProcessError::Scratch(_) => RequestStage::Fetching,
            ProcessError::Decode(_) => RequestStage::Decoding,
            ProcessError::Invocation(_) => RequestStage::Invoking,
        }
    }
}
