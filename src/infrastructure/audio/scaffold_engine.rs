use crate::application::ports::{InvocationError, RecognitionEngine};
use crate::domain::{EngineOutput, InferenceOptions, TimestampedChunk};

/// Stand-in engine that needs no weights. Returns a canned transcript sized to
/// the input so the full request path can run locally.
pub struct ScaffoldRecognitionEngine {
    text: String,
    sample_rate: u32,
}

impl ScaffoldRecognitionEngine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sample_rate: 16_000,
        }
    }
}

impl Default for ScaffoldRecognitionEngine {
    fn default() -> Self {
        Self::new("scaffold transcript")
    }
}

impl RecognitionEngine for ScaffoldRecognitionEngine {
    fn infer(
        &self,
        samples: &[f32],
        options: &InferenceOptions,
    ) -> Result<EngineOutput, InvocationError> {
        let duration_secs = samples.len() as f32 / self.sample_rate as f32;

        tracing::debug!(
            samples = samples.len(),
            task = %options.generation.task,
            "Scaffold engine returning canned transcript"
        );

        Ok(EngineOutput {
            text: self.text.clone(),
            language: Some(
                options
                    .generation
                    .language
                    .clone()
                    .unwrap_or_else(|| "en".to_string()),
            ),
            chunks: vec![TimestampedChunk {
                start_secs: 0.0,
                end_secs: duration_secs,
                text: self.text.clone(),
            }],
        })
    }
}
