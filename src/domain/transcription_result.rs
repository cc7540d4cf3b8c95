use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampedChunk {
    pub start_secs: f32,
    pub end_secs: f32,
    pub text: String,
}

/// Raw engine output. Everything the engine computed for one call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineOutput {
    pub text: String,
    pub language: Option<String>,
    pub chunks: Vec<TimestampedChunk>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptionResult {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<Vec<TimestampedChunk>>,
}

impl TranscriptionResult {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detected_language: None,
            chunks: None,
        }
    }
}
