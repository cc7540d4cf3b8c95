use serde::Serialize;

use super::{AUTO_LANGUAGE, Task, TranscriptionRequest};

/// Options forwarded to the engine's decoding loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOptions {
    /// `None` lets the engine detect the spoken language.
    pub language: Option<String>,
    pub task: Task,
}

/// Request options after defaults and sentinels have been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferenceOptions {
    pub return_timestamps: bool,
    pub return_language: bool,
    pub generation: GenerationOptions,
}

impl InferenceOptions {
    pub fn from_request(request: &TranscriptionRequest) -> Self {
        let language = match request.language.as_str() {
            AUTO_LANGUAGE => None,
            code => Some(code.to_string()),
        };

        Self {
            return_timestamps: request.return_timestamps.unwrap_or(false),
            return_language: request.return_language.unwrap_or(false),
            generation: GenerationOptions {
                language,
                task: request.task.unwrap_or_default(),
            },
        }
    }
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            return_timestamps: false,
            return_language: false,
            generation: GenerationOptions {
                language: None,
                task: Task::Transcribe,
            },
        }
    }
}
