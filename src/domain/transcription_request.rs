use serde::Deserialize;

use super::{ObjectLocation, Task};

/// Language value meaning "let the engine decide".
pub const AUTO_LANGUAGE: &str = "auto";

/// Invocation payload as sent by the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranscriptionRequest {
    #[serde(rename = "processedFileBucket")]
    pub bucket: String,
    #[serde(rename = "processedFileKey")]
    pub key: String,
    pub language: String,
    #[serde(default)]
    pub return_language: Option<bool>,
    #[serde(default)]
    pub return_timestamps: Option<bool>,
    #[serde(default)]
    pub task: Option<Task>,
}

impl TranscriptionRequest {
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            language: language.into(),
            return_language: None,
            return_timestamps: None,
            task: None,
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.task = Some(task);
        self
    }

    pub fn with_return_language(mut self, enabled: bool) -> Self {
        self.return_language = Some(enabled);
        self
    }

    pub fn with_return_timestamps(mut self, enabled: bool) -> Self {
        self.return_timestamps = Some(enabled);
        self
    }

    pub fn source(&self) -> ObjectLocation {
        ObjectLocation::new(&self.bucket, &self.key)
    }
}
