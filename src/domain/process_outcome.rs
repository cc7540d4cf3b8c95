use std::fmt;

use super::{ArtifactPath, TranscriptionResult};

/// Non-fatal problem seen while removing a transient artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupWarning {
    AlreadyAbsent { path: String },
    DeleteFailed { path: String, reason: String },
}

impl CleanupWarning {
    pub fn already_absent(path: &ArtifactPath) -> Self {
        Self::AlreadyAbsent {
            path: path.to_string(),
        }
    }

    pub fn delete_failed(path: &ArtifactPath, reason: impl Into<String>) -> Self {
        Self::DeleteFailed {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupWarning::AlreadyAbsent { path } => {
                write!(f, "artifact already absent: {}", path)
            }
            CleanupWarning::DeleteFailed { path, reason } => {
                write!(f, "failed to delete artifact {}: {}", path, reason)
            }
        }
    }
}

/// Successful invocation plus whatever cleanup had to say about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub result: TranscriptionResult,
    pub cleanup: Option<CleanupWarning>,
}

impl ProcessOutcome {
    pub fn text(&self) -> &str {
        &self.result.text
    }

    pub fn into_result(self) -> TranscriptionResult {
        self.result
    }
}
