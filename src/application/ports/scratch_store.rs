use std::io;
use std::path::Path;

/// Local scratch space for request-scoped artifacts.
#[async_trait::async_trait]
pub trait ScratchStore: Send + Sync {
    async fn write(&self, path: &Path, data: &[u8]) -> Result<u64, ScratchError>;

    /// Removes `path`. A missing file is reported as [`ScratchError::NotFound`].
    async fn delete(&self, path: &Path) -> Result<(), ScratchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScratchError {
    #[error("path outside scratch root: {0}")]
    OutsideRoot(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
