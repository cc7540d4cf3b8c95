use bytes::Bytes;

use crate::domain::ObjectLocation;

/// Read access to the remote object store holding uploaded audio.
#[async_trait::async_trait]
pub trait ObjectSource: Send + Sync {
    async fn fetch(&self, location: &ObjectLocation) -> Result<Bytes, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("invalid object location: {0}")]
    InvalidLocation(String),
    #[error("download failed: {0}")]
    Transport(String),
}
