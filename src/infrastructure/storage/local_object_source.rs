use std::path::PathBuf;

use bytes::Bytes;
use object_store::ObjectStore;
use object_store::local::LocalFileSystem;

use crate::application::ports::{FetchError, ObjectSource};
use crate::domain::ObjectLocation;

use super::store_error::{exact_store_path, map_get_error};

/// Serves `<root>/<bucket>/<key>` from the local filesystem. For development
/// and tests without an S3 endpoint.
pub struct LocalObjectSource {
    inner: LocalFileSystem,
}

impl LocalObjectSource {
    pub fn new(root: PathBuf) -> Result<Self, FetchError> {
        std::fs::create_dir_all(&root)
            .map_err(|e| FetchError::InvalidLocation(format!("{}: {}", root.display(), e)))?;
        let inner = LocalFileSystem::new_with_prefix(root)
            .map_err(|e| FetchError::InvalidLocation(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[async_trait::async_trait]
impl ObjectSource for LocalObjectSource {
    async fn fetch(&self, location: &ObjectLocation) -> Result<Bytes, FetchError> {
        if location.bucket().is_empty() || location.key().is_empty() {
            return Err(FetchError::InvalidLocation(location.to_string()));
        }

        let store_path = exact_store_path(&format!("{}/{}", location.bucket(), location.key()))?;
        let result = self.inner.get(&store_path).await.map_err(map_get_error)?;

        result
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
