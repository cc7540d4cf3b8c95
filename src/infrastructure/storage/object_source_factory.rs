use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{FetchError, ObjectSource};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::local_object_source::LocalObjectSource;
use super::s3_object_source::S3ObjectSource;

pub struct ObjectSourceFactory;

impl ObjectSourceFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn ObjectSource>, FetchError> {
        match settings.provider {
            StorageProviderSetting::S3 => Ok(Arc::new(S3ObjectSource::new(
                settings.region.clone(),
                settings.endpoint.clone(),
            ))),
            StorageProviderSetting::Local => {
                let root = settings.local_root.as_deref().ok_or_else(|| {
                    FetchError::InvalidLocation("storage.local_root required".into())
                })?;
                let source = LocalObjectSource::new(PathBuf::from(root))?;
                Ok(Arc::new(source))
            }
        }
    }
}
