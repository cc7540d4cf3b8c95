use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;

use crate::application::ports::{FetchError, ObjectSource};
use crate::domain::ObjectLocation;

use super::store_error::{exact_store_path, map_get_error};

/// Fetches objects from S3. Credentials come from the standard AWS environment.
///
/// The bucket is chosen per request, so one client is built lazily per bucket.
pub struct S3ObjectSource {
    region: Option<String>,
    endpoint: Option<String>,
    clients: Mutex<HashMap<String, Arc<dyn ObjectStore>>>,
}

impl S3ObjectSource {
    pub fn new(region: Option<String>, endpoint: Option<String>) -> Self {
        Self {
            region,
            endpoint,
            clients: Mutex::new(HashMap::new()),
        }
    }

    fn client(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>, FetchError> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|_| FetchError::Transport("s3 client cache poisoned".to_string()))?;

        if let Some(client) = clients.get(bucket) {
            return Ok(Arc::clone(client));
        }

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
        if let Some(region) = &self.region {
            builder = builder.with_region(region);
        }
        if let Some(endpoint) = &self.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let client: Arc<dyn ObjectStore> = Arc::new(
            builder
                .build()
                .map_err(|e| FetchError::InvalidLocation(e.to_string()))?,
        );

        tracing::debug!(bucket, "Created S3 client");
        clients.insert(bucket.to_string(), Arc::clone(&client));
        Ok(client)
    }
}

#[async_trait::async_trait]
impl ObjectSource for S3ObjectSource {
    async fn fetch(&self, location: &ObjectLocation) -> Result<Bytes, FetchError> {
        if location.bucket().is_empty() || location.key().is_empty() {
            return Err(FetchError::InvalidLocation(location.to_string()));
        }

        let store_path = exact_store_path(location.key())?;
        let client = self.client(location.bucket())?;

        let result = client.get(&store_path).await.map_err(map_get_error)?;
        result
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
