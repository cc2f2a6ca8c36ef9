use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as StorePath;

use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::domain::StorageLocation;

use super::object_document_store::fetch;

/// Reads documents from Amazon S3 (or an S3-compatible endpoint).
///
/// Credentials come from the standard `AWS_*` environment variables. The
/// bucket is named by each request, so a client is built per fetch.
pub struct S3DocumentStore {
    region: Option<String>,
    endpoint: Option<String>,
}

impl S3DocumentStore {
    pub fn new(region: Option<String>, endpoint: Option<String>) -> Self {
        Self { region, endpoint }
    }

    fn client_for(
        &self,
        bucket: &str,
    ) -> Result<object_store::aws::AmazonS3, DocumentStoreError> {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
        if let Some(region) = &self.region {
            builder = builder.with_region(region);
        }
        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }
        builder
            .build()
            .map_err(|e| DocumentStoreError::InvalidConfiguration(e.to_string()))
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    #[tracing::instrument(skip(self), fields(location = %location))]
    async fn get_object(&self, location: &StorageLocation) -> Result<Vec<u8>, DocumentStoreError> {
        let client = self.client_for(&location.bucket)?;
        let path = StorePath::from(location.key.as_str());
        fetch(&client, &path, location).await
    }
}
