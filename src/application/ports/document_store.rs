use async_trait::async_trait;

use crate::domain::StorageLocation;

/// Read access to the object storage holding uploaded documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_object(&self, location: &StorageLocation) -> Result<Vec<u8>, DocumentStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("invalid storage configuration: {0}")]
    InvalidConfiguration(String),
}
