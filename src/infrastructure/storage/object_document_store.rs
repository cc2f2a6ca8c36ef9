use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::domain::StorageLocation;

/// Document store over a single `object_store` backend where buckets are the
/// first path segment: `<bucket>/<key>`.
pub struct ObjectDocumentStore {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectDocumentStore {
    pub fn new(inner: Arc<dyn ObjectStore>) -> Self {
        Self { inner }
    }

    /// Buckets are directories under `root`, which is created if missing.
    pub fn local(root: PathBuf) -> Result<Self, DocumentStoreError> {
        std::fs::create_dir_all(&root).map_err(|e| {
            DocumentStoreError::InvalidConfiguration(format!(
                "cannot create {}: {e}",
                root.display()
            ))
        })?;
        let fs = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| DocumentStoreError::InvalidConfiguration(e.to_string()))?;
        Ok(Self::new(Arc::new(fs)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }

    pub async fn put_object(
        &self,
        location: &StorageLocation,
        data: impl Into<Bytes>,
    ) -> Result<(), DocumentStoreError> {
        let path = StorePath::from(location.object_path());
        self.inner
            .put(&path, PutPayload::from(data.into()))
            .await
            .map_err(|e| DocumentStoreError::UploadFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for ObjectDocumentStore {
    #[tracing::instrument(skip(self), fields(location = %location))]
    async fn get_object(&self, location: &StorageLocation) -> Result<Vec<u8>, DocumentStoreError> {
        let path = StorePath::from(location.object_path());
        fetch(self.inner.as_ref(), &path, location).await
    }
}

pub(super) async fn fetch(
    store: &dyn ObjectStore,
    path: &StorePath,
    location: &StorageLocation,
) -> Result<Vec<u8>, DocumentStoreError> {
    let result = store.get(path).await.map_err(|e| match e {
        object_store::Error::NotFound { .. } => DocumentStoreError::NotFound(location.to_string()),
        other => DocumentStoreError::DownloadFailed(other.to_string()),
    })?;

    let bytes = result
        .bytes()
        .await
        .map_err(|e| DocumentStoreError::DownloadFailed(e.to_string()))?;

    tracing::debug!(bytes = bytes.len(), "Fetched object");
    Ok(bytes.to_vec())
}
