use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::presentation::config::{StorageProvider, StorageSettings};

use super::{ObjectDocumentStore, S3DocumentStore};

pub struct DocumentStoreFactory;

impl DocumentStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn DocumentStore>, DocumentStoreError> {
        match settings.provider {
            StorageProvider::Local => {
                tracing::info!(root = %settings.local_path, "Using local document store");
                let store = ObjectDocumentStore::local(PathBuf::from(&settings.local_path))?;
                Ok(Arc::new(store))
            }
            StorageProvider::S3 => {
                tracing::info!(
                    region = ?settings.s3_region,
                    endpoint = ?settings.s3_endpoint,
                    "Using S3 document store"
                );
                Ok(Arc::new(S3DocumentStore::new(
                    settings.s3_region.clone(),
                    settings.s3_endpoint.clone(),
                )))
            }
        }
    }
}
