use std::fmt;

/// Bucket and key of an object in the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    pub bucket: String,
    pub key: String,
}

impl StorageLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// `<bucket>/<key>`, the layout used by the filesystem and in-memory stores.
    pub fn object_path(&self) -> String {
        format!("{}/{}", self.bucket, self.key.trim_start_matches('/'))
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}
