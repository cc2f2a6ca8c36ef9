use async_trait::async_trait;

use crate::domain::{Document, FormatTag};

/// Turns the raw bytes of a document into plain text, preserving page and
/// paragraph order.
#[async_trait]
pub trait FileLoader: Send + Sync {
    /// Whether `extract_text` can handle documents of this format. Checked by
    /// ingestion before anything is fetched.
    fn supports(&self, format: &FormatTag) -> bool;

    async fn extract_text(&self, data: &[u8], document: &Document)
    -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
