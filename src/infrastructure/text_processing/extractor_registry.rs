use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, FormatTag};

use super::{DocxAdapter, PdfAdapter};

/// Dispatches extraction to the adapter registered for a document's format.
/// New formats are added with [`ExtractorRegistry::register`].
#[derive(Default)]
pub struct ExtractorRegistry {
    adapters: HashMap<FormatTag, Arc<dyn FileLoader>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the PDF and DOCX extractors.
    pub fn with_default_extractors() -> Self {
        Self::new()
            .register(FormatTag::pdf(), Arc::new(PdfAdapter::new()))
            .register(FormatTag::docx(), Arc::new(DocxAdapter::new()))
    }

    pub fn register(mut self, format: FormatTag, adapter: Arc<dyn FileLoader>) -> Self {
        self.adapters.insert(format, adapter);
        self
    }

    pub fn formats(&self) -> Vec<&FormatTag> {
        let mut formats: Vec<&FormatTag> = self.adapters.keys().collect();
        formats.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        formats
    }
}

#[async_trait]
impl FileLoader for ExtractorRegistry {
    fn supports(&self, format: &FormatTag) -> bool {
        self.adapters.contains_key(format)
    }

    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        let adapter = self
            .adapters
            .get(&document.format)
            .ok_or_else(|| FileLoaderError::UnsupportedFormat(document.format.to_string()))?;

        adapter.extract_text(data, document).await
    }
}
