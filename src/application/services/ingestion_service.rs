use std::sync::Arc;

use crate::application::ports::{
    DocumentStore, DocumentStoreError, Embedder, EmbedderError, FileLoader, FileLoaderError,
    TextSplitter, TextSplitterError, VectorStore, VectorStoreError,
};
use crate::domain::{
    Chunk, Document, Embedding, EmbeddingRecord, FormatTag, IngestionStage, StorageLocation,
};

pub const METADATA_BUCKET: &str = "bucket";
pub const METADATA_FORMAT: &str = "format";

/// Drives one document from storage into the vector index:
/// fetch, extract, chunk, embed in a single batch, then upsert chunk by chunk.
pub struct IngestionService {
    document_store: Arc<dyn DocumentStore>,
    file_loader: Arc<dyn FileLoader>,
    text_splitter: Arc<dyn TextSplitter>,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionReport {
    pub source_key: String,
    pub chunk_count: usize,
}

impl IngestionService {
    pub fn new(
        document_store: Arc<dyn DocumentStore>,
        file_loader: Arc<dyn FileLoader>,
        text_splitter: Arc<dyn TextSplitter>,
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            document_store,
            file_loader,
            text_splitter,
            embedder,
            vector_store,
        }
    }

    #[tracing::instrument(
        skip(self),
        fields(bucket = %location.bucket, source_key = %location.key)
    )]
    pub async fn ingest(
        &self,
        location: &StorageLocation,
    ) -> Result<IngestionReport, IngestionError> {
        match self.run_pipeline(location).await {
            Ok(report) => {
                tracing::info!(
                    chunk_count = report.chunk_count,
                    stage = %IngestionStage::Stored,
                    "Ingestion completed"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    failed_stage = %e.failed_stage(),
                    stage = %IngestionStage::Failed,
                    "Ingestion failed"
                );
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        location: &StorageLocation,
    ) -> Result<IngestionReport, IngestionError> {
        let format = FormatTag::from_key(&location.key);
        if format.is_empty() {
            tracing::warn!("Object key has no file extension");
            return Err(IngestionError::UnsupportedFormat(format.to_string()));
        }
        if !self.file_loader.supports(&format) {
            return Err(IngestionError::UnsupportedFormat(format.to_string()));
        }

        let data = self
            .document_store
            .get_object(location)
            .await
            .map_err(IngestionError::Fetch)?;
        transition(IngestionStage::Fetched);

        let document = Document::new(location.key.clone(), data.len() as u64);
        let text = self
            .file_loader
            .extract_text(&data, &document)
            .await
            .map_err(|e| match e {
                FileLoaderError::UnsupportedFormat(tag) => IngestionError::UnsupportedFormat(tag),
                other => IngestionError::Extraction(other),
            })?;
        drop(data);
        transition(IngestionStage::Extracted);

        let chunks = self
            .text_splitter
            .split(&text, &document.source_key)
            .await
            .map_err(IngestionError::Splitting)?;
        let chunks = skip_blank_chunks(chunks);
        transition(IngestionStage::Chunked);

        if chunks.is_empty() {
            tracing::warn!("Document produced no text to index");
            return Ok(IngestionReport {
                source_key: document.source_key,
                chunk_count: 0,
            });
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(IngestionError::Embedding)?;
        self.check_embeddings(chunks.len(), &embeddings).await?;
        transition(IngestionStage::Embedded);

        let chunk_count = chunks.len();
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            let record = EmbeddingRecord::new(chunk, embedding)
                .with_metadata(METADATA_BUCKET, location.bucket.as_str())
                .with_metadata(METADATA_FORMAT, document.format.as_str());
            self.vector_store
                .upsert(record)
                .await
                .map_err(IngestionError::Storage)?;
        }
        transition(IngestionStage::Stored);

        Ok(IngestionReport {
            source_key: document.source_key,
            chunk_count,
        })
    }

    /// Validates the whole batch before the first upsert so that a bad vector
    /// cannot leave some of the document's chunks stored and others not.
    async fn check_embeddings(
        &self,
        chunk_count: usize,
        embeddings: &[Embedding],
    ) -> Result<(), IngestionError> {
        if embeddings.len() != chunk_count {
            return Err(IngestionError::EmbeddingCountMismatch {
                expected: chunk_count,
                actual: embeddings.len(),
            });
        }

        let expected = match self
            .vector_store
            .dimensions()
            .await
            .map_err(IngestionError::Storage)?
        {
            Some(dimensions) => dimensions,
            None => embeddings[0].dimensions(),
        };

        if let Some(mismatch) = embeddings.iter().find(|e| e.dimensions() != expected) {
            return Err(IngestionError::Storage(
                VectorStoreError::DimensionMismatch {
                    expected,
                    actual: mismatch.dimensions(),
                },
            ));
        }

        Ok(())
    }
}

fn transition(stage: IngestionStage) {
    tracing::debug!(stage = %stage, "Ingestion stage transition");
}

fn skip_blank_chunks(chunks: Vec<Chunk>) -> Vec<Chunk> {
    let total = chunks.len();
    let kept: Vec<Chunk> = chunks
        .into_iter()
        .filter(|c| !c.text.trim().is_empty())
        .collect();

    if kept.len() < total {
        tracing::warn!(skipped = total - kept.len(), "Skipping blank chunks");
    }
    kept
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("fetch: {0}")]
    Fetch(DocumentStoreError),
    #[error("extraction: {0}")]
    Extraction(FileLoaderError),
    #[error("text splitting: {0}")]
    Splitting(TextSplitterError),
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("embedding: expected {expected} vectors, got {actual}")]
    EmbeddingCountMismatch { expected: usize, actual: usize },
    #[error("storage: {0}")]
    Storage(VectorStoreError),
}

impl IngestionError {
    /// The stage the pipeline was trying to reach when it failed.
    pub fn failed_stage(&self) -> IngestionStage {
        match self {
            IngestionError::UnsupportedFormat(_) | IngestionError::Fetch(_) => {
                IngestionStage::Fetched
            }
            IngestionError::Extraction(_) => IngestionStage::Extracted,
            IngestionError::Splitting(_) => IngestionStage::Chunked,
            IngestionError::Embedding(_) | IngestionError::EmbeddingCountMismatch { .. } => {
                IngestionStage::Embedded
            }
            IngestionError::Storage(_) => IngestionStage::Stored,
        }
    }
}
