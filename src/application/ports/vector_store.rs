use async_trait::async_trait;

use super::{SearchResult, VectorStoreError};
use crate::domain::{Embedding, EmbeddingRecord};

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Inserts the record, or replaces the one with the same
    /// `(source_key, sequence_index)`.
    async fn upsert(&self, record: EmbeddingRecord) -> Result<(), VectorStoreError>;

    /// Returns up to `top_k` records ordered by ascending cosine distance to
    /// `embedding`, ties going to the earliest inserted record.
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;

    async fn count(&self) -> Result<usize, VectorStoreError>;

    /// Dimension shared by every stored vector, once established.
    async fn dimensions(&self) -> Result<Option<usize>, VectorStoreError>;
}
