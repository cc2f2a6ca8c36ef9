use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{SearchResult, VectorStore, VectorStoreError};
use crate::domain::{ChunkId, Embedding, EmbeddingRecord};

/// Process-wide vector index held in memory and searched exhaustively by
/// cosine distance.
///
/// Records are kept in insertion order; replacing a record keeps its slot, so
/// an upsert never changes how ties between equally distant records resolve.
/// Writers are serialized by the lock, so concurrent upserts of the same key
/// are last-writer-wins.
#[derive(Default)]
pub struct InMemoryVectorStore {
    state: RwLock<IndexState>,
}

#[derive(Default)]
struct IndexState {
    dimensions: Option<usize>,
    records: Vec<EmbeddingRecord>,
    slots: HashMap<ChunkId, usize>,
}

impl IndexState {
    fn check_dimensions(&self, actual: usize) -> Result<(), VectorStoreError> {
        match self.dimensions {
            Some(expected) if expected != actual => {
                Err(VectorStoreError::DimensionMismatch { expected, actual })
            }
            _ => Ok(()),
        }
    }
}

impl InMemoryVectorStore {
    /// Empty index whose dimension is fixed by the first upsert.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty index that only accepts `dimensions`-long vectors.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            state: RwLock::new(IndexState {
                dimensions: Some(dimensions),
                ..IndexState::default()
            }),
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    #[instrument(
        skip(self, record),
        fields(source_key = %record.source_key(), sequence_index = record.sequence_index())
    )]
    async fn upsert(&self, record: EmbeddingRecord) -> Result<(), VectorStoreError> {
        let actual = record.embedding.dimensions();
        if actual == 0 {
            return Err(VectorStoreError::InvalidVector(
                "embedding has no dimensions".to_string(),
            ));
        }

        let mut state = self.state.write().await;
        state.check_dimensions(actual)?;
        state.dimensions.get_or_insert(actual);

        let id = record.id();
        match state.slots.get(&id).copied() {
            Some(slot) => {
                state.records[slot] = record;
                tracing::trace!(slot, "Replaced record");
            }
            None => {
                let slot = state.records.len();
                state.records.push(record);
                state.slots.insert(id, slot);
                tracing::trace!(slot, "Inserted record");
            }
        }

        Ok(())
    }

    #[instrument(skip(self, embedding), fields(dimensions = embedding.dimensions()))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let state = self.state.read().await;
        if state.dimensions.is_none() {
            return Ok(Vec::new());
        }
        state.check_dimensions(embedding.dimensions())?;

        let mut ranked: Vec<(usize, f32)> = state
            .records
            .iter()
            .enumerate()
            .map(|(slot, record)| (slot, embedding.cosine_distance(&record.embedding)))
            .collect();

        // Stable sort: equal distances stay in insertion order.
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.truncate(top_k);

        Ok(ranked
            .into_iter()
            .map(|(slot, distance)| SearchResult {
                record: state.records[slot].clone(),
                score: 1.0 - distance,
            })
            .collect())
    }

    async fn count(&self) -> Result<usize, VectorStoreError> {
        Ok(self.state.read().await.records.len())
    }

    async fn dimensions(&self) -> Result<Option<usize>, VectorStoreError> {
        Ok(self.state.read().await.dimensions)
    }
}
