use std::collections::BTreeMap;

use super::{Chunk, ChunkId, Embedding};

/// The unit persisted in the vector index: a chunk, its vector and free-form
/// string metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRecord {
    pub chunk: Chunk,
    pub embedding: Embedding,
    pub metadata: BTreeMap<String, String>,
}

impl EmbeddingRecord {
    pub fn new(chunk: Chunk, embedding: Embedding) -> Self {
        Self {
            chunk,
            embedding,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> ChunkId {
        self.chunk.id
    }

    pub fn source_key(&self) -> &str {
        &self.chunk.source_key
    }

    pub fn sequence_index(&self) -> usize {
        self.chunk.sequence_index
    }

    pub fn text(&self) -> &str {
        &self.chunk.text
    }
}
