use uuid::Uuid;

/// A word window cut from one document's extracted text.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub id: ChunkId,
    pub source_key: String,
    pub sequence_index: usize,
    pub text: String,
}

/// Stable identity of a chunk, derived from `(source_key, sequence_index)`.
///
/// Re-chunking the same document with the same parameters yields the same ids,
/// which is what makes re-ingestion overwrite instead of duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(Uuid);

impl ChunkId {
    pub fn derive(source_key: &str, sequence_index: usize) -> Self {
        let name = format!("{source_key}#{sequence_index}");
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Chunk {
    pub fn new(source_key: String, sequence_index: usize, text: String) -> Self {
        Self {
            id: ChunkId::derive(&source_key, sequence_index),
            source_key,
            sequence_index,
            text,
        }
    }
}
