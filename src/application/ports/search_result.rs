use crate::domain::EmbeddingRecord;

/// A record returned by a similarity search with its cosine similarity to the
/// query vector.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub record: EmbeddingRecord,
    pub score: f32,
}
