mod chunk;
mod document;
mod embedding;
mod embedding_record;
mod ingestion_stage;
mod query;
mod storage_location;

pub use chunk::{Chunk, ChunkId};
pub use document::{Document, FormatTag};
pub use embedding::Embedding;
pub use embedding_record::EmbeddingRecord;
pub use ingestion_stage::IngestionStage;
pub use query::{DEFAULT_TOP_K, Query};
pub use storage_location::StorageLocation;
