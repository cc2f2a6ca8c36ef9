use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::Chunk;

pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Splits text into non-overlapping windows of `chunk_size` whitespace-delimited
/// words. Boundaries depend only on word count, never on a tokenizer, so the
/// same text always yields the same chunks.
pub struct WordWindowSplitter {
    chunk_size: usize,
}

impl WordWindowSplitter {
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for WordWindowSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

#[async_trait]
impl TextSplitter for WordWindowSplitter {
    async fn split(&self, text: &str, source_key: &str) -> Result<Vec<Chunk>, TextSplitterError> {
        if self.chunk_size == 0 {
            return Err(TextSplitterError::InvalidChunkSize(self.chunk_size));
        }

        let words: Vec<&str> = text.split_whitespace().collect();

        let chunks = words
            .chunks(self.chunk_size)
            .enumerate()
            .map(|(sequence_index, window)| {
                Chunk::new(source_key.to_string(), sequence_index, window.join(" "))
            })
            .collect();

        Ok(chunks)
    }
}
