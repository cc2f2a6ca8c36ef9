use std::fmt;

/// Progress of a single document through the ingestion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestionStage {
    Fetched,
    Extracted,
    Chunked,
    Embedded,
    Stored,
    Failed,
}

impl IngestionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestionStage::Fetched => "FETCHED",
            IngestionStage::Extracted => "EXTRACTED",
            IngestionStage::Chunked => "CHUNKED",
            IngestionStage::Embedded => "EMBEDDED",
            IngestionStage::Stored => "STORED",
            IngestionStage::Failed => "FAILED",
        }
    }
}

impl fmt::Display for IngestionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
