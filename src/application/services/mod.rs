mod ingestion_service;
mod prompt;
mod retrieval_service;

pub use ingestion_service::{
    IngestionError, IngestionReport, IngestionService, METADATA_BUCKET, METADATA_FORMAT,
};
pub use prompt::{CONTEXT_DELIMITER, build_context, build_prompt};
pub use retrieval_service::{Answer, DEFAULT_MAX_TOKENS, RetrievalError, RetrievalService};
