mod error;
mod health;
mod ingest;
mod query;

pub use error::ErrorResponse;
pub use health::{HealthResponse, health_handler};
pub use ingest::{
    BucketEntity, EventRecord, IngestResponse, IngestedDocument, IngestionEvent, ObjectEntity,
    S3Entity, ingest_handler,
};
pub use query::{QueryRequest, QueryResponse, query_handler};
