use std::sync::Arc;

use crate::application::ports::VectorStore;
use crate::application::services::{IngestionService, RetrievalService};

/// Long-lived collaborators shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub ingestion_service: Arc<IngestionService>,
    pub retrieval_service: Arc<RetrievalService>,
    pub vector_store: Arc<dyn VectorStore>,
    pub default_top_k: usize,
}
