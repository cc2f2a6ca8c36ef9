use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, LlmClient, LlmClientError, SearchResult, VectorStore,
    VectorStoreError,
};
use crate::domain::Query;

use super::prompt::{build_context, build_prompt};

pub const DEFAULT_MAX_TOKENS: usize = 150;

pub struct RetrievalService {
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<dyn LlmClient>,
    vector_store: Arc<dyn VectorStore>,
    max_tokens: usize,
}

impl RetrievalService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<dyn LlmClient>,
        vector_store: Arc<dyn VectorStore>,
        max_tokens: usize,
    ) -> Self {
        Self {
            embedder,
            llm_client,
            vector_store,
            max_tokens,
        }
    }

    /// Answers `query` from the indexed passages.
    ///
    /// An empty retrieval is not special-cased: the model still receives the
    /// prompt, with an empty context.
    #[tracing::instrument(
        skip(self, query),
        fields(query_len = query.text.len(), top_k = query.top_k)
    )]
    pub async fn query(&self, query: &Query) -> Result<Answer, RetrievalError> {
        let passages = self.retrieve(query).await?;

        let context = build_context(&passages);
        let prompt = build_prompt(&context, &query.text);

        let completion = self
            .llm_client
            .complete(&prompt, self.max_tokens)
            .await
            .map_err(RetrievalError::Completion)?;

        tracing::info!(passages = passages.len(), "Query answered");

        Ok(Answer {
            query: query.clone(),
            text: completion.trim().to_string(),
            passages,
        })
    }

    pub async fn retrieve(&self, query: &Query) -> Result<Vec<SearchResult>, RetrievalError> {
        if query.text.trim().is_empty() {
            return Err(RetrievalError::EmptyQuery);
        }

        let query_embedding = self
            .embedder
            .embed(&query.text)
            .await
            .map_err(RetrievalError::Embedding)?;

        let results = self
            .vector_store
            .search(&query_embedding, query.top_k)
            .await
            .map_err(RetrievalError::Search)?;

        tracing::debug!(results = results.len(), "Retrieved passages");
        Ok(results)
    }
}

/// Generated text paired with the query it answers and the passages placed
/// in its prompt, most similar first.
#[derive(Debug, Clone)]
pub struct Answer {
    pub query: Query,
    pub text: String,
    pub passages: Vec<SearchResult>,
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("query text is empty")]
    EmptyQuery,
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("search: {0}")]
    Search(VectorStoreError),
    #[error("completion: {0}")]
    Completion(LlmClientError),
}
