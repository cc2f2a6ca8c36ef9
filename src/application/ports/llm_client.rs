use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Completes `prompt`, generating at most `max_tokens` tokens.
    async fn complete(&self, prompt: &str, max_tokens: usize) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
