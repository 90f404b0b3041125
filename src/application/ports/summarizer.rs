use async_trait::async_trait;

/// Condenses a transcription into a summary of key points, decisions and
/// action items via a language-model backend.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcription: &str) -> Result<String, SummarizationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizationError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("model returned no content")]
    EmptyResponse,
}
