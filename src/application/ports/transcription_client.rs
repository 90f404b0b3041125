use async_trait::async_trait;

use crate::domain::StorageKey;

/// Runs a long-running speech recognition job against audio already resident
/// at a durable storage location. Implementations do not retry; a failed or
/// empty recognition is reported as-is and retry policy stays with the caller.
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    async fn transcribe(
        &self,
        storage_key: &StorageKey,
        language: &str,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("recognition job failed: {0}")]
    JobFailed(String),
    #[error("empty transcription result")]
    EmptyTranscript,
}
