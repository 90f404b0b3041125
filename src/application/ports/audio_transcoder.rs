use std::io;
use std::time::Duration;

use async_trait::async_trait;

/// Converts an arbitrary compressed audio byte stream into single-channel,
/// 16 kHz, 16-bit linear PCM suitable for speech recognition.
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    async fn convert(&self, data: &[u8]) -> Result<Vec<u8>, ConversionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("empty audio input")]
    EmptyInput,
    #[error("encoder failed: {0}")]
    EncoderFailed(String),
    #[error("encoder timed out after {0:?}")]
    Timeout(Duration),
    #[error("staging io error: {0}")]
    Io(#[from] io::Error),
}
