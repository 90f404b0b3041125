use std::io;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::StorageKey;

/// Object store gateway for audio blobs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(
        &self,
        key: &StorageKey,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Idempotent: deleting an absent object is not an error.
    async fn delete(&self, key: &StorageKey) -> Result<(), StorageError>;

    async fn signed_read_url(
        &self,
        key: &StorageKey,
        ttl: Duration,
    ) -> Result<String, StorageError>;

    async fn exists(&self, key: &StorageKey) -> Result<bool, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("url signing failed: {0}")]
    SignFailed(String),
    #[error("metadata lookup failed: {0}")]
    HeadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
