use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::application::ports::{
    AudioTranscoder, BlobStore, ConversionError, NoteRepository, RecordingRepository,
    RepositoryError, StorageError,
};
use crate::domain::{Recording, RecordingId, StorageKey, UserId};

use super::ProcessingMessage;

/// Upload-side entry points for recordings. Upload-time collaborator errors
/// propagate to the caller; everything after the recording is enqueued is the
/// pipeline's responsibility.
pub struct RecordingService {
    transcoder: Arc<dyn AudioTranscoder>,
    blob_store: Arc<dyn BlobStore>,
    recording_repository: Arc<dyn RecordingRepository>,
    note_repository: Arc<dyn NoteRepository>,
    processing_sender: mpsc::Sender<ProcessingMessage>,
    signed_url_ttl: Duration,
}

impl RecordingService {
    pub fn new(
        transcoder: Arc<dyn AudioTranscoder>,
        blob_store: Arc<dyn BlobStore>,
        recording_repository: Arc<dyn RecordingRepository>,
        note_repository: Arc<dyn NoteRepository>,
        processing_sender: mpsc::Sender<ProcessingMessage>,
        signed_url_ttl: Duration,
    ) -> Self {
        Self {
            transcoder,
            blob_store,
            recording_repository,
            note_repository,
            processing_sender,
            signed_url_ttl,
        }
    }

    /// Transcodes and stores the audio, creates a `pending` recording and
    /// enqueues it for processing. Returns immediately; processing continues
    /// asynchronously.
    pub async fn upload(
        &self,
        user_id: UserId,
        filename: &str,
        data: &[u8],
    ) -> Result<Recording, RecordingServiceError> {
        tracing::debug!(filename = %filename, bytes = data.len(), "Converting uploaded audio");
        let wav = self.transcoder.convert(data).await?;
        tracing::debug!(bytes = wav.len(), "Audio normalized to 16kHz mono PCM");

        let recording_id = RecordingId::new();
        let storage_key = StorageKey::new(&user_id, &recording_id);

        self.blob_store
            .put(&storage_key, Bytes::from(wav), "audio/wav")
            .await?;

        let recording = Recording::new(recording_id, user_id, storage_key);
        self.recording_repository
            .create(&recording)
            .await
            .map_err(RecordingServiceError::Repository)?;

        if self
            .processing_sender
            .send(ProcessingMessage { recording_id })
            .await
            .is_err()
        {
            tracing::error!("Processing worker unavailable, recording left pending");
            return Err(RecordingServiceError::QueueUnavailable);
        }

        tracing::info!(
            recording_id = %recording_id.as_uuid(),
            filename = %filename,
            "Recording uploaded and enqueued for processing"
        );

        Ok(recording)
    }

    pub async fn find_for_user(
        &self,
        id: RecordingId,
        user_id: &UserId,
    ) -> Result<Recording, RecordingServiceError> {
        self.recording_repository
            .find_by_id_for_user(id, user_id)
            .await
            .map_err(RecordingServiceError::Repository)?
            .ok_or(RecordingServiceError::NotFound)
    }

    /// Time-limited read URL for a recording's audio; fails with `NotFound`
    /// when the blob itself is already gone.
    pub async fn audio_url(
        &self,
        id: RecordingId,
        user_id: &UserId,
    ) -> Result<String, RecordingServiceError> {
        let recording = self.find_for_user(id, user_id).await?;

        if !self.blob_store.exists(&recording.storage_key).await? {
            return Err(RecordingServiceError::NotFound);
        }

        let url = self
            .blob_store
            .signed_read_url(&recording.storage_key, self.signed_url_ttl)
            .await?;
        Ok(url)
    }

    /// Cascading delete: audio blob (best-effort), associated note, then the
    /// recording itself. Deleting the same id twice yields `NotFound` on the
    /// second call.
    pub async fn delete(
        &self,
        id: RecordingId,
        user_id: &UserId,
    ) -> Result<(), RecordingServiceError> {
        let recording = self.find_for_user(id, user_id).await?;

        if let Err(e) = self.blob_store.delete(&recording.storage_key).await {
            tracing::warn!(
                error = %e,
                storage_key = %recording.storage_key,
                "Failed to delete audio blob, continuing with entity cleanup"
            );
        }

        self.note_repository
            .delete_by_recording_id(id)
            .await
            .map_err(RecordingServiceError::Repository)?;

        self.recording_repository
            .delete(id)
            .await
            .map_err(RecordingServiceError::Repository)?;

        tracing::info!(recording_id = %id.as_uuid(), "Recording and associated data deleted");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordingServiceError {
    #[error("recording not found")]
    NotFound,
    #[error("conversion: {0}")]
    Conversion(#[from] ConversionError),
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error("repository: {0}")]
    Repository(RepositoryError),
    #[error("processing queue unavailable")]
    QueueUnavailable,
}
