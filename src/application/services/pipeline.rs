use std::sync::Arc;

use crate::application::ports::{
    NoteRepository, RecordingRepository, SummarizationError, Summarizer, TranscriptionClient,
    TranscriptionError,
};
use crate::domain::{derive_title, Note, Recording, RecordingId, RecordingStatus};

/// Drives a single recording through transcribe, summarize and persist,
/// updating the persisted status before each stage begins.
///
/// Every error raised by a stage is caught at this boundary and converted to
/// a terminal `failed` status with the captured message; nothing propagates
/// back to the upload caller, which has long since returned a `pending`
/// recording to the client.
pub struct RecordingPipeline {
    recording_repository: Arc<dyn RecordingRepository>,
    note_repository: Arc<dyn NoteRepository>,
    transcription_client: Arc<dyn TranscriptionClient>,
    summarizer: Arc<dyn Summarizer>,
    language: String,
}

impl RecordingPipeline {
    pub fn new(
        recording_repository: Arc<dyn RecordingRepository>,
        note_repository: Arc<dyn NoteRepository>,
        transcription_client: Arc<dyn TranscriptionClient>,
        summarizer: Arc<dyn Summarizer>,
        language: String,
    ) -> Self {
        Self {
            recording_repository,
            note_repository,
            transcription_client,
            summarizer,
            language,
        }
    }

    /// Runs the pipeline to a terminal state. Infallible from the caller's
    /// perspective; failures are persisted, not returned.
    pub async fn process(&self, recording_id: RecordingId) {
        let recording = match self.recording_repository.find_by_id(recording_id).await {
            Ok(Some(recording)) => recording,
            Ok(None) => {
                // Already removed; there is nothing left to update.
                tracing::debug!("Recording no longer exists, skipping");
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load recording for processing");
                return;
            }
        };

        if let Err(e) = self.run_stages(&recording).await {
            let message = e.to_string();
            tracing::error!(error = %message, "Recording processing failed");

            if let Err(update_err) = self
                .recording_repository
                .update_status(recording_id, RecordingStatus::Failed, Some(&message))
                .await
            {
                tracing::error!(error = %update_err, "Failed to persist failed status");
            }
        }
    }

    async fn run_stages(&self, recording: &Recording) -> Result<(), PipelineError> {
        self.update_status(recording.id, RecordingStatus::Processing)
            .await?;

        tracing::debug!(storage_key = %recording.storage_key, "Starting transcription");
        let transcription = self
            .transcription_client
            .transcribe(&recording.storage_key, &self.language)
            .await?;

        let title = derive_title(&transcription);

        tracing::debug!(chars = transcription.len(), "Starting summarization");
        let summary = self.summarizer.summarize(&transcription).await?;

        let note = Note::new(
            recording.user_id.clone(),
            recording.id,
            title,
            transcription,
            summary,
        );
        let note_id = note.id;

        self.note_repository
            .create(&note)
            .await
            .map_err(PipelineError::Repository)?;

        self.recording_repository
            .complete(recording.id, note_id)
            .await
            .map_err(PipelineError::Repository)?;

        tracing::info!(note_id = %note_id.as_uuid(), "Recording processing completed");
        Ok(())
    }

    async fn update_status(
        &self,
        id: RecordingId,
        status: RecordingStatus,
    ) -> Result<(), PipelineError> {
        tracing::debug!(status = %status, "Recording status transition");
        self.recording_repository
            .update_status(id, status, None)
            .await
            .map_err(PipelineError::Repository)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("summarization: {0}")]
    Summarization(#[from] SummarizationError),
    #[error("repository: {0}")]
    Repository(crate::application::ports::RepositoryError),
}
