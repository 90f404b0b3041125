use async_trait::async_trait;

use crate::domain::{NoteId, Recording, RecordingId, RecordingStatus, UserId};

use super::RepositoryError;

/// Persistence seam for recordings. The pipeline is the only writer of
/// `status`/`error`/`note_id` after creation, and it operates by id alone;
/// user-facing reads are owner-scoped.
#[async_trait]
pub trait RecordingRepository: Send + Sync {
    async fn create(&self, recording: &Recording) -> Result<(), RepositoryError>;

    /// Unscoped lookup, for trusted internal callers only.
    async fn find_by_id(&self, id: RecordingId) -> Result<Option<Recording>, RepositoryError>;

    async fn find_by_id_for_user(
        &self,
        id: RecordingId,
        user_id: &UserId,
    ) -> Result<Option<Recording>, RepositoryError>;

    /// Update-by-id carrying only the changed fields; never a load-mutate-save.
    async fn update_status(
        &self,
        id: RecordingId,
        status: RecordingStatus,
        error: Option<&str>,
    ) -> Result<(), RepositoryError>;

    /// Transition to `completed` and attach the note reference in one write.
    async fn complete(&self, id: RecordingId, note_id: NoteId) -> Result<(), RepositoryError>;

    async fn delete(&self, id: RecordingId) -> Result<(), RepositoryError>;
}
