use async_trait::async_trait;

use crate::domain::{Note, NoteId, RecordingId, UserId};

use super::RepositoryError;

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create(&self, note: &Note) -> Result<(), RepositoryError>;

    async fn find_by_id_for_user(
        &self,
        id: NoteId,
        user_id: &UserId,
    ) -> Result<Option<Note>, RepositoryError>;

    /// Newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Note>, RepositoryError>;

    async fn list_favorites(&self, user_id: &UserId) -> Result<Vec<Note>, RepositoryError>;

    /// Returns false when no note matched the id/owner pair.
    async fn set_favorite(
        &self,
        id: NoteId,
        user_id: &UserId,
        is_favorite: bool,
    ) -> Result<bool, RepositoryError>;

    /// Returns false when no note matched the id/owner pair.
    async fn delete_for_user(&self, id: NoteId, user_id: &UserId) -> Result<bool, RepositoryError>;

    /// Cascade path used by recording deletion; absent note is not an error.
    async fn delete_by_recording_id(&self, recording_id: RecordingId)
        -> Result<(), RepositoryError>;
}
