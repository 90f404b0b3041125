use std::sync::Arc;

use crate::application::ports::{NoteRepository, RepositoryError};
use crate::domain::{Note, NoteId, UserId};

/// Owner-scoped read surface over notes plus the one permitted mutation, the
/// favorite flag.
pub struct NoteService {
    note_repository: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(note_repository: Arc<dyn NoteRepository>) -> Self {
        Self { note_repository }
    }

    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Note>, NoteServiceError> {
        self.note_repository
            .list_for_user(user_id)
            .await
            .map_err(NoteServiceError::Repository)
    }

    pub async fn list_favorites(&self, user_id: &UserId) -> Result<Vec<Note>, NoteServiceError> {
        self.note_repository
            .list_favorites(user_id)
            .await
            .map_err(NoteServiceError::Repository)
    }

    pub async fn find(&self, id: NoteId, user_id: &UserId) -> Result<Note, NoteServiceError> {
        self.note_repository
            .find_by_id_for_user(id, user_id)
            .await
            .map_err(NoteServiceError::Repository)?
            .ok_or(NoteServiceError::NotFound)
    }

    pub async fn set_favorite(
        &self,
        id: NoteId,
        user_id: &UserId,
        is_favorite: bool,
    ) -> Result<Note, NoteServiceError> {
        let updated = self
            .note_repository
            .set_favorite(id, user_id, is_favorite)
            .await
            .map_err(NoteServiceError::Repository)?;

        if !updated {
            return Err(NoteServiceError::NotFound);
        }

        self.find(id, user_id).await
    }

    pub async fn delete(&self, id: NoteId, user_id: &UserId) -> Result<(), NoteServiceError> {
        let deleted = self
            .note_repository
            .delete_for_user(id, user_id)
            .await
            .map_err(NoteServiceError::Repository)?;

        if !deleted {
            return Err(NoteServiceError::NotFound);
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error("note not found")]
    NotFound,
    #[error("repository: {0}")]
    Repository(RepositoryError),
}
