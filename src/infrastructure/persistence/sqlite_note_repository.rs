use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{NoteRepository, RepositoryError};
use crate::domain::{Note, NoteId, RecordingId, UserId};

pub struct SqliteNoteRepository {
    pool: SqlitePool,
}

impl SqliteNoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &SqliteRow) -> Result<Note, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let recording_id: String = row
        .try_get("recording_id")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let title: String = row
        .try_get("title")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let transcription: String = row
        .try_get("transcription")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let summary: String = row
        .try_get("summary")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let is_favorite: bool = row
        .try_get("is_favorite")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

    let id = Uuid::parse_str(&id).map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let recording_id =
        Uuid::parse_str(&recording_id).map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

    Ok(Note {
        id: NoteId::from_uuid(id),
        user_id: UserId::new(user_id),
        recording_id: RecordingId::from_uuid(recording_id),
        title,
        transcription,
        summary,
        is_favorite,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    #[instrument(skip(self, note), fields(note_id = %note.id.as_uuid()))]
    async fn create(&self, note: &Note) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, recording_id, title, transcription, summary, is_favorite, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(note.id.as_uuid().to_string())
        .bind(note.user_id.as_str())
        .bind(note.recording_id.as_uuid().to_string())
        .bind(&note.title)
        .bind(&note.transcription)
        .bind(&note.summary)
        .bind(note.is_favorite)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(note_id = %id.as_uuid()))]
    async fn find_by_id_for_user(
        &self,
        id: NoteId,
        user_id: &UserId,
    ) -> Result<Option<Note>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM notes WHERE id = ?1 AND user_id = ?2")
            .bind(id.as_uuid().to_string())
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Note>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM notes WHERE user_id = ?1 ORDER BY created_at DESC")
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }

    #[instrument(skip(self))]
    async fn list_favorites(&self, user_id: &UserId) -> Result<Vec<Note>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM notes
            WHERE user_id = ?1 AND is_favorite = 1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }

    #[instrument(skip(self), fields(note_id = %id.as_uuid()))]
    async fn set_favorite(
        &self,
        id: NoteId,
        user_id: &UserId,
        is_favorite: bool,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE notes SET is_favorite = ?1, updated_at = ?2 WHERE id = ?3 AND user_id = ?4",
        )
        .bind(is_favorite)
        .bind(Utc::now())
        .bind(id.as_uuid().to_string())
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(note_id = %id.as_uuid()))]
    async fn delete_for_user(&self, id: NoteId, user_id: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?1 AND user_id = ?2")
            .bind(id.as_uuid().to_string())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(recording_id = %recording_id.as_uuid()))]
    async fn delete_by_recording_id(
        &self,
        recording_id: RecordingId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM notes WHERE recording_id = ?1")
            .bind(recording_id.as_uuid().to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
