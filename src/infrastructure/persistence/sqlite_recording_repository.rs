use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{RecordingRepository, RepositoryError};
use crate::domain::{NoteId, Recording, RecordingId, RecordingStatus, StorageKey, UserId};

pub struct SqliteRecordingRepository {
    pool: SqlitePool,
}

impl SqliteRecordingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &SqliteRow) -> Result<Recording, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let storage_key: String = row
        .try_get("storage_key")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let note_id: Option<String> = row
        .try_get("note_id")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let error: Option<String> = row
        .try_get("error")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

    let id = Uuid::parse_str(&id).map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let note_id = note_id
        .map(|n| Uuid::parse_str(&n).map(NoteId::from_uuid))
        .transpose()
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let status = status
        .parse::<RecordingStatus>()
        .map_err(RepositoryError::QueryFailed)?;

    Ok(Recording {
        id: RecordingId::from_uuid(id),
        user_id: UserId::new(user_id),
        storage_key: StorageKey::from_raw(storage_key),
        status,
        note_id,
        error,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl RecordingRepository for SqliteRecordingRepository {
    #[instrument(skip(self, recording), fields(recording_id = %recording.id.as_uuid()))]
    async fn create(&self, recording: &Recording) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO recordings (id, user_id, storage_key, status, note_id, error, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(recording.id.as_uuid().to_string())
        .bind(recording.user_id.as_str())
        .bind(recording.storage_key.as_str())
        .bind(recording.status.as_str())
        .bind(recording.note_id.map(|n| n.as_uuid().to_string()))
        .bind(recording.error.as_deref())
        .bind(recording.created_at)
        .bind(recording.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(recording_id = %id.as_uuid()))]
    async fn find_by_id(&self, id: RecordingId) -> Result<Option<Recording>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM recordings WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    #[instrument(skip(self), fields(recording_id = %id.as_uuid()))]
    async fn find_by_id_for_user(
        &self,
        id: RecordingId,
        user_id: &UserId,
    ) -> Result<Option<Recording>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM recordings WHERE id = ?1 AND user_id = ?2")
            .bind(id.as_uuid().to_string())
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    #[instrument(skip(self, error), fields(recording_id = %id.as_uuid(), status = %status))]
    async fn update_status(
        &self,
        id: RecordingId,
        status: RecordingStatus,
        error: Option<&str>,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE recordings SET status = ?1, error = ?2, updated_at = ?3 WHERE id = ?4")
            .bind(status.as_str())
            .bind(error)
            .bind(Utc::now())
            .bind(id.as_uuid().to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(recording_id = %id.as_uuid(), note_id = %note_id.as_uuid()))]
    async fn complete(&self, id: RecordingId, note_id: NoteId) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE recordings
            SET status = ?1, note_id = ?2, error = NULL, updated_at = ?3
            WHERE id = ?4
            "#,
        )
        .bind(RecordingStatus::Completed.as_str())
        .bind(note_id.as_uuid().to_string())
        .bind(Utc::now())
        .bind(id.as_uuid().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(recording_id = %id.as_uuid()))]
    async fn delete(&self, id: RecordingId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM recordings WHERE id = ?1")
            .bind(id.as_uuid().to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
