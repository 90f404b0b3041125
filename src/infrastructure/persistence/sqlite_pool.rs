use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::instrument;

use crate::application::ports::RepositoryError;

#[instrument(skip(url))]
pub async fn create_pool(url: &str, max_connections: u32) -> Result<SqlitePool, RepositoryError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

    tracing::info!(max_connections, "Database pool created");
    Ok(pool)
}

/// Idempotent schema initialization, run once at startup.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS recordings (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            storage_key TEXT NOT NULL,
            status TEXT NOT NULL,
            note_id TEXT,
            error TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_recordings_user_id ON recordings(user_id)",
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            recording_id TEXT NOT NULL,
            title TEXT NOT NULL,
            transcription TEXT NOT NULL,
            summary TEXT NOT NULL,
            is_favorite INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_notes_user_id ON notes(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_notes_favorite ON notes(user_id, is_favorite)",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    }

    tracing::info!("Database schema initialized");
    Ok(())
}
