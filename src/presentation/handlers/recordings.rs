use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::application::services::RecordingServiceError;
use crate::domain::{Recording, RecordingId};
use crate::presentation::auth::AuthenticatedUser;
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[derive(Serialize)]
pub struct RecordingResponse {
    pub id: String,
    pub status: String,
    pub note_id: Option<String>,
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Recording> for RecordingResponse {
    fn from(recording: &Recording) -> Self {
        Self {
            id: recording.id.as_uuid().to_string(),
            status: recording.status.as_str().to_string(),
            note_id: recording.note_id.map(|n| n.as_uuid().to_string()),
            error: recording.error.clone(),
            created_at: recording.created_at.to_rfc3339(),
            updated_at: recording.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct AudioUrlResponse {
    pub url: String,
}

fn error_status(error: &RecordingServiceError) -> StatusCode {
    match error {
        RecordingServiceError::NotFound => StatusCode::NOT_FOUND,
        RecordingServiceError::Conversion(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecordingServiceError::QueueUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        RecordingServiceError::Storage(_) | RecordingServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: RecordingServiceError) -> axum::response::Response {
    (
        error_status(&error),
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, multipart), fields(user_id = %user_id))]
pub async fn upload_recording_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Upload request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filename = field.file_name().unwrap_or("unknown").to_string();

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "Recording upload received");

    match state
        .recording_service
        .upload(user_id, &filename, &data)
        .await
    {
        Ok(recording) => {
            (StatusCode::CREATED, Json(RecordingResponse::from(&recording))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Recording upload failed");
            error_response(e)
        }
    }
}

#[tracing::instrument(skip(state), fields(user_id = %user_id))]
pub async fn get_recording_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let id = RecordingId::from_uuid(id);
    match state.recording_service.find_for_user(id, &user_id).await {
        Ok(recording) => (StatusCode::OK, Json(RecordingResponse::from(&recording))).into_response(),
        Err(e) => error_response(e),
    }
}

#[tracing::instrument(skip(state), fields(user_id = %user_id))]
pub async fn audio_url_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let id = RecordingId::from_uuid(id);
    match state.recording_service.audio_url(id, &user_id).await {
        Ok(url) => (StatusCode::OK, Json(AudioUrlResponse { url })).into_response(),
        Err(e) => error_response(e),
    }
}

#[tracing::instrument(skip(state), fields(user_id = %user_id))]
pub async fn delete_recording_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let id = RecordingId::from_uuid(id);
    match state.recording_service.delete(id, &user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
