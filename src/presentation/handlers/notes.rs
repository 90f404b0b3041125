use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::NoteServiceError;
use crate::domain::{Note, NoteId};
use crate::presentation::auth::AuthenticatedUser;
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[derive(Serialize)]
pub struct NoteResponse {
    pub id: String,
    pub recording_id: String,
    pub title: String,
    pub transcription: String,
    pub summary: String,
    pub is_favorite: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Note> for NoteResponse {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.as_uuid().to_string(),
            recording_id: note.recording_id.as_uuid().to_string(),
            title: note.title.clone(),
            transcription: note.transcription.clone(),
            summary: note.summary.clone(),
            is_favorite: note.is_favorite,
            created_at: note.created_at.to_rfc3339(),
            updated_at: note.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateFavoriteRequest {
    pub is_favorite: bool,
}

fn error_response(error: NoteServiceError) -> axum::response::Response {
    let status = match error {
        NoteServiceError::NotFound => StatusCode::NOT_FOUND,
        NoteServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state), fields(user_id = %user_id))]
pub async fn list_notes_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> impl IntoResponse {
    match state.note_service.list(&user_id).await {
        Ok(notes) => {
            let body: Vec<NoteResponse> = notes.iter().map(NoteResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[tracing::instrument(skip(state), fields(user_id = %user_id))]
pub async fn list_favorite_notes_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> impl IntoResponse {
    match state.note_service.list_favorites(&user_id).await {
        Ok(notes) => {
            let body: Vec<NoteResponse> = notes.iter().map(NoteResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[tracing::instrument(skip(state), fields(user_id = %user_id))]
pub async fn get_note_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let id = NoteId::from_uuid(id);
    match state.note_service.find(id, &user_id).await {
        Ok(note) => (StatusCode::OK, Json(NoteResponse::from(&note))).into_response(),
        Err(e) => error_response(e),
    }
}

#[tracing::instrument(skip(state, request), fields(user_id = %user_id))]
pub async fn update_favorite_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFavoriteRequest>,
) -> impl IntoResponse {
    let id = NoteId::from_uuid(id);
    match state
        .note_service
        .set_favorite(id, &user_id, request.is_favorite)
        .await
    {
        Ok(note) => (StatusCode::OK, Json(NoteResponse::from(&note))).into_response(),
        Err(e) => error_response(e),
    }
}

#[tracing::instrument(skip(state), fields(user_id = %user_id))]
pub async fn delete_note_handler(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let id = NoteId::from_uuid(id);
    match state.note_service.delete(id, &user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
