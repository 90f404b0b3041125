use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    audio_url_handler, delete_note_handler, delete_recording_handler, get_note_handler,
    get_recording_handler, health_handler, list_favorite_notes_handler, list_notes_handler,
    update_favorite_handler, upload_recording_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/recordings/upload", post(upload_recording_handler))
        .route(
            "/api/v1/recordings/{id}",
            get(get_recording_handler).delete(delete_recording_handler),
        )
        .route("/api/v1/recordings/{id}/audio-url", get(audio_url_handler))
        .route("/api/v1/notes", get(list_notes_handler))
        .route("/api/v1/notes/favorites", get(list_favorite_notes_handler))
        .route(
            "/api/v1/notes/{id}",
            get(get_note_handler).delete(delete_note_handler),
        )
        .route("/api/v1/notes/{id}/favorite", put(update_favorite_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
