mod health;
mod notes;
mod recordings;

use serde::Serialize;

pub use health::health_handler;
pub use notes::{
    delete_note_handler, get_note_handler, list_favorite_notes_handler, list_notes_handler,
    update_favorite_handler, NoteResponse,
};
pub use recordings::{
    audio_url_handler, delete_recording_handler, get_recording_handler, upload_recording_handler,
    RecordingResponse,
};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
