use std::sync::Arc;

use crate::application::services::{NoteService, RecordingService};

#[derive(Clone)]
pub struct AppState {
    pub recording_service: Arc<RecordingService>,
    pub note_service: Arc<NoteService>,
}
