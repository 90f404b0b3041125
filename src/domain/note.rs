use chrono::{DateTime, Utc};

use super::{NoteId, RecordingId, UserId};

/// The durable transcription + summary artifact produced from a successfully
/// processed recording. Immutable after creation except for `is_favorite`.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: NoteId,
    pub user_id: UserId,
    pub recording_id: RecordingId,
    pub title: String,
    pub transcription: String,
    pub summary: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(
        user_id: UserId,
        recording_id: RecordingId,
        title: String,
        transcription: String,
        summary: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            user_id,
            recording_id,
            title,
            transcription,
            summary,
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }
}
