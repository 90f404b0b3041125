use chrono::{DateTime, Utc};

use super::{NoteId, RecordingId, RecordingStatus, StorageKey, UserId};

/// A user's uploaded audio artifact and its processing status.
///
/// Invariants maintained by the repository and the pipeline: `note_id` is set
/// iff `status` is `Completed`, `error` is set iff `status` is `Failed`, and
/// at most one note is ever created for a recording.
#[derive(Debug, Clone)]
pub struct Recording {
    pub id: RecordingId,
    pub user_id: UserId,
    pub storage_key: StorageKey,
    pub status: RecordingStatus,
    pub note_id: Option<NoteId>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recording {
    pub fn new(id: RecordingId, user_id: UserId, storage_key: StorageKey) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            storage_key,
            status: RecordingStatus::Pending,
            note_id: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }
}
