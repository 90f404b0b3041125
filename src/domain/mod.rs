mod note;
mod note_id;
mod recording;
mod recording_id;
mod recording_status;
mod storage_key;
mod title;
mod user_id;

pub use note::Note;
pub use note_id::NoteId;
pub use recording::Recording;
pub use recording_id::RecordingId;
pub use recording_status::RecordingStatus;
pub use storage_key::StorageKey;
pub use title::derive_title;
pub use user_id::UserId;
