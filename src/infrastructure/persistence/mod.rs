mod sqlite_note_repository;
mod sqlite_pool;
mod sqlite_recording_repository;

pub use sqlite_note_repository::SqliteNoteRepository;
pub use sqlite_pool::{create_pool, init_schema};
pub use sqlite_recording_repository::SqliteRecordingRepository;
