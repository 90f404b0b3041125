mod audio_transcoder;
mod blob_store;
mod note_repository;
mod recording_repository;
mod repository_error;
mod summarizer;
mod transcription_client;

pub use audio_transcoder::{AudioTranscoder, ConversionError};
pub use blob_store::{BlobStore, StorageError};
pub use note_repository::NoteRepository;
pub use recording_repository::RecordingRepository;
pub use repository_error::RepositoryError;
pub use summarizer::{SummarizationError, Summarizer};
pub use transcription_client::{TranscriptionClient, TranscriptionError};
