mod note_service;
mod pipeline;
mod pipeline_worker;
mod recording_service;

pub use note_service::{NoteService, NoteServiceError};
pub use pipeline::{PipelineError, RecordingPipeline};
pub use pipeline_worker::{PipelineWorker, ProcessingMessage};
pub use recording_service::{RecordingService, RecordingServiceError};
