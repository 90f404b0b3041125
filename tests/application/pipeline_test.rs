use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use voxnote::application::ports::{
    NoteRepository, RepositoryError, TranscriptionClient, TranscriptionError,
};
use voxnote::application::services::RecordingPipeline;
use voxnote::domain::{
    Note, NoteId, Recording, RecordingId, RecordingStatus, StorageKey, UserId,
};

use crate::helpers::{
    EmptyTranscriptClient, FailingSummarizer, InMemoryNoteRepository, InMemoryRecordingRepository,
    StaticSummarizer, StaticTranscriptionClient,
};

fn pending_recording(user: &str) -> Recording {
    let user_id = UserId::new(user);
    let id = RecordingId::new();
    let key = StorageKey::new(&user_id, &id);
    Recording::new(id, user_id, key)
}

fn pipeline(
    recordings: Arc<InMemoryRecordingRepository>,
    notes: Arc<InMemoryNoteRepository>,
    transcription: Arc<dyn TranscriptionClient>,
    summarizer: Arc<dyn voxnote::application::ports::Summarizer>,
) -> RecordingPipeline {
    RecordingPipeline::new(recordings, notes, transcription, summarizer, "en-US".to_string())
}

#[tokio::test]
async fn given_successful_stages_when_processing_then_recording_completes_with_one_note() {
    let recordings = Arc::new(InMemoryRecordingRepository::default());
    let notes = Arc::new(InMemoryNoteRepository::default());
    let recording = pending_recording("user-1");
    let recording_id = recording.id;
    recordings.insert(recording);

    let pipeline = pipeline(
        Arc::clone(&recordings),
        Arc::clone(&notes),
        Arc::new(StaticTranscriptionClient(
            "Weekly sync. We agreed to ship on Friday".to_string(),
        )),
        Arc::new(StaticSummarizer("Ship on Friday.".to_string())),
    );

    pipeline.process(recording_id).await;

    let stored = recordings.get(recording_id).unwrap();
    assert_eq!(stored.status, RecordingStatus::Completed);
    assert!(stored.error.is_none());

    let note_id = stored.note_id.expect("completed recording must carry a note id");
    let all_notes = notes.all();
    assert_eq!(all_notes.len(), 1);
    let note = &all_notes[0];
    assert_eq!(note.id, note_id);
    assert_eq!(note.recording_id, recording_id);
    assert_eq!(note.user_id, UserId::new("user-1"));
    assert_eq!(note.title, "Weekly sync");
    assert_eq!(note.transcription, "Weekly sync. We agreed to ship on Friday");
    assert_eq!(note.summary, "Ship on Friday.");
    assert!(!note.is_favorite);
}

#[tokio::test]
async fn given_empty_transcription_when_processing_then_recording_fails_with_no_note() {
    let recordings = Arc::new(InMemoryRecordingRepository::default());
    let notes = Arc::new(InMemoryNoteRepository::default());
    let recording = pending_recording("user-1");
    let recording_id = recording.id;
    recordings.insert(recording);

    let pipeline = pipeline(
        Arc::clone(&recordings),
        Arc::clone(&notes),
        Arc::new(EmptyTranscriptClient),
        Arc::new(StaticSummarizer("unused".to_string())),
    );

    pipeline.process(recording_id).await;

    let stored = recordings.get(recording_id).unwrap();
    assert_eq!(stored.status, RecordingStatus::Failed);
    assert!(stored.note_id.is_none());
    let error = stored.error.expect("failed recording must carry an error");
    assert!(error.contains("empty transcription result"));
    assert_eq!(notes.len(), 0);
}

#[tokio::test]
async fn given_summarization_failure_when_processing_then_transcription_is_discarded() {
    let recordings = Arc::new(InMemoryRecordingRepository::default());
    let notes = Arc::new(InMemoryNoteRepository::default());
    let recording = pending_recording("user-1");
    let recording_id = recording.id;
    recordings.insert(recording);

    let pipeline = pipeline(
        Arc::clone(&recordings),
        Arc::clone(&notes),
        Arc::new(StaticTranscriptionClient("A perfectly good transcript.".to_string())),
        Arc::new(FailingSummarizer),
    );

    pipeline.process(recording_id).await;

    let stored = recordings.get(recording_id).unwrap();
    assert_eq!(stored.status, RecordingStatus::Failed);
    assert!(stored.note_id.is_none());
    assert!(stored.error.unwrap().contains("summarization"));
    assert_eq!(notes.len(), 0);
}

struct FailingNoteRepository;

#[async_trait]
impl NoteRepository for FailingNoteRepository {
    async fn create(&self, _note: &Note) -> Result<(), RepositoryError> {
        Err(RepositoryError::QueryFailed("disk full".to_string()))
    }

    async fn find_by_id_for_user(
        &self,
        _id: NoteId,
        _user_id: &UserId,
    ) -> Result<Option<Note>, RepositoryError> {
        Ok(None)
    }

    async fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<Note>, RepositoryError> {
        Ok(vec![])
    }

    async fn list_favorites(&self, _user_id: &UserId) -> Result<Vec<Note>, RepositoryError> {
        Ok(vec![])
    }

    async fn set_favorite(
        &self,
        _id: NoteId,
        _user_id: &UserId,
        _is_favorite: bool,
    ) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn delete_for_user(
        &self,
        _id: NoteId,
        _user_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn delete_by_recording_id(
        &self,
        _recording_id: RecordingId,
    ) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[tokio::test]
async fn given_note_creation_failure_when_processing_then_no_completion_is_committed() {
    let recordings = Arc::new(InMemoryRecordingRepository::default());
    let recording = pending_recording("user-1");
    let recording_id = recording.id;
    recordings.insert(recording);

    let pipeline = RecordingPipeline::new(
        Arc::clone(&recordings) as Arc<dyn voxnote::application::ports::RecordingRepository>,
        Arc::new(FailingNoteRepository),
        Arc::new(StaticTranscriptionClient("Some transcript.".to_string())),
        Arc::new(StaticSummarizer("Some summary.".to_string())),
        "en-US".to_string(),
    );

    pipeline.process(recording_id).await;

    let stored = recordings.get(recording_id).unwrap();
    assert_eq!(stored.status, RecordingStatus::Failed);
    assert!(stored.note_id.is_none());
    assert!(stored.error.unwrap().contains("disk full"));
}

#[tokio::test]
async fn given_missing_recording_when_processing_then_nothing_happens() {
    let recordings = Arc::new(InMemoryRecordingRepository::default());
    let notes = Arc::new(InMemoryNoteRepository::default());

    let pipeline = pipeline(
        Arc::clone(&recordings),
        Arc::clone(&notes),
        Arc::new(StaticTranscriptionClient("unused".to_string())),
        Arc::new(StaticSummarizer("unused".to_string())),
    );

    pipeline.process(RecordingId::new()).await;

    assert_eq!(recordings.len(), 0);
    assert_eq!(notes.len(), 0);
}

/// Records the persisted status visible at the moment transcription starts.
struct StatusObservingClient {
    recordings: Arc<InMemoryRecordingRepository>,
    recording_id: RecordingId,
    observed: Mutex<Option<RecordingStatus>>,
}

#[async_trait]
impl TranscriptionClient for StatusObservingClient {
    async fn transcribe(
        &self,
        _storage_key: &StorageKey,
        _language: &str,
    ) -> Result<String, TranscriptionError> {
        let status = self.recordings.get(self.recording_id).map(|r| r.status);
        *self.observed.lock().unwrap() = status;
        Ok("observed transcript".to_string())
    }
}

#[tokio::test]
async fn given_pipeline_start_when_transcribing_then_processing_status_is_already_persisted() {
    let recordings = Arc::new(InMemoryRecordingRepository::default());
    let notes = Arc::new(InMemoryNoteRepository::default());
    let recording = pending_recording("user-1");
    let recording_id = recording.id;
    recordings.insert(recording);

    let observer = Arc::new(StatusObservingClient {
        recordings: Arc::clone(&recordings),
        recording_id,
        observed: Mutex::new(None),
    });

    let pipeline = pipeline(
        Arc::clone(&recordings),
        Arc::clone(&notes),
        Arc::clone(&observer) as Arc<dyn TranscriptionClient>,
        Arc::new(StaticSummarizer("summary".to_string())),
    );

    pipeline.process(recording_id).await;

    let observed = observer.observed.lock().unwrap();
    assert_eq!(*observed, Some(RecordingStatus::Processing));
}

struct SlowTranscriptionClient(String);

#[async_trait]
impl TranscriptionClient for SlowTranscriptionClient {
    async fn transcribe(
        &self,
        _storage_key: &StorageKey,
        _language: &str,
    ) -> Result<String, TranscriptionError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn given_two_recordings_for_different_users_when_processed_concurrently_then_both_complete_independently()
{
    let recordings = Arc::new(InMemoryRecordingRepository::default());
    let notes = Arc::new(InMemoryNoteRepository::default());

    let first = pending_recording("user-a");
    let second = pending_recording("user-b");
    let first_id = first.id;
    let second_id = second.id;
    recordings.insert(first);
    recordings.insert(second);

    let pipeline = Arc::new(pipeline(
        Arc::clone(&recordings),
        Arc::clone(&notes),
        Arc::new(SlowTranscriptionClient("Independent transcript.".to_string())),
        Arc::new(StaticSummarizer("Independent summary.".to_string())),
    ));

    let a = Arc::clone(&pipeline);
    let b = Arc::clone(&pipeline);
    tokio::join!(a.process(first_id), b.process(second_id));

    let first_stored = recordings.get(first_id).unwrap();
    let second_stored = recordings.get(second_id).unwrap();
    assert_eq!(first_stored.status, RecordingStatus::Completed);
    assert_eq!(second_stored.status, RecordingStatus::Completed);

    let all_notes = notes.all();
    assert_eq!(all_notes.len(), 2);
    let first_note = all_notes
        .iter()
        .find(|n| n.recording_id == first_id)
        .unwrap();
    let second_note = all_notes
        .iter()
        .find(|n| n.recording_id == second_id)
        .unwrap();
    assert_eq!(first_note.user_id, UserId::new("user-a"));
    assert_eq!(second_note.user_id, UserId::new("user-b"));
    assert_eq!(first_stored.note_id, Some(first_note.id));
    assert_eq!(second_stored.note_id, Some(second_note.id));
}
