use sqlx::SqlitePool;

use voxnote::application::ports::{NoteRepository, RecordingRepository};
use voxnote::domain::{Note, Recording, RecordingId, RecordingStatus, StorageKey, UserId};
use voxnote::infrastructure::persistence::{
    create_pool, init_schema, SqliteNoteRepository, SqliteRecordingRepository,
};

// One connection only: every connection of `sqlite::memory:` gets its own
// empty database.
async fn create_test_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:", 1).await.unwrap();
    init_schema(&pool).await.unwrap();
    pool
}

fn new_recording(user: &str) -> Recording {
    let user_id = UserId::new(user);
    let id = RecordingId::new();
    let storage_key = StorageKey::new(&user_id, &id);
    Recording::new(id, user_id, storage_key)
}

fn new_note(user: &str, recording_id: RecordingId, title: &str) -> Note {
    Note::new(
        UserId::new(user),
        recording_id,
        title.to_string(),
        "full transcription".to_string(),
        "short summary".to_string(),
    )
}

#[tokio::test]
async fn given_created_recording_when_finding_by_id_then_all_fields_survive() {
    let pool = create_test_pool().await;
    let repository = SqliteRecordingRepository::new(pool);
    let recording = new_recording("user-1");

    repository.create(&recording).await.unwrap();
    let loaded = repository.find_by_id(recording.id).await.unwrap().unwrap();

    assert_eq!(loaded.id, recording.id);
    assert_eq!(loaded.user_id, recording.user_id);
    assert_eq!(loaded.storage_key.as_str(), recording.storage_key.as_str());
    assert_eq!(loaded.status, RecordingStatus::Pending);
    assert!(loaded.note_id.is_none());
    assert!(loaded.error.is_none());
}

#[tokio::test]
async fn given_other_users_recording_when_finding_scoped_then_nothing_is_returned() {
    let pool = create_test_pool().await;
    let repository = SqliteRecordingRepository::new(pool);
    let recording = new_recording("user-1");
    repository.create(&recording).await.unwrap();

    let scoped = repository
        .find_by_id_for_user(recording.id, &UserId::new("user-2"))
        .await
        .unwrap();
    assert!(scoped.is_none());

    let owner = repository
        .find_by_id_for_user(recording.id, &UserId::new("user-1"))
        .await
        .unwrap();
    assert!(owner.is_some());
}

#[tokio::test]
async fn given_failed_recording_when_completing_then_error_is_cleared() {
    let pool = create_test_pool().await;
    let repository = SqliteRecordingRepository::new(pool);
    let recording = new_recording("user-1");
    repository.create(&recording).await.unwrap();

    repository
        .update_status(recording.id, RecordingStatus::Failed, Some("encoder died"))
        .await
        .unwrap();

    let failed = repository.find_by_id(recording.id).await.unwrap().unwrap();
    assert_eq!(failed.status, RecordingStatus::Failed);
    assert_eq!(failed.error.as_deref(), Some("encoder died"));

    let note = new_note("user-1", recording.id, "Retry worked");
    repository.complete(recording.id, note.id).await.unwrap();

    let completed = repository.find_by_id(recording.id).await.unwrap().unwrap();
    assert_eq!(completed.status, RecordingStatus::Completed);
    assert_eq!(completed.note_id, Some(note.id));
    assert!(completed.error.is_none());
}

#[tokio::test]
async fn given_deleted_recording_when_finding_then_nothing_is_returned() {
    let pool = create_test_pool().await;
    let repository = SqliteRecordingRepository::new(pool);
    let recording = new_recording("user-1");
    repository.create(&recording).await.unwrap();

    repository.delete(recording.id).await.unwrap();

    assert!(repository.find_by_id(recording.id).await.unwrap().is_none());
}

#[tokio::test]
async fn given_notes_for_two_users_when_listing_then_only_own_notes_newest_first() {
    let pool = create_test_pool().await;
    let recordings = SqliteRecordingRepository::new(pool.clone());
    let notes = SqliteNoteRepository::new(pool);

    let first = new_recording("user-1");
    let second = new_recording("user-1");
    let foreign = new_recording("user-2");
    recordings.create(&first).await.unwrap();
    recordings.create(&second).await.unwrap();
    recordings.create(&foreign).await.unwrap();

    let mut older = new_note("user-1", first.id, "Older");
    older.created_at = older.created_at - chrono::Duration::seconds(10);
    notes.create(&older).await.unwrap();
    notes
        .create(&new_note("user-1", second.id, "Newer"))
        .await
        .unwrap();
    notes
        .create(&new_note("user-2", foreign.id, "Foreign"))
        .await
        .unwrap();

    let listed = notes.list_for_user(&UserId::new("user-1")).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "Newer");
    assert_eq!(listed[1].title, "Older");
}

#[tokio::test]
async fn given_favorited_note_when_listing_favorites_then_only_it_appears() {
    let pool = create_test_pool().await;
    let notes = SqliteNoteRepository::new(pool);
    let user = UserId::new("user-1");

    let plain = new_note("user-1", RecordingId::new(), "Plain");
    let starred = new_note("user-1", RecordingId::new(), "Starred");
    notes.create(&plain).await.unwrap();
    notes.create(&starred).await.unwrap();

    let updated = notes.set_favorite(starred.id, &user, true).await.unwrap();
    assert!(updated);

    let favorites = notes.list_favorites(&user).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].title, "Starred");
    assert!(favorites[0].is_favorite);
}

#[tokio::test]
async fn given_foreign_note_when_setting_favorite_then_no_row_is_touched() {
    let pool = create_test_pool().await;
    let notes = SqliteNoteRepository::new(pool);

    let note = new_note("user-1", RecordingId::new(), "Mine");
    notes.create(&note).await.unwrap();

    let updated = notes
        .set_favorite(note.id, &UserId::new("user-2"), true)
        .await
        .unwrap();
    assert!(!updated);

    let reloaded = notes
        .find_by_id_for_user(note.id, &UserId::new("user-1"))
        .await
        .unwrap()
        .unwrap();
    assert!(!reloaded.is_favorite);
}

#[tokio::test]
async fn given_owned_note_when_deleting_then_second_delete_reports_absence() {
    let pool = create_test_pool().await;
    let notes = SqliteNoteRepository::new(pool);
    let user = UserId::new("user-1");

    let note = new_note("user-1", RecordingId::new(), "Ephemeral");
    notes.create(&note).await.unwrap();

    assert!(notes.delete_for_user(note.id, &user).await.unwrap());
    assert!(!notes.delete_for_user(note.id, &user).await.unwrap());
}

#[tokio::test]
async fn given_recording_with_note_when_deleting_by_recording_then_note_is_gone() {
    let pool = create_test_pool().await;
    let notes = SqliteNoteRepository::new(pool);
    let user = UserId::new("user-1");
    let recording_id = RecordingId::new();

    let attached = new_note("user-1", recording_id, "Attached");
    let unrelated = new_note("user-1", RecordingId::new(), "Unrelated");
    notes.create(&attached).await.unwrap();
    notes.create(&unrelated).await.unwrap();

    notes.delete_by_recording_id(recording_id).await.unwrap();

    let remaining = notes.list_for_user(&user).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Unrelated");
}
