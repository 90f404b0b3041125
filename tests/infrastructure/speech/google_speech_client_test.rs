use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use voxnote::application::ports::{TranscriptionClient, TranscriptionError};
use voxnote::domain::StorageKey;
use voxnote::infrastructure::speech::GoogleSpeechClient;

#[derive(Clone)]
struct MockSpeechBackend {
    captured_request: Arc<Mutex<Option<Value>>>,
    poll_count: Arc<AtomicUsize>,
    operation_response: Arc<Value>,
    pending_polls: usize,
}

async fn start_mock_backend(backend: MockSpeechBackend) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new()
        .route(
            "/v1/speech:longrunningrecognize",
            post(
                |State(backend): State<MockSpeechBackend>, Json(body): Json<Value>| async move {
                    *backend.captured_request.lock().unwrap() = Some(body);
                    Json(json!({ "name": "op-test-1" }))
                },
            ),
        )
        .route(
            "/v1/operations/{name}",
            get(|State(backend): State<MockSpeechBackend>| async move {
                let polls = backend.poll_count.fetch_add(1, Ordering::SeqCst);
                if polls < backend.pending_polls {
                    Json(json!({ "name": "op-test-1", "done": false })).into_response()
                } else {
                    Json(backend.operation_response.as_ref().clone()).into_response()
                }
            }),
        )
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn backend_with(operation_response: Value, pending_polls: usize) -> MockSpeechBackend {
    MockSpeechBackend {
        captured_request: Arc::new(Mutex::new(None)),
        poll_count: Arc::new(AtomicUsize::new(0)),
        operation_response: Arc::new(operation_response),
        pending_polls,
    }
}

fn client(base_url: &str) -> GoogleSpeechClient {
    GoogleSpeechClient::new(
        base_url,
        "test-key",
        "test-bucket",
        "latest_long",
        vec!["API".to_string()],
        Duration::from_millis(10),
    )
}

#[tokio::test]
async fn given_completed_job_when_transcribing_then_segments_collapse_in_order() {
    let backend = backend_with(
        json!({
            "name": "op-test-1",
            "done": true,
            "response": {
                "results": [
                    { "alternatives": [
                        { "transcript": "hello", "confidence": 0.4 },
                        { "transcript": "hallo", "confidence": 0.9 }
                    ]},
                    { "alternatives": [ { "transcript": "world", "confidence": 0.8 } ] }
                ]
            }
        }),
        0,
    );
    let (base_url, shutdown) = start_mock_backend(backend.clone()).await;
    let client = client(&base_url);

    let transcript = client
        .transcribe(&StorageKey::from_raw("user-1/rec.wav"), "en-US")
        .await
        .unwrap();

    assert_eq!(transcript, "hallo world");

    let captured = backend.captured_request.lock().unwrap().clone().unwrap();
    assert_eq!(captured["config"]["encoding"], "LINEAR16");
    assert_eq!(captured["config"]["sampleRateHertz"], 16_000);
    assert_eq!(captured["config"]["audioChannelCount"], 1);
    assert_eq!(captured["config"]["languageCode"], "en-US");
    assert_eq!(captured["config"]["model"], "latest_long");
    assert_eq!(captured["audio"]["uri"], "gs://test-bucket/user-1/rec.wav");

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_running_job_when_transcribing_then_client_polls_until_done() {
    let backend = backend_with(
        json!({
            "name": "op-test-1",
            "done": true,
            "response": {
                "results": [ { "alternatives": [ { "transcript": "late result" } ] } ]
            }
        }),
        3,
    );
    let (base_url, shutdown) = start_mock_backend(backend.clone()).await;
    let client = client(&base_url);

    let transcript = client
        .transcribe(&StorageKey::from_raw("user-1/rec.wav"), "en-US")
        .await
        .unwrap();

    assert_eq!(transcript, "late result");
    assert!(backend.poll_count.load(Ordering::SeqCst) >= 4);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_zero_segments_when_transcribing_then_empty_transcript_error() {
    let backend = backend_with(
        json!({ "name": "op-test-1", "done": true, "response": { "results": [] } }),
        0,
    );
    let (base_url, shutdown) = start_mock_backend(backend).await;
    let client = client(&base_url);

    let result = client
        .transcribe(&StorageKey::from_raw("user-1/rec.wav"), "en-US")
        .await;

    assert!(matches!(result, Err(TranscriptionError::EmptyTranscript)));

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_failed_operation_when_transcribing_then_job_failed_error() {
    let backend = backend_with(
        json!({
            "name": "op-test-1",
            "done": true,
            "error": { "code": 3, "message": "audio too long" }
        }),
        0,
    );
    let (base_url, shutdown) = start_mock_backend(backend).await;
    let client = client(&base_url);

    let result = client
        .transcribe(&StorageKey::from_raw("user-1/rec.wav"), "en-US")
        .await;

    match result {
        Err(TranscriptionError::JobFailed(message)) => {
            assert!(message.contains("audio too long"));
        }
        other => panic!("expected JobFailed, got {:?}", other),
    }

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_backend_when_transcribing_then_api_request_failed() {
    let client = GoogleSpeechClient::new(
        "http://127.0.0.1:9",
        "test-key",
        "test-bucket",
        "latest_long",
        vec![],
        Duration::from_millis(10),
    );

    let result = client
        .transcribe(&StorageKey::from_raw("user-1/rec.wav"), "en-US")
        .await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
}
