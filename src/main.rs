use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use voxnote::application::ports::{AudioTranscoder, BlobStore, NoteRepository, RecordingRepository};
use voxnote::application::services::{
    NoteService, PipelineWorker, RecordingPipeline, RecordingService,
};
use voxnote::infrastructure::audio::FfmpegTranscoder;
use voxnote::infrastructure::llm::OpenAiSummarizer;
use voxnote::infrastructure::observability::init_tracing;
use voxnote::infrastructure::persistence::{
    create_pool, init_schema, SqliteNoteRepository, SqliteRecordingRepository,
};
use voxnote::infrastructure::speech::GoogleSpeechClient;
use voxnote::infrastructure::storage::{GcsBlobStore, LocalBlobStore};
use voxnote::presentation::config::{Environment, Settings, StorageProvider};
use voxnote::presentation::{create_router, AppState};

const PROCESSING_QUEUE_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let settings = Settings::load(environment)?;

    init_tracing(&settings.logging);
    tracing::info!(environment = %environment, "Starting voxnote");

    let pool = create_pool(&settings.database.url, settings.database.max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("database: {}", e))?;
    init_schema(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("schema: {}", e))?;

    let recording_repository: Arc<dyn RecordingRepository> =
        Arc::new(SqliteRecordingRepository::new(pool.clone()));
    let note_repository: Arc<dyn NoteRepository> = Arc::new(SqliteNoteRepository::new(pool));

    let blob_store: Arc<dyn BlobStore> = match settings.storage.provider {
        StorageProvider::Local => Arc::new(
            LocalBlobStore::new(settings.storage.local_path.clone().into())
                .map_err(|e| anyhow::anyhow!("storage: {}", e))?,
        ),
        StorageProvider::Gcs => Arc::new(
            GcsBlobStore::new(
                &settings.storage.bucket,
                settings.storage.service_account_path.as_deref(),
            )
            .map_err(|e| anyhow::anyhow!("storage: {}", e))?,
        ),
    };

    let transcoder: Arc<dyn AudioTranscoder> = Arc::new(
        FfmpegTranscoder::new(
            &settings.transcoder.ffmpeg_path,
            &settings.transcoder.staging_dir,
            Duration::from_secs(settings.transcoder.timeout_secs),
        )
        .map_err(|e| anyhow::anyhow!("transcoder: {}", e))?,
    );

    let transcription_client = Arc::new(GoogleSpeechClient::new(
        &settings.speech.base_url,
        &settings.speech.api_key,
        &settings.storage.bucket,
        &settings.speech.model,
        settings.speech.phrase_hints.clone(),
        Duration::from_millis(settings.speech.poll_interval_ms),
    ));

    let summarizer = Arc::new(OpenAiSummarizer::new(
        &settings.summarizer.base_url,
        &settings.summarizer.api_key,
        &settings.summarizer.model,
        settings.summarizer.temperature,
        settings.summarizer.max_tokens,
    ));

    let pipeline = Arc::new(RecordingPipeline::new(
        Arc::clone(&recording_repository),
        Arc::clone(&note_repository),
        transcription_client,
        summarizer,
        settings.speech.language.clone(),
    ));

    let (processing_sender, processing_receiver) = mpsc::channel(PROCESSING_QUEUE_CAPACITY);
    let worker = PipelineWorker::new(processing_receiver, pipeline);
    tokio::spawn(worker.run());

    let recording_service = Arc::new(RecordingService::new(
        transcoder,
        blob_store,
        Arc::clone(&recording_repository),
        Arc::clone(&note_repository),
        processing_sender,
        Duration::from_secs(settings.storage.signed_url_ttl_secs),
    ));
    let note_service = Arc::new(NoteService::new(note_repository));

    let state = AppState {
        recording_service,
        note_service,
    };
    let router = create_router(state);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
