use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::domain::RecordingId;

use super::RecordingPipeline;

pub struct ProcessingMessage {
    pub recording_id: RecordingId,
}

/// Long-lived task draining the processing channel. One task is spawned per
/// message, so pipelines for distinct recordings run concurrently while each
/// recording's own stages stay strictly sequential inside its task.
pub struct PipelineWorker {
    receiver: mpsc::Receiver<ProcessingMessage>,
    pipeline: Arc<RecordingPipeline>,
}

impl PipelineWorker {
    pub fn new(receiver: mpsc::Receiver<ProcessingMessage>, pipeline: Arc<RecordingPipeline>) -> Self {
        Self { receiver, pipeline }
    }

    pub async fn run(mut self) {
        tracing::info!("Processing worker started");
        while let Some(msg) = self.receiver.recv().await {
            let pipeline = Arc::clone(&self.pipeline);
            let span = tracing::info_span!(
                "recording_pipeline",
                recording_id = %msg.recording_id.as_uuid(),
            );
            tokio::spawn(
                async move {
                    pipeline.process(msg.recording_id).await;
                }
                .instrument(span),
            );
        }
        tracing::info!("Processing worker stopped: channel closed");
    }
}
