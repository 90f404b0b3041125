use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranscriptionClient, TranscriptionError};
use crate::domain::StorageKey;

const SAMPLE_RATE_HERTZ: u32 = 16_000;

/// Google Cloud Speech-to-Text v1 client using the long-running recognition
/// surface: submit a job referencing a `gs://` URI, then poll the operation
/// until done. No partial results are consumed and no retry is performed
/// here; retry policy belongs to the pipeline.
pub struct GoogleSpeechClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
    model: String,
    phrase_hints: Vec<String>,
    poll_interval: Duration,
}

impl GoogleSpeechClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        bucket: &str,
        model: &str,
        phrase_hints: Vec<String>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bucket: bucket.to_string(),
            model: model.to_string(),
            phrase_hints,
            poll_interval,
        }
    }

    async fn start_job(
        &self,
        storage_key: &StorageKey,
        language: &str,
    ) -> Result<String, TranscriptionError> {
        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: SAMPLE_RATE_HERTZ,
                audio_channel_count: 1,
                language_code: language.to_string(),
                model: self.model.clone(),
                use_enhanced: true,
                enable_automatic_punctuation: true,
                enable_word_confidence: true,
                speech_contexts: vec![SpeechContext {
                    phrases: self.phrase_hints.clone(),
                }],
            },
            audio: RecognitionAudio {
                uri: format!("gs://{}/{}", self.bucket, storage_key),
            },
        };

        let url = format!(
            "{}/v1/speech:longrunningrecognize?key={}",
            self.base_url, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let operation: Operation = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("parse response: {}", e)))?;

        Ok(operation.name)
    }

    async fn await_job(&self, name: &str) -> Result<Vec<RecognitionResult>, TranscriptionError> {
        let url = format!("{}/v1/operations/{}?key={}", self.base_url, name, self.api_key);

        loop {
            tokio::time::sleep(self.poll_interval).await;

            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| TranscriptionError::ApiRequestFailed(format!("poll: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unknown error".to_string());
                return Err(TranscriptionError::ApiRequestFailed(format!(
                    "poll status {}: {}",
                    status, body
                )));
            }

            let operation: OperationStatus = response.json().await.map_err(|e| {
                TranscriptionError::ApiRequestFailed(format!("parse operation: {}", e))
            })?;

            if !operation.done {
                tracing::debug!(operation = %name, "Recognition job still running");
                continue;
            }

            if let Some(error) = operation.error {
                return Err(TranscriptionError::JobFailed(format!(
                    "code {}: {}",
                    error.code, error.message
                )));
            }

            return Ok(operation.response.map(|r| r.results).unwrap_or_default());
        }
    }
}

#[async_trait]
impl TranscriptionClient for GoogleSpeechClient {
    async fn transcribe(
        &self,
        storage_key: &StorageKey,
        language: &str,
    ) -> Result<String, TranscriptionError> {
        tracing::debug!(storage_key = %storage_key, language = %language, "Starting recognition job");
        let name = self.start_job(storage_key, language).await?;

        tracing::debug!(operation = %name, "Awaiting recognition job");
        let results = self.await_job(&name).await?;

        let transcript = collapse_results(&results)?;
        tracing::info!(
            segments = results.len(),
            chars = transcript.len(),
            "Recognition job completed"
        );
        Ok(transcript)
    }
}

/// Collapse ordered transcript segments: per segment take the
/// highest-confidence alternative (first wins ties and missing confidence),
/// join with single spaces, trim. Zero segments or an all-empty result is a
/// `TranscriptionError::EmptyTranscript`.
fn collapse_results(results: &[RecognitionResult]) -> Result<String, TranscriptionError> {
    if results.is_empty() {
        return Err(TranscriptionError::EmptyTranscript);
    }

    let transcript = results
        .iter()
        .map(|result| {
            best_alternative(&result.alternatives)
                .map(|alt| alt.transcript.as_str())
                .unwrap_or("")
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    if transcript.is_empty() {
        return Err(TranscriptionError::EmptyTranscript);
    }

    Ok(transcript)
}

fn best_alternative(alternatives: &[RecognitionAlternative]) -> Option<&RecognitionAlternative> {
    let mut best: Option<&RecognitionAlternative> = None;
    for alternative in alternatives {
        match best {
            None => best = Some(alternative),
            Some(current) => {
                if alternative.confidence.unwrap_or(0.0) > current.confidence.unwrap_or(0.0) {
                    best = Some(alternative);
                }
            }
        }
    }
    best
}

#[derive(Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: &'static str,
    sample_rate_hertz: u32,
    audio_channel_count: u32,
    language_code: String,
    model: String,
    use_enhanced: bool,
    enable_automatic_punctuation: bool,
    enable_word_confidence: bool,
    speech_contexts: Vec<SpeechContext>,
}

#[derive(Serialize)]
struct SpeechContext {
    phrases: Vec<String>,
}

#[derive(Serialize)]
struct RecognitionAudio {
    uri: String,
}

#[derive(Deserialize)]
struct Operation {
    name: String,
}

#[derive(Deserialize)]
struct OperationStatus {
    #[serde(default)]
    done: bool,
    error: Option<OperationError>,
    response: Option<RecognizeResponse>,
}

#[derive(Deserialize)]
struct OperationError {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
    confidence: Option<f32>,
}
