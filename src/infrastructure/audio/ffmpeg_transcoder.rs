use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioTranscoder, ConversionError};

/// Converts arbitrary input audio to single-channel, 16 kHz, 16-bit linear
/// PCM by shelling out to ffmpeg. ffmpeg only takes file-based input/output,
/// so both sides are staged through temp files in `staging_dir`; the
/// `NamedTempFile` guards remove them on every exit path, including spawn
/// failure, encoder failure and timeout.
pub struct FfmpegTranscoder {
    binary: PathBuf,
    staging_dir: PathBuf,
    timeout: Duration,
}

impl FfmpegTranscoder {
    pub fn new(
        binary: impl Into<PathBuf>,
        staging_dir: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<Self, ConversionError> {
        let staging_dir = staging_dir.into();
        std::fs::create_dir_all(&staging_dir)?;
        Ok(Self {
            binary: binary.into(),
            staging_dir,
            timeout,
        })
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn convert(&self, data: &[u8]) -> Result<Vec<u8>, ConversionError> {
        if data.is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        let input = tempfile::Builder::new()
            .prefix("transcode-in-")
            .tempfile_in(&self.staging_dir)?;
        let output = tempfile::Builder::new()
            .prefix("transcode-out-")
            .suffix(".wav")
            .tempfile_in(&self.staging_dir)?;

        tokio::fs::write(input.path(), data).await?;

        let child = Command::new(&self.binary)
            .arg("-y")
            .arg("-i")
            .arg(input.path())
            .arg("-ac")
            .arg("1")
            .arg("-ar")
            .arg("16000")
            .arg("-acodec")
            .arg("pcm_s16le")
            .arg("-f")
            .arg("wav")
            .arg(output.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ConversionError::EncoderFailed(format!(
                    "spawn {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        // kill_on_drop reaps the child if the timeout drops the wait future.
        let encoder = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(out)) => out,
            Ok(Err(e)) => return Err(ConversionError::Io(e)),
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "ffmpeg exceeded timeout, killed");
                return Err(ConversionError::Timeout(self.timeout));
            }
        };

        if !encoder.status.success() {
            let stderr = String::from_utf8_lossy(&encoder.stderr);
            let detail = stderr
                .lines()
                .last()
                .unwrap_or("no encoder output")
                .to_string();
            tracing::debug!(status = ?encoder.status, detail = %detail, "ffmpeg failed");
            return Err(ConversionError::EncoderFailed(detail));
        }

        let wav = tokio::fs::read(output.path()).await?;
        tracing::debug!(bytes = wav.len(), "Audio conversion completed");
        Ok(wav)
    }
}
