use config::{Config, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub speech: SpeechSettings,
    pub summarizer: SummarizerSettings,
    pub transcoder: TranscoderSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layered configuration: `config/base.toml`, then the per-environment
    /// file, then `APP__`-prefixed environment variables.
    pub fn load(environment: Environment) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/base"))
            .add_source(
                File::with_name(&format!("config/{}", environment.as_str())).required(false),
            )
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub provider: StorageProvider,
    pub bucket: String,
    pub local_path: String,
    pub service_account_path: Option<String>,
    pub signed_url_ttl_secs: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    Local,
    Gcs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub base_url: String,
    pub api_key: String,
    pub language: String,
    pub model: String,
    pub phrase_hints: Vec<String>,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscoderSettings {
    pub ffmpeg_path: String,
    pub staging_dir: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}
