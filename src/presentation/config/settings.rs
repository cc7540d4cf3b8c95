use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::ArtifactNaming;
use crate::infrastructure::audio::{DEFAULT_MEL_FILTERS_REPO, EngineProvider};

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub engine: EngineSettings,
    pub storage: StorageSettings,
    pub scratch: ScratchSettings,
    pub audio: AudioSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    pub provider: EngineProviderSetting,
    pub mel_filters_repo: String,
    /// Forwarded to the loader as the host's model directory hint.
    pub model_dir: String,
    pub force_cpu: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineProviderSetting {
    Candle,
    Scaffold,
}

impl From<EngineProviderSetting> for EngineProvider {
    fn from(setting: EngineProviderSetting) -> Self {
        match setting {
            EngineProviderSetting::Candle => EngineProvider::Candle,
            EngineProviderSetting::Scaffold => EngineProvider::Scaffold,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub local_root: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    S3,
    Local,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScratchSettings {
    pub root: String,
    pub naming: ArtifactNamingSetting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactNamingSetting {
    PerRequest,
    Flat,
}

impl From<ArtifactNamingSetting> for ArtifactNaming {
    fn from(setting: ArtifactNamingSetting) -> Self {
        match setting {
            ArtifactNamingSetting::PerRequest => ArtifactNaming::PerRequest,
            ArtifactNamingSetting::Flat => ArtifactNaming::Flat,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    /// Decoder output rate. Unset keeps the file's native rate.
    pub target_sample_rate: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.<Environment>.toml` if present, then
    /// `APP_<SECTION>__<KEY>` environment variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("engine.provider", "candle")?
            .set_default("engine.mel_filters_repo", DEFAULT_MEL_FILTERS_REPO)?
            .set_default("engine.model_dir", "/opt/ml/model")?
            .set_default("engine.force_cpu", false)?
            .set_default("storage.provider", "s3")?
            .set_default("scratch.root", "/tmp")?
            .set_default("scratch.naming", "per_request")?
            .set_default("audio.target_sample_rate", 16_000)?
            .set_default("logging.level", "info,whisper_endpoint=debug,tower_http=debug")?
            .set_default("logging.enable_json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
