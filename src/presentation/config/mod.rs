mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ArtifactNamingSetting, AudioSettings, EngineProviderSetting, EngineSettings, LoggingSettings,
    ScratchSettings, ServerSettings, Settings, StorageProviderSetting, StorageSettings,
};
