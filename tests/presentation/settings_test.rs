use whisper_endpoint::presentation::Environment;
use whisper_endpoint::presentation::config::{
    ArtifactNamingSetting, EngineProviderSetting, Settings, StorageProviderSetting,
};

#[test]
fn given_no_overrides_when_loading_then_defaults_match_hosting_contract() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.engine.provider, EngineProviderSetting::Candle);
    assert!(!settings.engine.force_cpu);
    assert_eq!(settings.storage.provider, StorageProviderSetting::S3);
    assert_eq!(settings.scratch.root, "/tmp");
    assert_eq!(settings.scratch.naming, ArtifactNamingSetting::PerRequest);
    assert_eq!(settings.audio.target_sample_rate, Some(16_000));
}

#[test]
fn given_environment_names_when_parsing_then_accepts_known_values_only() {
    assert_eq!(
        Environment::try_from("PROD".to_string()).unwrap(),
        Environment::Prod
    );
    assert_eq!(
        Environment::try_from("local".to_string()).unwrap(),
        Environment::Local
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}
