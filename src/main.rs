use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use whisper_endpoint::application::ports::AcceleratorProbe;
use whisper_endpoint::application::services::{EngineLoader, RequestProcessor};
use whisper_endpoint::infrastructure::audio::{
    CandleAcceleratorProbe, RecognitionEngineFactory, StaticAcceleratorProbe,
    SymphoniaAudioDecoder,
};
use whisper_endpoint::infrastructure::observability::{TracingConfig, init_tracing};
use whisper_endpoint::infrastructure::storage::{LocalScratchStore, ObjectSourceFactory};
use whisper_endpoint::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            json_format: settings.logging.enable_json,
            default_filter: settings.logging.level.clone(),
        },
        settings.server.port,
    );

    let probe: Arc<dyn AcceleratorProbe> = if settings.engine.force_cpu {
        Arc::new(StaticAcceleratorProbe(false))
    } else {
        Arc::new(CandleAcceleratorProbe)
    };
    let factory = RecognitionEngineFactory::new(settings.engine.provider.into())
        .with_mel_filters_repo(settings.engine.mel_filters_repo.clone());
    let loader = EngineLoader::new(probe, Arc::new(factory));

    let model_dir = PathBuf::from(&settings.engine.model_dir);
    let engine = tokio::task::spawn_blocking(move || loader.initialize(Path::new(&model_dir)))
        .await
        .context("Engine loader task panicked")?
        .context("Failed to initialize recognition engine")?;

    let object_source =
        ObjectSourceFactory::create(&settings.storage).context("Failed to set up object source")?;
    let scratch_store = LocalScratchStore::new(PathBuf::from(&settings.scratch.root))
        .context("Failed to prepare scratch directory")?;
    let decoder = SymphoniaAudioDecoder::new(settings.audio.target_sample_rate);

    let processor = RequestProcessor::new(
        object_source,
        Arc::new(scratch_store),
        Arc::new(decoder),
        PathBuf::from(&settings.scratch.root),
    )
    .with_naming(settings.scratch.naming.into());

    let state = AppState {
        processor: Arc::new(processor),
        engine,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
