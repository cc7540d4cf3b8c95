use std::sync::Arc;

use crate::application::ports::{EngineBuilder, InitializationError, RecognitionEngine};
use crate::domain::EngineSpec;

use super::candle_whisper_engine::{CandleWhisperEngine, DEFAULT_MEL_FILTERS_REPO};
use super::scaffold_engine::ScaffoldRecognitionEngine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineProvider {
    Candle,
    Scaffold,
}

pub struct RecognitionEngineFactory {
    provider: EngineProvider,
    mel_filters_repo: String,
}

impl RecognitionEngineFactory {
    pub fn new(provider: EngineProvider) -> Self {
        Self {
            provider,
            mel_filters_repo: DEFAULT_MEL_FILTERS_REPO.to_string(),
        }
    }

    pub fn with_mel_filters_repo(mut self, repo: impl Into<String>) -> Self {
        self.mel_filters_repo = repo.into();
        self
    }
}

impl EngineBuilder for RecognitionEngineFactory {
    fn build(
        &self,
        spec: &EngineSpec,
    ) -> Result<Arc<dyn RecognitionEngine>, InitializationError> {
        match self.provider {
            EngineProvider::Candle => {
                let engine = CandleWhisperEngine::new(spec, &self.mel_filters_repo)?;
                Ok(Arc::new(engine))
            }
            EngineProvider::Scaffold => Ok(Arc::new(ScaffoldRecognitionEngine::default())),
        }
    }
}
