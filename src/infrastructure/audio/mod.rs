mod accelerator_probe;
mod candle_whisper_engine;
mod recognition_engine_factory;
mod scaffold_engine;
mod symphonia_decoder;
pub mod whisper_languages;

pub use accelerator_probe::{CandleAcceleratorProbe, StaticAcceleratorProbe};
pub use candle_whisper_engine::{CandleWhisperEngine, DEFAULT_MEL_FILTERS_REPO};
pub use recognition_engine_factory::{EngineProvider, RecognitionEngineFactory};
pub use scaffold_engine::ScaffoldRecognitionEngine;
pub use symphonia_decoder::SymphoniaAudioDecoder;
