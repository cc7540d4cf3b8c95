mod audio_decoder;
mod engine_builder;
mod object_source;
mod recognition_engine;
mod scratch_store;

pub use audio_decoder::{AudioDecoder, DecodeError, DecodedAudio};
pub use engine_builder::{AcceleratorProbe, EngineBuilder, InitializationError};
pub use object_source::{FetchError, ObjectSource};
pub use recognition_engine::{InvocationError, RecognitionEngine};
pub use scratch_store::{ScratchError, ScratchStore};
