mod engine_handle;
mod engine_loader;
mod request_processor;

pub use engine_handle::EngineHandle;
pub use engine_loader::EngineLoader;
pub use request_processor::{ProcessError, RequestProcessor};
