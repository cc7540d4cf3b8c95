use std::sync::Arc;

use crate::application::services::{EngineHandle, RequestProcessor};

#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<RequestProcessor>,
    pub engine: EngineHandle,
}
