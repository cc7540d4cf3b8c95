use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct PingResponse {
    pub status: String,
    pub model: String,
    pub device: String,
}

/// Liveness probe. The engine is loaded before the listener binds, so a
/// response here means the container can take invocations.
pub async fn ping_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(PingResponse {
            status: "healthy".to_string(),
            model: state.engine.model_id().to_string(),
            device: state.engine.config().device().to_string(),
        }),
    )
}
