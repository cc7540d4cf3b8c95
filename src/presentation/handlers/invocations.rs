use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::FetchError;
use crate::application::services::ProcessError;
use crate::domain::TranscriptionRequest;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn invocations_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request: TranscriptionRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed invocation payload");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid request body: {}", e),
                }),
            )
                .into_response();
        }
    };

    match state.processor.process(request, &state.engine).await {
        Ok(outcome) if wants_json(&headers) => {
            (StatusCode::OK, Json(outcome.into_result())).into_response()
        }
        Ok(outcome) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            outcome.into_result().text,
        )
            .into_response(),
        Err(e) => (
            status_for(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("application/json"))
        .unwrap_or(false)
}

pub fn status_for(error: &ProcessError) -> StatusCode {
    match error {
        ProcessError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ProcessError::Fetch(FetchError::NotFound(_)) => StatusCode::NOT_FOUND,
        ProcessError::Fetch(FetchError::AccessDenied(_)) => StatusCode::FORBIDDEN,
        ProcessError::Fetch(FetchError::InvalidLocation(_)) => StatusCode::BAD_REQUEST,
        ProcessError::Fetch(FetchError::Transport(_)) | ProcessError::Scratch(_) => {
            StatusCode::BAD_GATEWAY
        }
        ProcessError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ProcessError::Invocation(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
