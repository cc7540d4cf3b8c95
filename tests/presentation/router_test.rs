use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use whisper_endpoint::application::ports::{DecodeError, FetchError, InvocationError};
use whisper_endpoint::application::services::{EngineHandle, ProcessError, RequestProcessor};
use whisper_endpoint::domain::{ArtifactNaming, EngineConfig, EngineSpec};
use whisper_endpoint::infrastructure::audio::{ScaffoldRecognitionEngine, SymphoniaAudioDecoder};
use whisper_endpoint::infrastructure::observability::REQUEST_ID_HEADER;
use whisper_endpoint::infrastructure::storage::{LocalObjectSource, LocalScratchStore};
use whisper_endpoint::presentation::handlers::status_for;
use whisper_endpoint::presentation::{AppState, create_router};

use crate::helpers::build_wav;

struct TestApp {
    router: Router,
    scratch: tempfile::TempDir,
    _objects: tempfile::TempDir,
}

fn test_app() -> TestApp {
    let objects = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    seed_object(objects.path(), "uploads", "calls/audio.wav");

    let processor = RequestProcessor::new(
        Arc::new(LocalObjectSource::new(objects.path().to_path_buf()).unwrap()),
        Arc::new(LocalScratchStore::new(scratch.path().to_path_buf()).unwrap()),
        Arc::new(SymphoniaAudioDecoder::new(Some(16_000))),
        scratch.path().to_path_buf(),
    )
    .with_naming(ArtifactNaming::Flat);

    let engine = EngineHandle::new(
        Arc::new(ScaffoldRecognitionEngine::new("hello world")),
        EngineSpec::new(EngineConfig::cpu()),
    );

    let router = create_router(AppState {
        processor: Arc::new(processor),
        engine,
    });

    TestApp {
        router,
        scratch,
        _objects: objects,
    }
}

fn seed_object(root: &Path, bucket: &str, key: &str) {
    let path = root.join(bucket).join(key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, build_wav(16_000, 1, &[0i16; 16_000])).unwrap();
}

fn invocation(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/invocations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn given_loaded_engine_when_pinging_then_healthy_with_device() {
    let app = test_app();

    let response = app
        .router
        .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model"], "openai/whisper-small");
    assert_eq!(json["device"], "cpu");
}

#[tokio::test]
async fn given_stored_audio_when_invoking_then_plain_text_transcript_and_no_artifact_left() {
    let app = test_app();
    let body = r#"{"processedFileBucket":"uploads","processedFileKey":"calls/audio.wav","language":"auto"}"#;

    let response = app.router.oneshot(invocation(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(body_string(response).await, "hello world");
    assert!(!app.scratch.path().join("audio.wav").exists());
}

#[tokio::test]
async fn given_json_accept_header_when_invoking_then_full_result_is_returned() {
    let app = test_app();
    let body = r#"{
        "processedFileBucket":"uploads",
        "processedFileKey":"calls/audio.wav",
        "language":"fr",
        "return_language":true
    }"#;
    let mut request = invocation(body);
    request
        .headers_mut()
        .insert(header::ACCEPT, "application/json".parse().unwrap());

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["text"], "hello world");
    assert_eq!(json["detected_language"], "fr");
    assert!(json.get("chunks").is_none());
}

#[tokio::test]
async fn given_missing_language_when_invoking_then_bad_request() {
    let app = test_app();
    let body = r#"{"processedFileBucket":"uploads","processedFileKey":"calls/audio.wav"}"#;

    let response = app.router.oneshot(invocation(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_unknown_object_when_invoking_then_not_found() {
    let app = test_app();
    let body = r#"{"processedFileBucket":"uploads","processedFileKey":"missing.wav","language":"en"}"#;

    let response = app.router.oneshot(invocation(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(json["error"].as_str().unwrap().contains("missing.wav"));
}

#[tokio::test]
async fn given_key_with_repeated_separator_when_invoking_then_bad_request() {
    let app = test_app();
    let body = r#"{"processedFileBucket":"uploads","processedFileKey":"calls//audio.wav","language":"en"}"#;

    let response = app.router.oneshot(invocation(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn given_process_errors_when_mapping_then_status_reflects_stage() {
    let cases = [
        (
            ProcessError::InvalidRequest("k/".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            ProcessError::Fetch(FetchError::AccessDenied("b/k".to_string())),
            StatusCode::FORBIDDEN,
        ),
        (
            ProcessError::Fetch(FetchError::Transport("reset".to_string())),
            StatusCode::BAD_GATEWAY,
        ),
        (
            ProcessError::Decode(DecodeError::DecodingFailed("bad".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            ProcessError::Invocation(InvocationError::InferenceFailed("oom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(status_for(&error), expected, "{}", error);
    }
}

#[tokio::test]
async fn given_client_request_id_when_pinging_then_it_is_echoed() {
    let app = test_app();
    let request = Request::get("/ping")
        .header(REQUEST_ID_HEADER, "trace-42")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "trace-42");
}

#[tokio::test]
async fn given_malformed_request_id_when_pinging_then_replaced_with_generated_one() {
    let app = test_app();
    let request = Request::get("/ping")
        .header(REQUEST_ID_HEADER, "has spaces/and slashes")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    let echoed = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert_ne!(echoed, "has spaces/and slashes");
    assert!(uuid::Uuid::parse_str(echoed).is_ok());
}
