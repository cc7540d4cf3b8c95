use whisper_endpoint::application::ports::RecognitionEngine;
use whisper_endpoint::domain::{InferenceOptions, Task, TranscriptionRequest};
use whisper_endpoint::infrastructure::audio::ScaffoldRecognitionEngine;

#[test]
fn given_unconstrained_language_when_inferring_then_reports_english_and_one_chunk() {
    let engine = ScaffoldRecognitionEngine::new("hello");

    let output = engine
        .infer(&[0.0; 32_000], &InferenceOptions::default())
        .unwrap();

    assert_eq!(output.text, "hello");
    assert_eq!(output.language.as_deref(), Some("en"));
    assert_eq!(output.chunks.len(), 1);
    assert_eq!(output.chunks[0].start_secs, 0.0);
    assert!((output.chunks[0].end_secs - 2.0).abs() < 1e-6);
}

#[test]
fn given_requested_language_when_inferring_then_it_is_echoed() {
    let engine = ScaffoldRecognitionEngine::default();
    let request = TranscriptionRequest::new("b", "k", "de").with_task(Task::Translate);

    let output = engine
        .infer(&[0.0; 160], &InferenceOptions::from_request(&request))
        .unwrap();

    assert_eq!(output.text, "scaffold transcript");
    assert_eq!(output.language.as_deref(), Some("de"));
}
