//! End-to-end tests of the HTTP surface with mock ports

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use memopost::application::ports::{
    DeliveryError, Mailer, Transcriber, TranscriptionError,
};
use memopost::domain::mail::EmailRequest;
use memopost::domain::memo::AudioSubmission;
use memopost::http::{create_router, AppState};

// ============================================================================
// Mock ports
// ============================================================================

/// Transcriber that plays back a scripted sequence of results
struct ScriptedTranscriber {
    script: Mutex<VecDeque<Result<String, TranscriptionError>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedTranscriber {
    fn new(script: Vec<Result<String, TranscriptionError>>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                script: Mutex::new(script.into()),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&self, _audio: &AudioSubmission) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("transcriber called more often than scripted")
    }
}

#[derive(Clone)]
struct RecordedSend {
    recipient: String,
    transcription: String,
    filename: String,
}

/// Mailer that records every request it is handed
struct RecordingMailer {
    sent: Arc<Mutex<Vec<RecordedSend>>>,
    result: Result<(), DeliveryError>,
}

impl RecordingMailer {
    fn succeeding() -> (Self, Arc<Mutex<Vec<RecordedSend>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                sent: Arc::clone(&sent),
                result: Ok(()),
            },
            sent,
        )
    }

    fn failing(error: DeliveryError) -> (Self, Arc<Mutex<Vec<RecordedSend>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                sent: Arc::clone(&sent),
                result: Err(error),
            },
            sent,
        )
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, request: &EmailRequest) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(RecordedSend {
            recipient: request.recipient().to_string(),
            transcription: request.transcription().to_string(),
            filename: request.audio_filename().to_string(),
        });
        self.result.clone()
    }
}

// ============================================================================
// Request helpers
// ============================================================================

const BOUNDARY: &str = "memopost-test-boundary";

fn multipart_body(file: Option<(&str, &[u8])>, recipient: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(recipient) = recipient {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"recipient\"\r\n\r\n{recipient}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"audio\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn submit_request(file: Option<(&str, &[u8])>, recipient: Option<&str>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/memos")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(file, recipient)))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn last_transcription(state: &AppState) -> Value {
    let response = create_router(state.clone())
        .oneshot(
            Request::builder()
                .uri("/transcription")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn submitting_a_memo_transcribes_displays_and_delivers() {
    let (transcriber, transcribe_calls) =
        ScriptedTranscriber::new(vec![Ok("hello world".to_string())]);
    let (mailer, sent) = RecordingMailer::succeeding();
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    let response = create_router(state.clone())
        .oneshot(submit_request(
            Some(("memo.wav", b"RIFF....")),
            Some("user@example.com"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["transcription"], "hello world");
    assert_eq!(body["delivery"]["status"], "sent");

    assert_eq!(transcribe_calls.load(Ordering::SeqCst), 1);
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "user@example.com");
    assert_eq!(sent[0].transcription, "hello world");
    assert_eq!(sent[0].filename, "memo.wav");
    drop(sent);

    let view = last_transcription(&state).await;
    assert_eq!(view["transcription"], "hello world");
}

#[tokio::test]
async fn missing_recipient_is_rejected_without_any_calls() {
    let (transcriber, transcribe_calls) = ScriptedTranscriber::new(vec![]);
    let (mailer, sent) = RecordingMailer::succeeding();
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    let response = create_router(state)
        .oneshot(submit_request(Some(("memo.wav", b"RIFF....")), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(transcribe_calls.load(Ordering::SeqCst), 0);
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_audio_is_rejected_without_any_calls() {
    let (transcriber, transcribe_calls) = ScriptedTranscriber::new(vec![]);
    let (mailer, _) = RecordingMailer::succeeding();
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    let response = create_router(state)
        .oneshot(submit_request(None, Some("user@example.com")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(transcribe_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let (transcriber, transcribe_calls) = ScriptedTranscriber::new(vec![]);
    let (mailer, _) = RecordingMailer::succeeding();
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    let response = create_router(state)
        .oneshot(submit_request(
            Some(("notes.pdf", b"%PDF")),
            Some("user@example.com"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("notes.pdf"));
    assert_eq!(transcribe_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transcription_failure_reports_error_and_skips_delivery() {
    let (transcriber, _) = ScriptedTranscriber::new(vec![Err(TranscriptionError::ApiError(
        "You exceeded your current quota".to_string(),
    ))]);
    let (mailer, sent) = RecordingMailer::succeeding();
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    let response = create_router(state.clone())
        .oneshot(submit_request(
            Some(("memo.wav", b"RIFF....")),
            Some("user@example.com"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("You exceeded your current quota"));

    assert!(sent.lock().unwrap().is_empty());

    // The display slot was never written
    let view = last_transcription(&state).await;
    assert!(view["transcription"].is_null());
}

#[tokio::test]
async fn delivery_failure_still_displays_the_transcription() {
    let (transcriber, _) = ScriptedTranscriber::new(vec![Ok("hello world".to_string())]);
    let (mailer, sent) =
        RecordingMailer::failing(DeliveryError::Smtp("connection refused".to_string()));
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    let response = create_router(state.clone())
        .oneshot(submit_request(
            Some(("memo.wav", b"RIFF....")),
            Some("user@example.com"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["transcription"], "hello world");
    assert_eq!(body["delivery"]["status"], "failed");
    assert!(body["delivery"]["detail"]
        .as_str()
        .unwrap()
        .contains("connection refused"));

    assert_eq!(sent.lock().unwrap().len(), 1);

    // Delivery failure does not disturb the displayed transcription
    let view = last_transcription(&state).await;
    assert_eq!(view["transcription"], "hello world");
}

#[tokio::test]
async fn later_transcription_failure_leaves_previous_display_intact() {
    let (transcriber, _) = ScriptedTranscriber::new(vec![
        Ok("first memo".to_string()),
        Err(TranscriptionError::RateLimited),
    ]);
    let (mailer, _) = RecordingMailer::succeeding();
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    let ok = create_router(state.clone())
        .oneshot(submit_request(
            Some(("memo.wav", b"RIFF....")),
            Some("user@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    let failed = create_router(state.clone())
        .oneshot(submit_request(
            Some(("memo.wav", b"RIFF....")),
            Some("user@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(failed.status(), StatusCode::BAD_GATEWAY);

    let view = last_transcription(&state).await;
    assert_eq!(view["transcription"], "first memo");
}

#[tokio::test]
async fn resubmission_overwrites_the_display_slot() {
    let (transcriber, transcribe_calls) = ScriptedTranscriber::new(vec![
        Ok("first memo".to_string()),
        Ok("second memo".to_string()),
    ]);
    let (mailer, sent) = RecordingMailer::succeeding();
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    for _ in 0..2 {
        let response = create_router(state.clone())
            .oneshot(submit_request(
                Some(("memo.wav", b"RIFF....")),
                Some("user@example.com"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(transcribe_calls.load(Ordering::SeqCst), 2);
    assert_eq!(sent.lock().unwrap().len(), 2);

    let view = last_transcription(&state).await;
    assert_eq!(view["transcription"], "second memo");
}

#[tokio::test]
async fn transcription_slot_starts_empty() {
    let (transcriber, _) = ScriptedTranscriber::new(vec![]);
    let (mailer, _) = RecordingMailer::succeeding();
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    let view = last_transcription(&state).await;
    assert!(view["transcription"].is_null());
}

#[tokio::test]
async fn health_check_responds_ok() {
    let (transcriber, _) = ScriptedTranscriber::new(vec![]);
    let (mailer, _) = RecordingMailer::succeeding();
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    let response = create_router(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn index_serves_the_upload_page() {
    let (transcriber, _) = ScriptedTranscriber::new(vec![]);
    let (mailer, _) = RecordingMailer::succeeding();
    let state = AppState::new(Box::new(transcriber), Box::new(mailer));

    let response = create_router(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("Voice Memo Transcriber"));
    assert!(page.contains("memo-form"));
}
