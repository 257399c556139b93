use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::application::{DeliveryStatus, SubmitError, SubmitInput};
use crate::domain::memo::AudioSubmission;

use super::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub transcription: String,
    pub delivery: DeliveryReport,
}

#[derive(Debug, Serialize)]
pub struct DeliveryReport {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptionView {
    pub transcription: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Multipart fields of one submission, before validation
#[derive(Default)]
struct MemoForm {
    audio_bytes: Option<Vec<u8>>,
    audio_filename: Option<String>,
    recipient: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Serve the embedded upload page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

/// POST /memos
/// Accept one memo and run the full pipeline: transcribe, display, deliver
pub async fn submit_memo(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(message) => {
            warn!("Rejected malformed upload: {}", message);
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
                .into_response();
        }
    };

    let (Some(bytes), Some(filename)) = (form.audio_bytes, form.audio_filename) else {
        return unprocessable("An audio file is required");
    };
    let Some(recipient) = form.recipient.filter(|r| !r.trim().is_empty()) else {
        return unprocessable("A recipient address is required");
    };

    let audio = match AudioSubmission::new(bytes, filename) {
        Ok(audio) => audio,
        Err(e) => return unprocessable(&e.to_string()),
    };

    info!(
        "Submission received: {} ({}), recipient {}",
        audio.filename(),
        audio.human_readable_size(),
        recipient
    );

    // One submission at a time; later uploads wait here
    let _guard = state.submit_lock.lock().await;

    let input = SubmitInput { audio, recipient };
    match state.use_case.execute(input).await {
        Ok(output) => {
            // Successful transcription overwrites the display slot even when
            // delivery fails afterwards
            {
                let mut slot = state.last_transcription.write().await;
                *slot = Some(output.transcription.clone());
            }

            let delivery = match output.delivery {
                DeliveryStatus::Sent => {
                    info!("Transcription delivered");
                    DeliveryReport {
                        status: "sent".to_string(),
                        detail: None,
                    }
                }
                DeliveryStatus::Failed(e) => {
                    error!("Delivery failed: {}", e);
                    DeliveryReport {
                        status: "failed".to_string(),
                        detail: Some(e.to_string()),
                    }
                }
            };

            (
                StatusCode::OK,
                Json(SubmitResponse {
                    transcription: output.transcription,
                    delivery,
                }),
            )
                .into_response()
        }
        Err(e @ (SubmitError::EmptyAudio | SubmitError::EmptyRecipient)) => {
            unprocessable(&e.to_string())
        }
        Err(e @ SubmitError::Transcription(_)) => {
            error!("{}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /transcription
/// Return the last successful transcription, if any
pub async fn get_transcription(State(state): State<AppState>) -> impl IntoResponse {
    let slot = state.last_transcription.read().await;
    (
        StatusCode::OK,
        Json(TranscriptionView {
            transcription: slot.clone(),
        }),
    )
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// ============================================================================
// Helpers
// ============================================================================

async fn read_form(mut multipart: Multipart) -> Result<MemoForm, String> {
    let mut form = MemoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("invalid multipart body: {}", e))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("audio") => {
                form.audio_filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| format!("failed to read audio field: {}", e))?;
                form.audio_bytes = Some(bytes.to_vec());
            }
            Some("recipient") => {
                form.recipient = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| format!("failed to read recipient field: {}", e))?,
                );
            }
            _ => {}
        }
    }

    Ok(form)
}

fn unprocessable(message: &str) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
