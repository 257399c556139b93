//! Whisper API transcriber adapter

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::memo::AudioSubmission;

/// Transcription model to use
const DEFAULT_MODEL: &str = "whisper-1";

/// API base URL
const API_BASE_URL: &str = "https://api.openai.com/v1";

// Response types for the transcription API

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Whisper API transcriber
pub struct WhisperTranscriber {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl WhisperTranscriber {
    /// Create a new transcriber with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new transcriber with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::new(api_key)
        }
    }

    /// Override the API base URL (self-hosted endpoints, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the endpoint URL
    fn endpoint_url(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }

    /// Build the multipart form carrying the audio and the model id.
    /// The filename on the file part is the format hint the API reads.
    fn build_form(&self, audio: &AudioSubmission) -> reqwest::multipart::Form {
        let file = reqwest::multipart::Part::bytes(audio.bytes().to_vec())
            .file_name(audio.filename().to_string());

        reqwest::multipart::Form::new()
            .part("file", file)
            .text("model", self.model.clone())
    }

    /// Pull the API's error message out of a non-2xx body, falling back to
    /// the raw body text
    fn extract_error_message(body: &str) -> String {
        serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string())
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: &AudioSubmission) -> Result<String, TranscriptionError> {
        let url = self.endpoint_url();
        let form = self.build_form(audio);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TranscriptionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscriptionError::ApiError(format!(
                "HTTP {}: {}",
                status,
                Self::extract_error_message(&error_text)
            )));
        }

        // Parse response
        let response: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        // Speechless audio transcribes to an empty string, which is success.
        // The text is returned verbatim, no trimming.
        Ok(response.text)
    }
}
