//! Transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::memo::AudioSubmission;

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for audio transcription
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an uploaded voice memo to text.
    ///
    /// The filename travels with the audio as a format hint for the
    /// external service. Audio with no speech transcribes to an empty
    /// string, which is success, not an error.
    async fn transcribe(&self, audio: &AudioSubmission) -> Result<String, TranscriptionError>;
}

/// Blanket implementation for boxed transcriber types
#[async_trait]
impl Transcriber for Box<dyn Transcriber> {
    async fn transcribe(&self, audio: &AudioSubmission) -> Result<String, TranscriptionError> {
        self.as_ref().transcribe(audio).await
    }
}
