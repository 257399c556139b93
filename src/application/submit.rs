//! Submit memo use case

use thiserror::Error;

use crate::domain::mail::EmailRequest;
use crate::domain::memo::AudioSubmission;

use super::ports::{DeliveryError, Mailer, Transcriber, TranscriptionError};

/// Errors from the submit use case.
///
/// Delivery failures are not here: a failed send must not discard the
/// transcription, so it travels in [`SubmitOutput::delivery`] instead.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("No audio data in upload")]
    EmptyAudio,

    #[error("Recipient address is required")]
    EmptyRecipient,

    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),
}

/// Input parameters for the submit use case
#[derive(Debug, Clone)]
pub struct SubmitInput {
    /// The uploaded voice memo
    pub audio: AudioSubmission,
    /// Destination address, passed through unvalidated
    pub recipient: String,
}

/// Outcome of the delivery stage
#[derive(Debug, Clone)]
pub enum DeliveryStatus {
    /// The message was handed to the mail server
    Sent,
    /// Delivery failed; the transcription is still valid
    Failed(DeliveryError),
}

impl DeliveryStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Output from the submit use case
#[derive(Debug, Clone)]
pub struct SubmitOutput {
    /// The transcribed text (may be empty for speechless audio)
    pub transcription: String,
    /// What happened in the delivery stage
    pub delivery: DeliveryStatus,
}

/// One-shot submission pipeline: transcribe, then mail the result with the
/// original audio attached. Exactly one transcription call per submission,
/// and exactly one delivery call if and only if transcription succeeds.
pub struct SubmitMemoUseCase<T, M>
where
    T: Transcriber,
    M: Mailer,
{
    transcriber: T,
    mailer: M,
}

impl<T, M> SubmitMemoUseCase<T, M>
where
    T: Transcriber,
    M: Mailer,
{
    /// Create a new use case instance
    pub fn new(transcriber: T, mailer: M) -> Self {
        Self { transcriber, mailer }
    }

    /// Execute the submission pipeline
    pub async fn execute(&self, input: SubmitInput) -> Result<SubmitOutput, SubmitError> {
        if input.audio.is_empty() {
            return Err(SubmitError::EmptyAudio);
        }
        if input.recipient.trim().is_empty() {
            return Err(SubmitError::EmptyRecipient);
        }

        let transcription = self.transcriber.transcribe(&input.audio).await?;

        let request = EmailRequest::new(
            input.recipient,
            transcription.clone(),
            input.audio.bytes().to_vec(),
            input.audio.filename(),
        );

        let delivery = match self.mailer.send(&request).await {
            Ok(()) => DeliveryStatus::Sent,
            Err(e) => DeliveryStatus::Failed(e),
        };

        Ok(SubmitOutput {
            transcription,
            delivery,
        })
    }
}
