//! Email request value object

/// One delivery request: recipient, transcription text, and the original
/// audio to attach. Built once per submission and consumed by the mailer.
#[derive(Debug, Clone)]
pub struct EmailRequest {
    recipient: String,
    transcription: String,
    audio_bytes: Vec<u8>,
    audio_filename: String,
}

impl EmailRequest {
    pub fn new(
        recipient: impl Into<String>,
        transcription: impl Into<String>,
        audio_bytes: Vec<u8>,
        audio_filename: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            transcription: transcription.into(),
            audio_bytes,
            audio_filename: audio_filename.into(),
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn transcription(&self) -> &str {
        &self.transcription
    }

    pub fn audio_bytes(&self) -> &[u8] {
        &self.audio_bytes
    }

    pub fn audio_filename(&self) -> &str {
        &self.audio_filename
    }
}
