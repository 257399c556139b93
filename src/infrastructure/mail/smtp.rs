//! SMTP mailer adapter

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::application::ports::{DeliveryError, Mailer};
use crate::domain::mail::EmailRequest;

/// Fixed subject line
const SUBJECT: &str = "Voice Memo Transcription";

/// Fixed attachment content type, regardless of the actual audio codec
const ATTACHMENT_CONTENT_TYPE: &str = "audio/mpeg";

/// Delimiter line framing the transcription in the body
const DELIMITER: &str =
    "------------------------------------------------------------";

/// SMTP mailer delivering over implicit TLS.
///
/// Each send opens a fresh authenticated connection to the configured
/// host/port and releases it when the call returns, on every path.
pub struct SmtpMailer {
    host: String,
    port: u16,
    sender: String,
    password: String,
}

impl SmtpMailer {
    /// Create a mailer for the given server and sender account
    pub fn new(
        host: impl Into<String>,
        port: u16,
        sender: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            sender: sender.into(),
            password: password.into(),
        }
    }

    /// Render the plain-text body with the transcription embedded verbatim
    /// between the delimiter lines
    fn build_body(transcription: &str) -> String {
        format!(
            "Hi there,\n\
             \n\
             Here is the transcription of your uploaded audio file.\n\
             \n\
             Transcription:\n\
             {DELIMITER}\n\
             {transcription}\n\
             {DELIMITER}\n\
             \n\
             Sent automatically by the Voice Memo Transcriber app.\n"
        )
    }

    /// Build the full message: headers, body, and one audio attachment
    fn build_message(&self, request: &EmailRequest) -> Result<Message, DeliveryError> {
        let from: Mailbox = self
            .sender
            .parse()
            .map_err(|e| DeliveryError::MessageBuild(format!("sender address: {}", e)))?;

        let to: Mailbox = request
            .recipient()
            .parse()
            .map_err(|e| DeliveryError::InvalidRecipient(format!("{}", e)))?;

        let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)
            .map_err(|e| DeliveryError::MessageBuild(e.to_string()))?;

        let attachment = Attachment::new(request.audio_filename().to_string())
            .body(request.audio_bytes().to_vec(), content_type);

        Message::builder()
            .from(from)
            .to(to)
            .subject(SUBJECT)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(Self::build_body(request.transcription())))
                    .singlepart(attachment),
            )
            .map_err(|e| DeliveryError::MessageBuild(e.to_string()))
    }

    /// Build a one-shot transport for this send
    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, DeliveryError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)
            .map_err(|e| DeliveryError::Smtp(e.to_string()))?
            .port(self.port)
            .credentials(Credentials::new(self.sender.clone(), self.password.clone()))
            .build();

        Ok(transport)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, request: &EmailRequest) -> Result<(), DeliveryError> {
        let message = self.build_message(request)?;
        let transport = self.build_transport()?;

        // The transport is dropped when this call returns, closing the
        // connection whether the send succeeded or not.
        transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Smtp(e.to_string()))?;

        Ok(())
    }
}
