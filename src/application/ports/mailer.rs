//! Mail delivery port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::mail::EmailRequest;

/// Delivery errors
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Failed to build message: {0}")]
    MessageBuild(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// Port for outbound email delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message synchronously.
    ///
    /// The connection is opened, authenticated, used, and released within
    /// this call. A failed send is not retried or queued.
    async fn send(&self, request: &EmailRequest) -> Result<(), DeliveryError>;
}

/// Blanket implementation for boxed mailer types
#[async_trait]
impl Mailer for Box<dyn Mailer> {
    async fn send(&self, request: &EmailRequest) -> Result<(), DeliveryError> {
        self.as_ref().send(request).await
    }
}
