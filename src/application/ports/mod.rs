//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod mailer;
pub mod transcriber;

// Re-export common types
pub use mailer::{DeliveryError, Mailer};
pub use transcriber::{Transcriber, TranscriptionError};
