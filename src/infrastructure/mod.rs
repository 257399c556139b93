//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the transcription API, SMTP, and the filesystem.

pub mod config;
pub mod mail;
pub mod transcription;

// Re-export adapters
pub use mail::SmtpMailer;
pub use transcription::WhisperTranscriber;
