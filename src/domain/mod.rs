//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod mail;
pub mod memo;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use mail::EmailRequest;
pub use memo::{AudioFormat, AudioSubmission};
