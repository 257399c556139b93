//! Memopost - voice memo transcription and mail delivery service
//!
//! This crate accepts an uploaded voice memo over HTTP, transcribes it
//! through an external speech-to-text API, and emails the transcription
//! (with the original audio attached) to a user-supplied address.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, configuration, and domain errors
//! - **Application**: The submission use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Whisper API, SMTP, config files)
//! - **HTTP**: The axum web surface and the embedded upload page

pub mod application;
pub mod domain;
pub mod http;
pub mod infrastructure;
