//! HTTP surface for the upload UI and the submission pipeline
//!
//! Routes:
//! - GET  /              - embedded upload page
//! - POST /memos         - submit one memo (multipart: audio + recipient)
//! - GET  /transcription - last successful transcription
//! - GET  /health        - health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
