use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Upload cap, matching the transcription API's own file-size limit
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Upload page
        .route("/", get(handlers::index))
        // Submission pipeline
        .route("/memos", post(handlers::submit_memo))
        // Display slot
        .route("/transcription", get(handlers::get_transcription))
        // Health check
        .route("/health", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
