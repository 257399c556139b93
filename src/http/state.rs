use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::application::ports::{Mailer, Transcriber};
use crate::application::SubmitMemoUseCase;

/// The use case as wired into the server, with boxed ports
pub type BoxedSubmitUseCase = SubmitMemoUseCase<Box<dyn Transcriber>, Box<dyn Mailer>>;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The submission pipeline
    pub use_case: Arc<BoxedSubmitUseCase>,

    /// Serializes submissions: one memo is processed to completion before
    /// the next one starts
    pub submit_lock: Arc<Mutex<()>>,

    /// Single-slot display state, overwritten by each successful
    /// transcription and otherwise left alone
    pub last_transcription: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(transcriber: Box<dyn Transcriber>, mailer: Box<dyn Mailer>) -> Self {
        Self {
            use_case: Arc::new(SubmitMemoUseCase::new(transcriber, mailer)),
            submit_lock: Arc::new(Mutex::new(())),
            last_transcription: Arc::new(RwLock::new(None)),
        }
    }
}
