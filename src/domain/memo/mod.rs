//! Voice memo domain module

mod submission;

pub use submission::{AudioFormat, AudioSubmission};
