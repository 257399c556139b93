//! Domain error types

use thiserror::Error;

/// Error when an uploaded file has an extension the service does not accept
#[derive(Debug, Clone, Error)]
#[error("Unsupported audio file: \"{filename}\". Accepted extensions are: m4a, mp3, wav, aac, ogg")]
pub struct UnsupportedFormatError {
    pub filename: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Missing {name}. Set the {env_var} environment variable or add '{key}' to the config file")]
    MissingSecret {
        name: &'static str,
        env_var: &'static str,
        key: &'static str,
    },

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },
}
