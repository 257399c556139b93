//! Config file and environment loading

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Default config file location under the XDG config directory
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("memopost")
        .join("config.toml")
}

/// Load config from a TOML file.
///
/// With an explicit path, a missing file is an error. With the default
/// path, a missing file yields an empty config.
pub async fn load_file_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path(), false),
    };

    if !path.exists() {
        if explicit {
            return Err(ConfigError::ReadError(format!(
                "no such file: {}",
                path.display()
            )));
        }
        return Ok(AppConfig::empty());
    }

    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| ConfigError::ReadError(e.to_string()))?;

    parse_toml(&content)
}

/// Parse TOML content into AppConfig
fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Read the environment overlay: secrets and server overrides
pub fn env_config() -> Result<AppConfig, ConfigError> {
    env_config_from(|name| std::env::var(name).ok())
}

fn env_config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
    let port = match lookup("MEMOPOST_PORT") {
        Some(raw) => Some(raw.parse::<u16>().map_err(|_| ConfigError::ValidationError {
            key: "MEMOPOST_PORT".to_string(),
            message: format!("not a valid port number: \"{}\"", raw),
        })?),
        None => None,
    };

    Ok(AppConfig {
        api_key: lookup("OPENAI_API_KEY").filter(|v| !v.is_empty()),
        smtp_password: lookup("SMTP_PASSWORD").filter(|v| !v.is_empty()),
        bind: lookup("MEMOPOST_BIND").filter(|v| !v.is_empty()),
        port,
        ..AppConfig::empty()
    })
}
