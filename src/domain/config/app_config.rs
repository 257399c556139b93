//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Transcription API key
    pub api_key: Option<String>,
    /// Transcription API base URL
    pub api_base_url: Option<String>,
    /// Transcription model identifier
    pub model: Option<String>,
    /// SMTP server hostname
    pub smtp_host: Option<String>,
    /// SMTP server port (implicit TLS)
    pub smtp_port: Option<u16>,
    /// Sender address, also used as the SMTP login
    pub sender: Option<String>,
    /// SMTP account credential
    pub smtp_password: Option<String>,
    /// HTTP bind address
    pub bind: Option<String>,
    /// HTTP port
    pub port: Option<u16>,
}

impl AppConfig {
    /// Create config with default values (secrets and sender stay unset)
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            api_base_url: Some("https://api.openai.com/v1".to_string()),
            model: Some("whisper-1".to_string()),
            smtp_host: Some("smtp.gmail.com".to_string()),
            smtp_port: Some(465),
            sender: None,
            smtp_password: None,
            bind: Some("127.0.0.1".to_string()),
            port: Some(8080),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            api_base_url: other.api_base_url.or(self.api_base_url),
            model: other.model.or(self.model),
            smtp_host: other.smtp_host.or(self.smtp_host),
            smtp_port: other.smtp_port.or(self.smtp_port),
            sender: other.sender.or(self.sender),
            smtp_password: other.smtp_password.or(self.smtp_password),
            bind: other.bind.or(self.bind),
            port: other.port.or(self.port),
        }
    }

    /// Get the API base URL, or the public endpoint if not set
    pub fn api_base_url_or_default(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or("https://api.openai.com/v1")
    }

    /// Get the model identifier, or "whisper-1" if not set
    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or("whisper-1")
    }

    /// Get the SMTP host, or "smtp.gmail.com" if not set
    pub fn smtp_host_or_default(&self) -> &str {
        self.smtp_host.as_deref().unwrap_or("smtp.gmail.com")
    }

    /// Get the SMTP port, or 465 if not set
    pub fn smtp_port_or_default(&self) -> u16 {
        self.smtp_port.unwrap_or(465)
    }

    /// Get the bind address, or "127.0.0.1" if not set
    pub fn bind_or_default(&self) -> &str {
        self.bind.as_deref().unwrap_or("127.0.0.1")
    }

    /// Get the HTTP port, or 8080 if not set
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(8080)
    }

    /// Get the API key, failing if it was never provided
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingSecret {
                name: "transcription API key",
                env_var: "OPENAI_API_KEY",
                key: "api_key",
            })
    }

    /// Get the SMTP credential, failing if it was never provided
    pub fn require_smtp_password(&self) -> Result<&str, ConfigError> {
        self.smtp_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingSecret {
                name: "SMTP password",
                env_var: "SMTP_PASSWORD",
                key: "smtp_password",
            })
    }

    /// Get the sender address, failing if it was never provided
    pub fn require_sender(&self) -> Result<&str, ConfigError> {
        self.sender
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::ValidationError {
                key: "sender".to_string(),
                message: "sender address is required".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_non_secret_fields() {
        let config = AppConfig::defaults();
        assert_eq!(config.model.as_deref(), Some("whisper-1"));
        assert_eq!(config.smtp_host.as_deref(), Some("smtp.gmail.com"));
        assert_eq!(config.smtp_port, Some(465));
        assert!(config.api_key.is_none());
        assert!(config.smtp_password.is_none());
        assert!(config.sender.is_none());
    }

    #[test]
    fn merge_prefers_other() {
        let base = AppConfig {
            model: Some("whisper-1".to_string()),
            smtp_port: Some(465),
            ..Default::default()
        };
        let other = AppConfig {
            model: Some("custom-model".to_string()),
            bind: Some("0.0.0.0".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.model.as_deref(), Some("custom-model"));
        assert_eq!(merged.smtp_port, Some(465));
        assert_eq!(merged.bind.as_deref(), Some("0.0.0.0"));
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let config = AppConfig::empty();
        assert!(matches!(
            config.require_api_key(),
            Err(ConfigError::MissingSecret { .. })
        ));
    }

    #[test]
    fn empty_secret_counts_as_missing() {
        let config = AppConfig {
            smtp_password: Some(String::new()),
            ..Default::default()
        };
        assert!(config.require_smtp_password().is_err());
    }

    #[test]
    fn present_secrets_are_returned() {
        let config = AppConfig {
            api_key: Some("sk-test".to_string()),
            smtp_password: Some("app-pass".to_string()),
            sender: Some("memos@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
        assert_eq!(config.require_smtp_password().unwrap(), "app-pass");
        assert_eq!(config.require_sender().unwrap(), "memos@example.com");
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig {
            api_key: Some("sk-test".to_string()),
            smtp_host: Some("mail.example.com".to_string()),
            smtp_port: Some(465),
            ..Default::default()
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.api_key, config.api_key);
        assert_eq!(parsed.smtp_host, config.smtp_host);
        assert_eq!(parsed.smtp_port, config.smtp_port);
    }
}
