//! Configuration for the transcription studio

use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Default transcription model.
pub const DEFAULT_MODEL: &str = "whisper-1";

/// Hard cap on uploaded audio, in bytes (enforced before any network call).
pub const MAX_UPLOAD_BYTES: u64 = 25_000_000;

/// Configuration for the tool, sourced from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the OpenAI-compatible API (no trailing slash)
    pub api_url: String,

    /// Transcription model identifier
    pub model: String,

    /// Upstream API key released by the credential gate
    pub api_key: Option<String>,

    /// Salt prepended to the operator passphrase before hashing
    pub password_salt: Option<String>,

    /// Expected hex SHA-1 digest of the salted passphrase
    pub password_hash: Option<String>,

    /// Email allow-list; empty means everyone may process audio
    pub allowed_emails: Vec<String>,

    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: u64,

    /// Request timeout for the transcription call, in seconds
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            password_salt: None,
            password_hash: None,
            allowed_emails: Vec::new(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            request_timeout_secs: 300,
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the environment: `STT_API_URL`, `STT_MODEL`,
    /// `OPENAI_API_KEY`, `PWD_SALT`, `PWD_HASH`, `ALLOWED_EMAILS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("STT_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(model) = std::env::var("STT_MODEL") {
            config.model = model;
        }
        config.api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        config.password_salt = std::env::var("PWD_SALT").ok().filter(|s| !s.is_empty());
        config.password_hash = std::env::var("PWD_HASH").ok().filter(|h| !h.is_empty());
        if let Ok(list) = std::env::var("ALLOWED_EMAILS") {
            config.allowed_emails = parse_email_list(&list);
        }
        config
    }

    /// Set the API base URL
    pub fn with_api_url<S: Into<String>>(mut self, url: S) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the transcription model
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    /// Set the upstream API key
    pub fn with_api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the passphrase salt and expected digest
    pub fn with_passphrase<S: Into<String>>(mut self, salt: S, hash: S) -> Self {
        self.password_salt = Some(salt.into());
        self.password_hash = Some(hash.into());
        self
    }

    /// Set the upload size cap
    pub fn with_max_upload_bytes(mut self, bytes: u64) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}

/// Split a comma-separated allow-list, dropping empty entries.
fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.api_key.is_none());
        assert!(config.allowed_emails.is_empty());
        assert_eq!(config.max_upload_bytes, 25_000_000);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = AppConfig::new().with_api_url("http://localhost:8000/v1/");
        assert_eq!(config.api_url, "http://localhost:8000/v1");
    }

    #[test]
    fn test_email_list_parsing() {
        let emails = parse_email_list("a@x.pl, b@y.pl ,,c@z.pl");
        assert_eq!(emails, vec!["a@x.pl", "b@y.pl", "c@z.pl"]);
    }
}
