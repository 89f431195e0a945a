//! Credential gate: salted passphrase check and API-key release

use crate::config::AppConfig;
use crate::error::{Result, ScribaError};
use sha1::{Digest, Sha1};
use tracing::{debug, warn};

/// Gate that releases the upstream API key once the operator passphrase
/// matches the configured salted digest.
#[derive(Debug, Clone)]
pub struct CredentialGate {
    salt: String,
    expected_hash: String,
    api_key: String,
    allowed_emails: Vec<String>,
}

impl CredentialGate {
    pub fn new(
        salt: impl Into<String>,
        expected_hash: impl Into<String>,
        api_key: impl Into<String>,
        allowed_emails: Vec<String>,
    ) -> Self {
        Self {
            salt: salt.into(),
            expected_hash: expected_hash.into().to_lowercase(),
            api_key: api_key.into(),
            allowed_emails,
        }
    }

    /// Build from configuration. Requires salt, digest and API key to all be
    /// present; a partially configured gate cannot release anything.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let salt = config.password_salt.clone().ok_or_else(|| {
            ScribaError::Configuration("PWD_SALT is not configured".to_string())
        })?;
        let hash = config.password_hash.clone().ok_or_else(|| {
            ScribaError::Configuration("PWD_HASH is not configured".to_string())
        })?;
        let api_key = config.api_key.clone().ok_or_else(|| {
            ScribaError::Configuration("OPENAI_API_KEY is not configured".to_string())
        })?;
        Ok(Self::new(salt, hash, api_key, config.allowed_emails.clone()))
    }

    /// Check a passphrase against the stored digest.
    pub fn verify(&self, passphrase: &str) -> bool {
        passphrase_digest(&self.salt, passphrase) == self.expected_hash
    }

    /// Release the API key for a correct passphrase. A mismatch is an
    /// explicit denial, never a silently stored bad key.
    pub fn unlock(&self, passphrase: &str) -> Result<String> {
        if self.verify(passphrase) {
            debug!("passphrase accepted, releasing API key");
            Ok(self.api_key.clone())
        } else {
            warn!("passphrase rejected");
            Err(ScribaError::AccessDenied("wrong passphrase".to_string()))
        }
    }

    /// True when the allow-list is empty or contains the address.
    pub fn email_allowed(&self, email: &str) -> bool {
        if self.allowed_emails.is_empty() {
            return true;
        }
        let email = email.trim().to_lowercase();
        self.allowed_emails.iter().any(|e| e.to_lowercase() == email)
    }
}

/// Hex SHA-1 of `"{salt} {passphrase}"` — the digest stored in `PWD_HASH`.
pub fn passphrase_digest(salt: &str, passphrase: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{} {}", salt, passphrase).as_bytes());
    format!("{:x}", hasher.finalize())
}
