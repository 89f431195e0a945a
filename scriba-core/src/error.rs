//! Error types for the scriba-core library

use thiserror::Error;

/// Main error type for scriba operations
#[derive(Error, Debug)]
pub enum ScribaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Transcription API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upload of {size} bytes exceeds the {limit} byte limit")]
    UploadTooLarge { size: u64, limit: u64 },

    #[error("Unsupported upload: {0}")]
    Unsupported(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),
}

/// Result type alias for scriba operations
pub type Result<T> = std::result::Result<T, ScribaError>;

impl From<reqwest::Error> for ScribaError {
    fn from(err: reqwest::Error) -> Self {
        ScribaError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for ScribaError {
    fn from(err: serde_json::Error) -> Self {
        ScribaError::InvalidResponse(err.to_string())
    }
}

impl PartialEq for ScribaError {
    fn eq(&self, other: &Self) -> bool {
        match self {
            ScribaError::Io(err) => {
                matches!(other, ScribaError::Io(e) if err.to_string() == e.to_string())
            }
            ScribaError::Request(msg) => {
                matches!(other, ScribaError::Request(o) if msg == o)
            }
            ScribaError::Api { status, message } => {
                matches!(other, ScribaError::Api { status: s, message: m } if status == s && message == m)
            }
            ScribaError::InvalidResponse(msg) => {
                matches!(other, ScribaError::InvalidResponse(o) if msg == o)
            }
            ScribaError::Configuration(msg) => {
                matches!(other, ScribaError::Configuration(o) if msg == o)
            }
            ScribaError::UploadTooLarge { size, limit } => {
                matches!(other, ScribaError::UploadTooLarge { size: s, limit: l } if size == s && limit == l)
            }
            ScribaError::Unsupported(msg) => {
                matches!(other, ScribaError::Unsupported(o) if msg == o)
            }
            ScribaError::AccessDenied(msg) => {
                matches!(other, ScribaError::AccessDenied(o) if msg == o)
            }
        }
    }
}
