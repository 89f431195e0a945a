//! Verbose transcription client and transcript data model

use crate::config::AppConfig;
use crate::error::{Result, ScribaError};
use md5::{Digest, Md5};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// A spoken word interval (present only when word-level timestamps were
/// requested).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptWord {
    /// Positional id, dense and 0-based
    #[serde(default)]
    pub id: usize,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// The recognized word
    #[serde(alias = "word")]
    pub text: String,
}

/// A spoken phrase interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Positional id, dense and 0-based; doubles as the DOM anchor index
    #[serde(default)]
    pub id: usize,

    /// Decoder seek offset reported by the API
    #[serde(default)]
    pub seek: i64,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// The recognized phrase
    pub text: String,
}

/// Full verbose transcription: plain text plus timing metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// The transcribed text
    pub text: String,

    /// Word intervals (empty unless word timestamps were requested)
    #[serde(default)]
    pub words: Vec<TranscriptWord>,

    /// Phrase intervals
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Reassign dense, 0-based positional ids. Ids index directly into the
    /// collections and anchor rendered lines, so they must never drift.
    pub fn normalize_ids(&mut self) {
        for (nr, word) in self.words.iter_mut().enumerate() {
            word.id = nr;
        }
        for (nr, segment) in self.segments.iter_mut().enumerate() {
            segment.id = nr;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.words.is_empty() && self.segments.is_empty()
    }
}

/// Raw verbose_json response shape from the API.
#[derive(Debug, Deserialize)]
struct VerboseResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    words: Vec<TranscriptWord>,
    #[serde(default)]
    segments: Vec<TranscriptSegment>,
}

/// Client for an OpenAI-compatible `/audio/transcriptions` endpoint.
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    http: reqwest::Client,
    api_url: String,
    model: String,
    api_key: String,
    max_upload_bytes: u64,
}

type ClientCache = Mutex<HashMap<String, Arc<TranscriptionClient>>>;

// One client per API key for the life of the process.
static CLIENT_CACHE: Lazy<ClientCache> = Lazy::new(|| Mutex::new(HashMap::new()));

impl TranscriptionClient {
    /// Create a client for the given API key.
    pub fn new(api_key: impl Into<String>, config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
            max_upload_bytes: config.max_upload_bytes,
        })
    }

    /// Process-wide cached client handle, keyed on the API key.
    pub fn shared(api_key: &str, config: &AppConfig) -> Result<Arc<Self>> {
        let mut cache = CLIENT_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(client) = cache.get(api_key) {
            return Ok(client.clone());
        }
        let client = Arc::new(Self::new(api_key, config)?);
        cache.insert(api_key.to_string(), client.clone());
        Ok(client)
    }

    /// Transcribe raw audio bytes, requesting segment (and optionally word)
    /// timestamp granularity. The upload cap is enforced before anything is
    /// sent.
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
        word_timestamps: bool,
    ) -> Result<Transcript> {
        let size = audio.len() as u64;
        if size > self.max_upload_bytes {
            return Err(ScribaError::UploadTooLarge {
                size,
                limit: self.max_upload_bytes,
            });
        }

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/mpeg")?;
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment");
        if word_timestamps {
            form = form.text("timestamp_granularities[]", "word");
        }

        let url = format!("{}/audio/transcriptions", self.api_url);
        debug!("posting {} bytes to {}", size, url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ScribaError::Api { status, message });
        }

        let raw: VerboseResponse = response
            .json()
            .await
            .map_err(|e| ScribaError::InvalidResponse(e.to_string()))?;

        let mut transcript = Transcript {
            text: raw.text,
            words: raw.words,
            segments: raw.segments,
        };
        transcript.normalize_ids();
        info!(
            "transcribed {} bytes into {} segments ({} words)",
            size,
            transcript.segments.len(),
            transcript.words.len()
        );
        Ok(transcript)
    }
}

/// Hex MD5 fingerprint of uploaded bytes, used to detect duplicate
/// submissions.
pub fn content_hash(audio: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(audio);
    format!("{:x}", hasher.finalize())
}

/// Uploads are restricted to MP3 files.
pub fn ensure_mp3(file_name: &str) -> Result<()> {
    let ok = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false);
    if ok {
        Ok(())
    } else {
        Err(ScribaError::Unsupported(format!(
            "expected an .mp3 file, got {:?}",
            file_name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_content_hash_is_hex_md5() {
        // md5("hello")
        assert_eq!(content_hash(b"hello"), "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(content_hash(b"hello"), content_hash(b"hello"));
        assert_ne!(content_hash(b"hello"), content_hash(b"hello "));
    }

    #[test]
    fn test_verbose_response_tolerates_missing_collections() {
        let raw: VerboseResponse = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(raw.text, "hi");
        assert!(raw.words.is_empty());
        assert!(raw.segments.is_empty());
    }

    #[test]
    fn test_word_field_alias() {
        let word: TranscriptWord =
            serde_json::from_str(r#"{"word": "hej", "start": 0.1, "end": 0.4}"#).unwrap();
        assert_eq!(word.text, "hej");
        assert_eq!(word.id, 0);
    }

    #[test]
    fn test_normalize_ids_is_dense_and_zero_based() {
        let mut transcript: Transcript = serde_json::from_str(
            r#"{
                "text": "a b",
                "segments": [
                    {"id": 7, "seek": 0, "start": 0.0, "end": 1.0, "text": "a"},
                    {"id": 9, "seek": 100, "start": 1.0, "end": 2.0, "text": "b"}
                ]
            }"#,
        )
        .unwrap();
        transcript.normalize_ids();
        let ids: Vec<usize> = transcript.segments.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1]);
        // Normalizing again must not change anything.
        transcript.normalize_ids();
        let ids: Vec<usize> = transcript.segments.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_ensure_mp3() {
        assert!(ensure_mp3("talk.mp3").is_ok());
        assert!(ensure_mp3("TALK.MP3").is_ok());
        assert!(ensure_mp3("talk.wav").is_err());
        assert!(ensure_mp3("mp3").is_err());
    }

    #[tokio::test]
    async fn test_upload_cap_is_enforced_before_sending() {
        let config = AppConfig::new().with_max_upload_bytes(4);
        let client = TranscriptionClient::new("sk-test", &config).unwrap();
        let err = client
            .transcribe(vec![0u8; 5], "big.mp3", false)
            .await
            .unwrap_err();
        assert_eq!(err, ScribaError::UploadTooLarge { size: 5, limit: 4 });
    }

    #[test]
    fn test_shared_client_is_cached_per_key() {
        let config = AppConfig::default();
        let a = TranscriptionClient::shared("sk-a", &config).unwrap();
        let b = TranscriptionClient::shared("sk-a", &config).unwrap();
        let c = TranscriptionClient::shared("sk-b", &config).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
