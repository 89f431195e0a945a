//! Scriba Core Library
//!
//! Domain logic for the transcription studio: credential gate, verbose
//! transcription client, per-session state, segment rendering, exports and
//! playback-sync helpers. Transcription itself is delegated to an
//! OpenAI-compatible speech-to-text API.

pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod playback;
pub mod render;
pub mod session;
pub mod transcription;

pub use auth::{passphrase_digest, CredentialGate};
pub use config::{AppConfig, MAX_UPLOAD_BYTES};
pub use error::{Result, ScribaError};
pub use export::ExportKind;
pub use playback::{parse_video_url, VideoId};
pub use render::{format_clock, render_segment_lines, LineStyle, SegmentLine};
pub use session::SessionState;
use tracing::info;
pub use transcription::{
    content_hash, Transcript, TranscriptSegment, TranscriptWord, TranscriptionClient,
};

/// High-level upload handler: validate the file, fingerprint it, and
/// transcribe unless the identical bytes were already processed. Returns
/// `true` when the external service was actually invoked.
pub async fn process_upload(
    session: &mut SessionState,
    audio: Vec<u8>,
    file_name: &str,
    word_timestamps: bool,
    config: &AppConfig,
) -> Result<bool> {
    transcription::ensure_mp3(file_name)?;
    let size = audio.len() as u64;
    if size > config.max_upload_bytes {
        return Err(ScribaError::UploadTooLarge {
            size,
            limit: config.max_upload_bytes,
        });
    }

    let hash = content_hash(&audio);
    if !session.needs_transcription(&hash) {
        info!("upload matches stored transcript, skipping transcription");
        return Ok(false);
    }

    let api_key = session
        .api_key
        .clone()
        .ok_or_else(|| ScribaError::AccessDenied("session is not unlocked".to_string()))?;

    let client = TranscriptionClient::shared(&api_key, config)?;
    let transcript = client.transcribe(audio, file_name, word_timestamps).await?;
    session.store_transcript(hash, file_name, transcript);
    Ok(true)
}
