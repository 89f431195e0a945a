//! This crate contains all shared fullstack server functions.
use dioxus::prelude::*;
use scriba_core::Transcript;

/// Check the operator passphrase on the server. Returns the released API key
/// on a match and `None` on a mismatch — denial is data, not an error, so the
/// gate view can show a friendly message.
#[server(Unlock)]
pub async fn unlock(passphrase: String, email: Option<String>) -> Result<Option<String>, ServerFnError> {
    use scriba_core::{AppConfig, CredentialGate};

    let config = AppConfig::from_env();
    let gate = match CredentialGate::from_config(&config) {
        Ok(gate) => gate,
        Err(e) => {
            tracing::error!("credential gate unavailable: {}", e);
            return Err(ServerFnError::new(format!("Gate not configured: {}", e)));
        }
    };

    if let Some(ref email) = email {
        if !gate.email_allowed(email) {
            tracing::warn!("email not on the allow-list");
            return Ok(None);
        }
    }

    Ok(gate.unlock(&passphrase).ok())
}

/// Transcribe an uploaded file on the server.
#[server(TranscribeUpload)]
pub async fn transcribe_upload(
    api_key: String,
    file_name: String,
    audio: Vec<u8>,
    word_timestamps: bool,
) -> Result<Transcript, ServerFnError> {
    use scriba_core::{transcription, AppConfig, TranscriptionClient};

    tracing::info!("transcribing upload: {} ({} bytes)", file_name, audio.len());

    transcription::ensure_mp3(&file_name)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let config = AppConfig::from_env();
    let client = TranscriptionClient::shared(&api_key, &config)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    match client.transcribe(audio, &file_name, word_timestamps).await {
        Ok(transcript) => Ok(transcript),
        Err(e) => {
            tracing::error!("Transcription failed: {}", e);
            Err(ServerFnError::new(format!("Transcription failed: {}", e)))
        }
    }
}
