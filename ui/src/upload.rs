use dioxus::prelude::*;
use scriba_core::transcription::ensure_mp3;
use scriba_core::{content_hash, SessionState, Transcript, MAX_UPLOAD_BYTES};

#[derive(Clone, Debug, PartialEq)]
enum UploadStatus {
    Idle,
    Transcribing,
    /// Rejected before processing; the operator must acknowledge to free the
    /// upload slot
    Rejected(String),
    Reused,
    Done,
    Failed(String),
}

/// MP3 upload form: size/type checks, duplicate suppression by content hash,
/// word-timestamp toggle.
#[component]
pub fn UploadView(mut session: Signal<SessionState>) -> Element {
    let mut status = use_signal(|| UploadStatus::Idle);
    let word_timestamps = use_signal(|| false);

    let on_file = move |evt: FormEvent| {
        let mut session = session.clone();
        let mut status = status.clone();
        spawn(async move {
            let Some(file_engine) = evt.files() else {
                return;
            };
            let Some(file_name) = file_engine.files().into_iter().next() else {
                return;
            };
            let Some(bytes) = file_engine.read_file(&file_name).await else {
                status.set(UploadStatus::Failed(format!("Could not read {}", file_name)));
                return;
            };

            if let Err(e) = ensure_mp3(&file_name) {
                status.set(UploadStatus::Rejected(e.to_string()));
                return;
            }
            if bytes.len() as u64 > MAX_UPLOAD_BYTES {
                status.set(UploadStatus::Rejected(format!(
                    "File may not be larger than {} bytes",
                    MAX_UPLOAD_BYTES
                )));
                return;
            }

            // Identical bytes never re-invoke the external service.
            let hash = content_hash(&bytes);
            if !session.read().needs_transcription(&hash) {
                status.set(UploadStatus::Reused);
                return;
            }

            let Some(api_key) = session.read().api_key.clone() else {
                status.set(UploadStatus::Failed("Session is locked".to_string()));
                return;
            };

            status.set(UploadStatus::Transcribing);
            match transcribe_impl(api_key, file_name.clone(), bytes, word_timestamps()).await {
                Ok(transcript) => {
                    session.write().store_transcript(hash, file_name, transcript);
                    status.set(UploadStatus::Done);
                }
                Err(e) => status.set(UploadStatus::Failed(format!("Transcription failed: {}", e))),
            }
        });
    };

    let acknowledge = move |_| {
        session.write().reject_upload();
        status.set(UploadStatus::Idle);
    };

    let slot_key = session.read().upload_slot_key();
    let current = status();

    rsx! {
        div {
            style: "max-width: 40rem; margin: 0 auto;",

            h3 { "Upload an mp3 file (max 25 MB)" }
            input {
                key: "{slot_key}",
                r#type: "file",
                accept: ".mp3",
                disabled: current == UploadStatus::Transcribing,
                onchange: on_file,
            }
            label {
                style: "display: block; margin: 0.6rem 0;",
                input {
                    r#type: "checkbox",
                    checked: word_timestamps(),
                    onchange: {
                        let mut word_timestamps = word_timestamps.clone();
                        move |evt: FormEvent| word_timestamps.set(evt.checked())
                    },
                }
                " Fetch word-level timestamps"
            }

            match current {
                UploadStatus::Idle => rsx! {},
                UploadStatus::Transcribing => rsx! {
                    p { style: "color: #666;", "🎙 Transcribing audio, please wait..." }
                },
                UploadStatus::Reused => rsx! {
                    p { style: "color: #155724;", "Same file as before - reusing the stored transcript." }
                },
                UploadStatus::Done => rsx! {
                    p { style: "color: #155724;", "✅ Transcription finished." }
                },
                UploadStatus::Rejected(ref message) => rsx! {
                    div {
                        style: "background: #f8d7da; color: #721c24; padding: 1rem; border-radius: 5px;",
                        p { "{message}" }
                        button {
                            style: "background: #dc3545; color: white; border: none; padding: 0.4rem 1rem; border-radius: 3px; cursor: pointer;",
                            onclick: acknowledge,
                            "OK"
                        }
                    }
                },
                UploadStatus::Failed(ref message) => rsx! {
                    div {
                        style: "background: #f8d7da; color: #721c24; padding: 1rem; border-radius: 5px;",
                        h4 { "❌ Error" }
                        p { "{message}" }
                    }
                },
            }
        }
    }
}

// Server-side transcription through the api crate
#[cfg(feature = "api")]
async fn transcribe_impl(
    api_key: String,
    file_name: String,
    bytes: Vec<u8>,
    word_timestamps: bool,
) -> Result<Transcript, String> {
    api::transcribe_upload(api_key, file_name, bytes, word_timestamps)
        .await
        .map_err(|e| e.to_string())
}

// Fallback when no server functions are available
#[cfg(not(feature = "api"))]
async fn transcribe_impl(
    api_key: String,
    file_name: String,
    bytes: Vec<u8>,
    word_timestamps: bool,
) -> Result<Transcript, String> {
    use scriba_core::{AppConfig, TranscriptionClient};

    let config = AppConfig::from_env();
    let client = TranscriptionClient::shared(&api_key, &config).map_err(|e| e.to_string())?;
    client
        .transcribe(bytes, &file_name, word_timestamps)
        .await
        .map_err(|e| e.to_string())
}
