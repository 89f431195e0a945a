use dioxus::prelude::*;
use scriba_core::export::{self, ExportKind};
use scriba_core::{format_clock, SessionState};

const TRANSCRIPT_CSS: Asset = asset!("/assets/styling/transcript.css");

/// Transcript panels with per-collection downloads, HTML export and reset.
#[component]
pub fn TranscriptView(mut session: Signal<SessionState>) -> Element {
    let state = session.read();
    if !state.has_transcript() {
        return rsx! {};
    }

    let stem = if state.uploaded_filename.is_empty() {
        "transcript".to_string()
    } else {
        state.uploaded_filename.clone()
    };

    let mut payloads: Vec<(ExportKind, String)> = Vec::new();
    if let Some(payload) = export::text_payload(&state) {
        payloads.push((ExportKind::Text, payload));
    }
    match export::words_payload(&state) {
        Ok(Some(payload)) => payloads.push((ExportKind::Words, payload)),
        Ok(None) => {}
        Err(e) => tracing::error!("words export failed: {}", e),
    }
    match export::segments_payload(&state) {
        Ok(Some(payload)) => payloads.push((ExportKind::Segments, payload)),
        Ok(None) => {}
        Err(e) => tracing::error!("segments export failed: {}", e),
    }
    if !state.segments.is_empty() {
        payloads.push((
            ExportKind::Html,
            export::html_document(&stem, &state.segments),
        ));
    }

    let words_json = serde_json::to_string_pretty(&state.words).unwrap_or_default();

    // (id, "start - end", text) rows for the segment panel
    let segment_rows: Vec<(usize, String, String)> = state
        .segments
        .iter()
        .map(|segment| {
            (
                segment.id,
                format!(
                    "{} - {}",
                    format_clock(segment.start.max(0.0) as u64),
                    format_clock(segment.end.max(0.0) as u64)
                ),
                segment.text.clone(),
            )
        })
        .collect();

    // (label, file name, data: URL) per offered download
    let downloads: Vec<(String, String, String)> = payloads
        .into_iter()
        .map(|(kind, payload)| {
            (
                kind.to_string(),
                kind.file_name(&stem),
                format!(
                    "data:{};charset=utf-8,{}",
                    kind.mime(),
                    urlencoding::encode(&payload)
                ),
            )
        })
        .collect();

    let reset = move |_| {
        session.write().reset();
    };

    rsx! {
        document::Link { rel: "stylesheet", href: TRANSCRIPT_CSS }

        div {
            id: "transcript-panel",
            style: "max-width: 40rem; margin: 1rem auto;",

            h3 { "text" }
            p {
                style: "white-space: pre-wrap; font-family: Georgia, serif; line-height: 1.6;",
                "{state.text}"
            }

            if !state.words.is_empty() {
                h3 { "words" }
                p { style: "color: #666;", "{state.words.len()} timed words" }
                p {
                    style: "white-space: pre-wrap; font-family: monospace; font-size: 0.8em; max-height: 16rem; overflow-y: auto;",
                    "{words_json}"
                }
            }

            if !segment_rows.is_empty() {
                h3 { "segments" }
                for (id, clock, text) in segment_rows.into_iter() {
                    p {
                        key: "{id}",
                        span {
                            style: "color: #888; font-size: 0.85em; margin-right: 0.5rem;",
                            "({clock})"
                        }
                        "{text}"
                    }
                }
            }

            h3 { "downloads" }
            for (label, file_name, href) in downloads.into_iter() {
                a {
                    key: "{file_name}",
                    class: "download-link",
                    download: file_name.clone(),
                    href: href,
                    "Download {label}"
                }
            }

            div {
                style: "margin-top: 1rem;",
                button {
                    style: "
                        background: #6c757d;
                        color: white;
                        border: none;
                        padding: 0.5rem 1rem;
                        border-radius: 3px;
                        cursor: pointer;
                    ",
                    onclick: reset,
                    "Reset (load another file)"
                }
            }
        }
    }
}
