//! Transcript exports: plain text, filtered JSON, standalone HTML

use crate::error::Result;
use crate::render::{escape_text, render_segment_lines, LineStyle};
use crate::session::SessionState;
use crate::transcription::TranscriptSegment;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use strum::Display;
use tracing::info;

/// Fields kept when segment records are serialized or imported.
pub const SEGMENT_FIELDS: [&str; 5] = ["id", "seek", "start", "end", "text"];

const PAGE_TEMPLATE: &str = include_str!("../assets/page_template.html");
const PLAYER_SCRIPT: &str = include_str!("../assets/player.js");

/// The downloadable artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExportKind {
    Text,
    Words,
    Segments,
    Html,
}

impl ExportKind {
    /// Download file name for a given upload stem.
    pub fn file_name(&self, stem: &str) -> String {
        match self {
            ExportKind::Text => format!("{}_text.txt", stem),
            ExportKind::Words => format!("{}_words.json", stem),
            ExportKind::Segments => format!("{}_segments.json", stem),
            ExportKind::Html => format!("{}.html", stem),
        }
    }

    /// MIME type of the artifact.
    pub fn mime(&self) -> &'static str {
        match self {
            ExportKind::Text => "text/plain",
            ExportKind::Words | ExportKind::Segments => "application/json",
            ExportKind::Html => "text/html",
        }
    }
}

/// Plain-text payload, or `None` when there is nothing to download.
pub fn text_payload(state: &SessionState) -> Option<String> {
    if state.text.is_empty() {
        None
    } else {
        Some(state.text.clone())
    }
}

/// Word-list JSON payload.
pub fn words_payload(state: &SessionState) -> Result<Option<String>> {
    if state.words.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(&state.words)?))
}

/// Segment-list JSON payload, restricted to [`SEGMENT_FIELDS`].
pub fn segments_payload(state: &SessionState) -> Result<Option<String>> {
    if state.segments.is_empty() {
        return Ok(None);
    }
    let value = serde_json::to_value(&state.segments)?;
    Ok(Some(serde_json::to_string(&filter_segment_fields(value))?))
}

/// Strip everything but [`SEGMENT_FIELDS`] from a segment record or an array
/// of them. Non-object values pass through untouched.
pub fn filter_segment_fields(value: Value) -> Value {
    match value {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(filter_segment_fields).collect())
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(k, _)| SEGMENT_FIELDS.contains(&k.as_str()))
                .collect(),
        ),
        other => other,
    }
}

/// Parse externally supplied segment JSON, tolerating richer records by
/// filtering to the field whitelist first.
pub fn parse_segments_json(raw: &str) -> Result<Vec<TranscriptSegment>> {
    let value: Value = serde_json::from_str(raw)?;
    let segments: Vec<TranscriptSegment> =
        serde_json::from_value(filter_segment_fields(value))?;
    Ok(segments)
}

/// Assemble the standalone transcript document: title, rendered segment
/// lines and the embedded player script, substituted into the page template.
pub fn html_document(title: &str, segments: &[TranscriptSegment]) -> String {
    let body = render_segment_lines(segments, LineStyle::Transcript)
        .into_iter()
        .map(|line| line.html)
        .collect::<Vec<_>>()
        .join("\n");
    // Body goes in last: segment text must never hit a placeholder slot.
    PAGE_TEMPLATE
        .replace("{script}", PLAYER_SCRIPT)
        .replace("{title}", &escape_text(title))
        .replace("{body}", &body)
}

/// Write one export next to the others in `dir`, returning the path, or
/// `None` when the session holds nothing of that kind.
pub fn write_export(
    dir: &Path,
    stem: &str,
    kind: ExportKind,
    state: &SessionState,
) -> Result<Option<PathBuf>> {
    let payload = match kind {
        ExportKind::Text => text_payload(state),
        ExportKind::Words => words_payload(state)?,
        ExportKind::Segments => segments_payload(state)?,
        ExportKind::Html => {
            if state.segments.is_empty() {
                None
            } else {
                Some(html_document(stem, &state.segments))
            }
        }
    };
    let Some(payload) = payload else {
        return Ok(None);
    };
    let path = dir.join(kind.file_name(stem));
    fs::write(&path, payload)?;
    info!("wrote {} export to {}", kind, path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::{Transcript, TranscriptWord};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn state_with_transcript() -> SessionState {
        let mut state = SessionState::new();
        state.store_transcript(
            "hash",
            "talk.mp3",
            Transcript {
                text: "dzień dobry".to_string(),
                words: vec![TranscriptWord {
                    id: 0,
                    start: 0.0,
                    end: 0.6,
                    text: "dzień".to_string(),
                }],
                segments: vec![TranscriptSegment {
                    id: 0,
                    seek: 0,
                    start: 0.0,
                    end: 2.0,
                    text: "dzień dobry".to_string(),
                }],
            },
        );
        state
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ExportKind::Text.file_name("talk.mp3"), "talk.mp3_text.txt");
        assert_eq!(ExportKind::Words.file_name("talk.mp3"), "talk.mp3_words.json");
        assert_eq!(
            ExportKind::Segments.file_name("talk.mp3"),
            "talk.mp3_segments.json"
        );
        assert_eq!(ExportKind::Html.file_name("talk.mp3"), "talk.mp3.html");
    }

    #[test]
    fn test_empty_session_offers_no_downloads() {
        let state = SessionState::new();
        assert!(text_payload(&state).is_none());
        assert!(words_payload(&state).unwrap().is_none());
        assert!(segments_payload(&state).unwrap().is_none());
    }

    #[test]
    fn test_segment_filter_keeps_only_whitelisted_fields() {
        let value = json!([{
            "id": 0,
            "seek": 0,
            "start": 0.0,
            "end": 2.0,
            "text": "hej",
            "tokens": [50364, 1029],
            "temperature": 0.0,
            "avg_logprob": -0.3
        }]);
        let filtered = filter_segment_fields(value);
        let record = &filtered[0];
        let mut keys: Vec<&str> = record.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["end", "id", "seek", "start", "text"]);
    }

    #[test]
    fn test_parse_segments_json_tolerates_extra_fields() {
        let raw = r#"[{"id": 4, "seek": 100, "start": 1.0, "end": 2.0, "text": "a", "tokens": [1]}]"#;
        let segments = parse_segments_json(raw).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "a");
        assert_eq!(segments[0].seek, 100);
    }

    #[test]
    fn test_html_document_embeds_lines_and_script() {
        let state = state_with_transcript();
        let html = html_document("talk.mp3", &state.segments);
        assert!(html.contains("<title>talk.mp3</title>"));
        assert!(html.contains("id=\"p_0\""));
        assert!(html.contains("data-tm=\"0\""));
        assert!(html.contains("txt_line"));
        // The player script is inlined, not referenced.
        assert!(html.contains("addEventListener"));
        assert!(!html.contains("{script}"));
        assert!(!html.contains("{body}"));
    }

    #[test]
    fn test_write_export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_transcript();

        let path = write_export(dir.path(), "talk.mp3", ExportKind::Segments, &state)
            .unwrap()
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "talk.mp3_segments.json");

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed = parse_segments_json(&raw).unwrap();
        assert_eq!(parsed, state.segments);

        // Nothing of a kind -> no file.
        let empty = SessionState::new();
        assert!(write_export(dir.path(), "x", ExportKind::Text, &empty)
            .unwrap()
            .is_none());
    }
}
