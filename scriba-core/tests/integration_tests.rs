//! Integration tests for scriba-core

use pretty_assertions::assert_eq;
use rstest::rstest;
use scriba_core::export::{filter_segment_fields, parse_segments_json, ExportKind};
use scriba_core::*;

fn sample_transcript() -> Transcript {
    serde_json::from_str(
        r#"{
            "text": "dzień dobry państwu",
            "words": [
                {"word": "dzień", "start": 0.0, "end": 0.5},
                {"word": "dobry", "start": 0.5, "end": 1.0}
            ],
            "segments": [
                {"id": 0, "seek": 0, "start": 0.0, "end": 2.2, "text": "dzień dobry"},
                {"id": 1, "seek": 220, "start": 2.2, "end": 4.0, "text": "państwu"}
            ]
        }"#,
    )
    .unwrap()
}

#[rstest]
#[case(0, "0:00")]
#[case(59, "0:59")]
#[case(60, "1:00")]
#[case(3600, "1:00:00")]
#[case(3661, "1:01:01")]
fn test_clock_formatting(#[case] secs: u64, #[case] expected: &str) {
    assert_eq!(format_clock(secs), expected);
}

/// Byte-identical re-upload must not trigger a second transcription call.
/// The duplicate check fires before the client is even constructed, so this
/// runs without credentials or network.
#[tokio::test]
async fn test_identical_bytes_never_reinvoke_the_service() {
    let audio = b"fake mp3 payload".to_vec();
    let hash = content_hash(&audio);

    let mut session = SessionState::new();
    session.store_transcript(hash, "talk.mp3", sample_transcript());

    let config = AppConfig::default();
    let invoked = process_upload(&mut session, audio, "talk.mp3", false, &config)
        .await
        .unwrap();
    assert!(!invoked);
    assert_eq!(session.uploaded_filename, "talk.mp3");
}

#[tokio::test]
async fn test_locked_session_is_denied_before_any_call() {
    let mut session = SessionState::new();
    let config = AppConfig::default();
    let err = process_upload(&mut session, b"new bytes".to_vec(), "talk.mp3", false, &config)
        .await
        .unwrap_err();
    assert!(matches!(err, ScribaError::AccessDenied(_)));
}

#[tokio::test]
async fn test_oversize_upload_is_rejected_before_processing() {
    let mut session = SessionState::new();
    session.unlock_with("sk-test");
    let config = AppConfig::default().with_max_upload_bytes(8);

    let err = process_upload(&mut session, vec![0u8; 9], "talk.mp3", false, &config)
        .await
        .unwrap_err();
    assert_eq!(err, ScribaError::UploadTooLarge { size: 9, limit: 8 });
    assert!(!session.has_transcript());
}

#[tokio::test]
async fn test_non_mp3_upload_is_rejected() {
    let mut session = SessionState::new();
    session.unlock_with("sk-test");
    let config = AppConfig::default();

    let err = process_upload(&mut session, b"riff".to_vec(), "talk.wav", false, &config)
        .await
        .unwrap_err();
    assert!(matches!(err, ScribaError::Unsupported(_)));
}

#[rstest]
#[case("https://www.youtube.com/watch?v=abc123", Some("abc123"))]
#[case("https://youtu.be/embed/abc123", Some("abc123"))]
#[case("https://vimeo.com/123", None)]
fn test_video_url_recognition(#[case] url: &str, #[case] expected: Option<&str>) {
    assert_eq!(
        parse_video_url(url).as_ref().map(|v| v.as_str()),
        expected
    );
}

/// Segment ids are dense, 0-based and stable no matter how many times the
/// renderer runs over the same stored list.
#[test]
fn test_segment_ids_are_stable_across_renders() {
    let mut session = SessionState::new();
    session.store_transcript("h", "talk.mp3", sample_transcript());

    for _ in 0..3 {
        let lines = render_segment_lines(&session.segments, LineStyle::Transcript);
        let ids: Vec<usize> = lines.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert!(lines[0].html.contains("id=\"p_0\""));
        assert!(lines[1].html.contains("id=\"p_1\""));
    }
}

#[test]
fn test_reset_allows_reselecting_a_rejected_file() {
    let mut session = SessionState::new();
    session.store_transcript("h", "talk.mp3", sample_transcript());

    let before = session.upload_slot_key();
    session.reset();

    assert!(session.text.is_empty());
    assert!(session.words.is_empty());
    assert!(session.segments.is_empty());
    assert_ne!(session.upload_slot_key(), before);
}

#[test]
fn test_exported_segments_keep_only_whitelisted_fields() {
    let richer = serde_json::json!([{
        "id": 0,
        "seek": 0,
        "start": 0.0,
        "end": 1.5,
        "text": "hej",
        "tokens": [50364],
        "no_speech_prob": 0.01
    }]);
    let filtered = filter_segment_fields(richer);
    let keys: Vec<&str> = filtered[0]
        .as_object()
        .unwrap()
        .keys()
        .map(|k| k.as_str())
        .collect();
    for key in ["id", "seek", "start", "end", "text"] {
        assert!(keys.contains(&key));
    }
    assert!(!keys.contains(&"tokens"));
    assert!(!keys.contains(&"no_speech_prob"));
}

/// Full export round trip into a temp dir, exercising naming and payloads.
#[test]
fn test_export_files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = SessionState::new();
    session.store_transcript("h", "talk.mp3", sample_transcript());

    for kind in [
        ExportKind::Text,
        ExportKind::Words,
        ExportKind::Segments,
        ExportKind::Html,
    ] {
        let path = scriba_core::export::write_export(dir.path(), "talk.mp3", kind, &session)
            .unwrap()
            .unwrap();
        assert!(path.exists(), "missing export for {}", kind);
    }

    let segments_raw =
        std::fs::read_to_string(dir.path().join("talk.mp3_segments.json")).unwrap();
    let reloaded = parse_segments_json(&segments_raw).unwrap();
    assert_eq!(reloaded, session.segments);

    let html = std::fs::read_to_string(dir.path().join("talk.mp3.html")).unwrap();
    assert!(html.contains("data-tm=\"2\""));
    assert!(html.contains("państwu"));
}

/// Words parsed from the API carry dense ids and the text alias.
#[test]
fn test_word_timestamps_are_normalized() {
    let mut transcript = sample_transcript();
    transcript.normalize_ids();
    assert_eq!(transcript.words[0].id, 0);
    assert_eq!(transcript.words[1].id, 1);
    assert_eq!(transcript.words[0].text, "dzień");
}
