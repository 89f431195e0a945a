//! Segment-to-HTML rendering and timestamp formatting

use crate::transcription::TranscriptSegment;
use serde::{Deserialize, Serialize};

/// Format whole seconds as `H:MM:SS`, trimming zero-valued leading
/// components down to a minimum of `M:SS`.
///
/// `0 -> "0:00"`, `61 -> "1:01"`, `3661 -> "1:01:01"`.
pub fn format_clock(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Escape text for interpolation into HTML content or attribute values.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Fragment shape for a rendered segment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Anchored paragraph with a visible `(start - end)` timestamp span,
    /// as embedded in the exported transcript document
    Transcript,

    /// Tooltip-only paragraph for the playback column
    Playback,
}

/// One rendered segment: the positional id and integer start second travel
/// with the fragment for click-to-seek lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentLine {
    pub id: usize,
    pub start_secs: u64,
    pub html: String,
}

/// Render one segment into an HTML fragment. Text and derived attribute
/// values are escaped; ids and times are numeric.
pub fn render_segment(segment: &TranscriptSegment, nr: usize, style: LineStyle) -> SegmentLine {
    let start_secs = segment.start.max(0.0) as u64;
    let start = format_clock(start_secs);
    let end = format_clock(segment.end.max(0.0) as u64);
    let text = escape_text(segment.text.trim());

    let html = match style {
        LineStyle::Transcript => format!(
            "<p id=\"p_{nr}\" title=\"start: {start}, end: {end}\" class=\"txt_line\">\
             <span class=\"timestamp\" data-tm=\"{start_secs}\">({start} - {end})</span>\n{text}\n</p>"
        ),
        LineStyle::Playback => {
            format!("<p title=\"start: {start}, end: {end}\">{text}</p>")
        }
    };

    SegmentLine {
        id: nr,
        start_secs,
        html,
    }
}

/// Render every segment. Ids are assigned by position, so rendering the same
/// stored list twice yields identical lines.
pub fn render_segment_lines(segments: &[TranscriptSegment], style: LineStyle) -> Vec<SegmentLine> {
    segments
        .iter()
        .enumerate()
        .map(|(nr, segment)| render_segment(segment, nr, style))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0:00")]
    #[case(59, "0:59")]
    #[case(60, "1:00")]
    #[case(61, "1:01")]
    #[case(3600, "1:00:00")]
    #[case(3661, "1:01:01")]
    #[case(36061, "10:01:01")]
    fn test_format_clock(#[case] secs: u64, #[case] expected: &str) {
        assert_eq!(format_clock(secs), expected);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_text("plain"), "plain");
    }

    fn segment(start: f64, end: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            id: 0,
            seek: 0,
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_transcript_line_shape() {
        let line = render_segment(&segment(61.2, 64.9, " dzień dobry "), 3, LineStyle::Transcript);
        assert_eq!(line.id, 3);
        assert_eq!(line.start_secs, 61);
        assert_eq!(
            line.html,
            "<p id=\"p_3\" title=\"start: 1:01, end: 1:04\" class=\"txt_line\">\
             <span class=\"timestamp\" data-tm=\"61\">(1:01 - 1:04)</span>\ndzień dobry\n</p>"
        );
    }

    #[test]
    fn test_playback_line_escapes_user_text() {
        let line = render_segment(&segment(0.0, 1.0, "<script>hi</script>"), 0, LineStyle::Playback);
        assert!(!line.html.contains("<script>"));
        assert!(line.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_is_stable_across_invocations() {
        let segments = vec![segment(0.0, 1.0, "a"), segment(1.0, 2.0, "b")];
        let first = render_segment_lines(&segments, LineStyle::Transcript);
        let second = render_segment_lines(&segments, LineStyle::Transcript);
        assert_eq!(first, second);
        assert_eq!(first[0].id, 0);
        assert_eq!(first[1].id, 1);
    }
}
