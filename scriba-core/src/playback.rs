//! Playback sync: video URL recognition and the synchronized page

use crate::render::{escape_text, render_segment_lines, LineStyle};
use crate::transcription::TranscriptSegment;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Whole-URL whitelist: only the two YouTube hosts, nothing fancy in the path.
static URL_WHITELIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.youtube\.com|youtu\.be)/[a-zA-Z0-9_.+=,#/?&%-]+$")
        .expect("whitelist pattern is valid")
});

static EMBED_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^/]+/embed/([a-zA-Z0-9_.-]+)").expect("embed pattern is valid")
});

static WATCH_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^?]+.*?[?&]v=([a-zA-Z0-9_.-]+)").expect("watch pattern is valid")
});

const PLAYBACK_TEMPLATE: &str = include_str!("../assets/playback_template.html");

/// An extracted YouTube video id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Embed URL seeked to `start_secs`. The player is remounted rather than
    /// seeked in place, so the offset rides in the URL.
    pub fn embed_url(&self, start_secs: u64) -> String {
        format!("https://www.youtube.com/embed/{}?start={}", self.0, start_secs)
    }
}

/// Recognize a YouTube watch/embed URL. Anything off the host whitelist or
/// in neither shape yields `None` and the playback pane is simply omitted.
pub fn parse_video_url(url: &str) -> Option<VideoId> {
    let url = url.trim();
    if !URL_WHITELIST.is_match(url) {
        return None;
    }
    EMBED_FORM
        .captures(url)
        .or_else(|| WATCH_FORM.captures(url))
        .map(|caps| VideoId(caps[1].to_string()))
}

/// Standalone two-column playback page: clickable segment list on the left,
/// embedded player on the right.
pub fn playback_document(
    title: &str,
    segments: &[TranscriptSegment],
    video: &VideoId,
    start_secs: u64,
) -> String {
    let lines = render_segment_lines(segments, LineStyle::Playback);
    let body = lines
        .iter()
        .map(|line| {
            format!(
                "<div class=\"line\">{}<a href=\"#\" class=\"jump\" id=\"clck_{}\" data-tm=\"{}\">-&gt;</a></div>",
                line.html, line.id, line.start_secs
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    // Body goes in last: segment text must never hit a placeholder slot.
    PLAYBACK_TEMPLATE
        .replace("{embed_url}", &video.embed_url(start_secs))
        .replace("{title}", &escape_text(title))
        .replace("{body}", &body)
}
