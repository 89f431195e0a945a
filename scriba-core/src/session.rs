//! Per-user session state

use crate::render::SegmentLine;
use crate::transcription::{Transcript, TranscriptSegment, TranscriptWord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything one browser session (or one CLI run) carries between
/// interactions. Handlers mutate it explicitly; views are pure projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// API key released by the credential gate
    pub api_key: Option<String>,

    /// Upload-slot key; advancing it discards the currently selected file
    pub file_key: u64,

    /// Content hash of the last processed upload
    pub file_hash: Option<String>,

    /// Name of the last processed upload
    pub uploaded_filename: String,

    /// Plain transcript text
    pub text: String,

    /// Word intervals
    pub words: Vec<TranscriptWord>,

    /// Phrase intervals
    pub segments: Vec<TranscriptSegment>,

    /// Player offset in seconds for the playback view
    pub video_offset: u64,

    /// Click counter; advancing it remints the per-line jump widgets
    pub clicked: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            api_key: None,
            file_key: 1,
            file_hash: None,
            uploaded_filename: String::new(),
            text: String::new(),
            words: Vec::new(),
            segments: Vec::new(),
            video_offset: 0,
            clicked: 1,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self) -> bool {
        self.api_key.is_some()
    }

    /// Store the API key released by the credential gate.
    pub fn unlock_with(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    /// True when the transcript was produced from these exact bytes already.
    /// Identical uploads never re-invoke the external service.
    pub fn needs_transcription(&self, hash: &str) -> bool {
        self.file_hash.as_deref() != Some(hash)
    }

    /// Record a finished transcription for the given upload.
    pub fn store_transcript(
        &mut self,
        hash: impl Into<String>,
        file_name: impl Into<String>,
        mut transcript: Transcript,
    ) {
        transcript.normalize_ids();
        self.file_hash = Some(hash.into());
        self.uploaded_filename = file_name.into();
        self.text = transcript.text;
        self.words = transcript.words;
        self.segments = transcript.segments;
    }

    /// Adopt externally supplied segments (the presentation view's JSON
    /// import). Ids are renumbered to keep anchors dense.
    pub fn load_segments(&mut self, mut segments: Vec<TranscriptSegment>) {
        for (nr, segment) in segments.iter_mut().enumerate() {
            segment.id = nr;
        }
        self.segments = segments;
    }

    pub fn has_transcript(&self) -> bool {
        !self.text.is_empty() || !self.words.is_empty() || !self.segments.is_empty()
    }

    /// Clear the transcript and advance the upload slot so another file can
    /// be selected.
    pub fn reset(&mut self) {
        debug!("resetting session");
        self.file_key += 1;
        self.file_hash = None;
        self.uploaded_filename.clear();
        self.text.clear();
        self.words.clear();
        self.segments.clear();
    }

    /// Advance the upload slot without touching stored results — used after
    /// an upload was rejected (oversize, wrong type) and acknowledged.
    pub fn reject_upload(&mut self) {
        self.file_key += 1;
    }

    /// Widget key for the upload slot; changing it discards the selection.
    pub fn upload_slot_key(&self) -> String {
        format!("k_{}", self.file_key)
    }

    pub fn set_video_offset(&mut self, offset: u64) {
        self.video_offset = offset;
    }

    /// A segment's jump affordance was clicked: remember the offset and
    /// advance the click counter so the widgets get fresh keys.
    pub fn jump_to(&mut self, line: &SegmentLine) {
        self.clicked += 1;
        self.video_offset = line.start_secs;
    }
}
