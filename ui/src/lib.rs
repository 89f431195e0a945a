//! Shared UI components for the transcription studio.

mod gate;
mod hero;
mod playback;
mod transcript;
mod upload;

pub use gate::GateView;
pub use hero::Hero;
pub use playback::PlaybackView;
pub use transcript::TranscriptView;
pub use upload::UploadView;
