mod home;
pub use home::Home;

mod playback;
pub use playback::Playback;
