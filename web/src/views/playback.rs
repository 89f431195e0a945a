use dioxus::prelude::*;
use scriba_core::SessionState;
use ui::PlaybackView;

#[component]
pub fn Playback() -> Element {
    let session = use_context::<Signal<SessionState>>();

    rsx! {
        PlaybackView { session }
    }
}
