use dioxus::prelude::*;
use scriba_core::SessionState;
use ui::{GateView, Hero, TranscriptView, UploadView};

#[component]
pub fn Home() -> Element {
    let session = use_context::<Signal<SessionState>>();

    rsx! {
        Hero {}
        if session.read().is_unlocked() {
            UploadView { session }
            TranscriptView { session }
        } else {
            GateView { session }
        }
    }
}
