use dioxus::prelude::*;
use scriba_core::SessionState;

use views::{Home, Playback};

mod views;

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
        #[route("/")]
        Home {},
        #[route("/playback")]
        Playback {},
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // One session per connected browser tab.
    use_context_provider(|| Signal::new(SessionState::new()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

/// The original tool's two tabs, as routes.
#[component]
fn Navbar() -> Element {
    rsx! {
        div {
            id: "navbar",
            Link { to: Route::Home {}, "Audio processing" }
            Link { to: Route::Playback {}, "Presentation" }
        }
        Outlet::<Route> {}
    }
}
