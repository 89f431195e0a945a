use dioxus::prelude::*;

const HERO_CSS: Asset = asset!("/assets/styling/hero.css");

#[component]
pub fn Hero() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: HERO_CSS }

        div {
            id: "hero",
            div {
                style: "text-align: center; padding: 2rem 0;",
                h1 {
                    style: "font-size: 2.4rem; margin-bottom: 1rem; color: #333;",
                    "🎙 Scriba - Transcription Studio"
                }
                p {
                    style: "font-size: 1.1rem; color: #666; margin-bottom: 1rem;",
                    "Upload audio, export timed transcripts, sync them to video"
                }
            }
        }
    }
}
