use dioxus::prelude::*;
use scriba_core::export::parse_segments_json;
use scriba_core::{parse_video_url, render_segment_lines, LineStyle, SegmentLine, SessionState};

/// Presentation view: segment list with jump affordances on the left, the
/// embedded player (remounted at the stored offset) on the right.
#[component]
pub fn PlaybackView(mut session: Signal<SessionState>) -> Element {
    let mut url = use_signal(String::new);
    let mut import_error = use_signal(|| Option::<String>::None);

    // Without segments there is nothing to sync; offer the JSON import.
    if session.read().segments.is_empty() {
        let on_json = move |evt: FormEvent| {
            let mut session = session.clone();
            spawn(async move {
                let Some(file_engine) = evt.files() else {
                    return;
                };
                let Some(file_name) = file_engine.files().into_iter().next() else {
                    return;
                };
                let Some(bytes) = file_engine.read_file(&file_name).await else {
                    return;
                };
                let raw = String::from_utf8_lossy(&bytes);
                match parse_segments_json(&raw) {
                    Ok(segments) => {
                        import_error.set(None);
                        session.write().load_segments(segments);
                    }
                    Err(e) => import_error.set(Some(format!("Invalid segments JSON: {}", e))),
                }
            });
        };

        return rsx! {
            div {
                style: "max-width: 40rem; margin: 1rem auto;",
                h3 { "Load a *_segments.json export" }
                input {
                    r#type: "file",
                    accept: ".json",
                    onchange: on_json,
                }
                if let Some(ref message) = import_error() {
                    p { style: "color: #721c24;", "{message}" }
                }
            }
        };
    }

    let state = session.read();
    let video = parse_video_url(&url());
    let player_src = video.as_ref().map(|v| v.embed_url(state.video_offset));
    // Remint the jump widgets whenever a click lands, like the original's
    // per-click widget keys.
    let clicked = state.clicked;
    let lines: Vec<(String, SegmentLine)> = render_segment_lines(&state.segments, LineStyle::Playback)
        .into_iter()
        .map(|line| (format!("goto_{}_{}", clicked, line.id), line))
        .collect();
    drop(state);

    rsx! {
        div {
            id: "playback-panel",
            style: "margin: 1rem;",

            input {
                style: "width: 100%; padding: 0.5rem; margin-bottom: 1rem;",
                placeholder: "YouTube video URL (watch or embed form)",
                value: "{url}",
                oninput: move |evt| {
                    url.set(evt.value());
                    session.write().set_video_offset(0);
                },
            }

            div {
                style: "display: flex; gap: 1.5rem;",

                div {
                    style: "flex: 1; max-height: 70vh; overflow-y: auto;",
                    for (line_key, line) in lines.into_iter() {
                        PlaybackLine {
                            key: "{line_key}",
                            session,
                            line,
                            jumpable: player_src.is_some(),
                        }
                    }
                }

                div {
                    style: "flex: 1;",
                    if let Some(ref src) = player_src {
                        iframe {
                            key: "{src}",
                            src: "{src}",
                            style: "width: 100%; aspect-ratio: 16 / 9; border: 0;",
                            allow: "autoplay; encrypted-media",
                        }
                    }
                }
            }
        }
    }
}

/// One playback row: the rendered fragment plus its jump affordance.
#[component]
fn PlaybackLine(mut session: Signal<SessionState>, line: SegmentLine, jumpable: bool) -> Element {
    let jump_line = line.clone();
    let jump = move |evt: MouseEvent| {
        evt.prevent_default();
        session.write().jump_to(&jump_line);
    };

    rsx! {
        div {
            class: "line",
            style: "display: flex; justify-content: space-between; gap: 0.5rem;",
            div { dangerous_inner_html: "{line.html}" }
            if jumpable {
                a {
                    href: "#",
                    style: "color: #007bff; text-decoration: none; white-space: nowrap;",
                    onclick: jump,
                    "->"
                }
            }
        }
    }
}
