//! Preview frame host: owns the sandboxed iframe and the bridge traffic.
//!
//! The embedded document is regenerated from project code through
//! `preview::inject`, so the instrumentation the frame runs is exactly the
//! asset the native engine tests exercise. Inbound `message` events are
//! folded into the selection state only after `bridge::decode_message`
//! accepts them; anything else on the window channel is ignored.

#[cfg(test)]
#[path = "preview_host_test.rs"]
mod preview_host_test;

use leptos::prelude::*;

use crate::state::project::ProjectState;
use crate::state::selection::SelectionState;
use crate::state::ui::UiState;

/// Frame document for the current code, or `None` while generating.
fn srcdoc_for(code: Option<&str>, editor_enabled: bool) -> Option<String> {
    code.map(|code| preview::inject::inject(code, editor_enabled))
}

/// Fold one raw `message` payload into the selection state.
///
/// Returns `false` for anything that is not a valid host-bound bridge
/// message; the window message channel is shared with arbitrary senders.
fn fold_frame_message(json: &str, selection: &mut SelectionState) -> bool {
    match bridge::decode_message(json) {
        Ok(message) => selection.apply(&message),
        Err(_) => false,
    }
}

/// Preview frame host.
///
/// Renders `iframe srcdoc=inject(code, editor_enabled)` at the width of the
/// selected device preset. With the editor enabled it also attaches the
/// shared `FrameSender` and mirrors frame announcements into the selection
/// state.
#[component]
pub fn PreviewHost(editor_enabled: bool) -> impl IntoView {
    let project = expect_context::<RwSignal<ProjectState>>();
    let selection = expect_context::<RwSignal<SelectionState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let frame_ref = NodeRef::<leptos::html::Iframe>::new();

    // Attach the mounted iframe to the shared sender so the editor panel
    // can post into it.
    #[cfg(feature = "hydrate")]
    if editor_enabled {
        let sender = expect_context::<RwSignal<crate::app::FrameSender>>();
        Effect::new(move || {
            if let Some(frame) = frame_ref.get() {
                sender.set(crate::app::FrameSender::attached(frame.into()));
            }
        });
    }

    // Mirror frame announcements into the selection state.
    #[cfg(feature = "hydrate")]
    if editor_enabled {
        let handle = window_event_listener(leptos::ev::message, move |event: web_sys::MessageEvent| {
            let Ok(json) = js_sys::JSON::stringify(&event.data()) else {
                return;
            };
            let Some(json) = json.as_string() else {
                return;
            };
            selection.update(|s| {
                let _ = fold_frame_message(&json, s);
            });
        });
        on_cleanup(move || handle.remove());
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = selection;

    let srcdoc = move || srcdoc_for(project.get().code.as_deref(), editor_enabled);
    let frame_style = move || {
        ui.get()
            .device
            .frame_width()
            .map_or_else(String::new, |width| format!("width: {width};"))
    };

    view! {
        <div class="preview-host">
            {move || match srcdoc() {
                Some(doc) => {
                    view! {
                        <iframe
                            class="preview-host__frame"
                            style=frame_style()
                            sandbox="allow-scripts allow-same-origin"
                            srcdoc=doc
                            node_ref=frame_ref
                        ></iframe>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <div class="preview-host__generating">
                            <p>"Generating your site..."</p>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
