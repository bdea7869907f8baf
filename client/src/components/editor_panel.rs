//! Editor panel for the selected preview element.
//!
//! Reads the selection state owned by the project page. Edits are sparse:
//! only fields the user actually changed ride in the `UPDATE_ELEMENT`
//! payload, so untouched inline styles survive on the embedded side.

#[cfg(test)]
#[path = "editor_panel_test.rs"]
mod editor_panel_test;

use std::collections::BTreeMap;

use bridge::{ElementEdit, Message, SelectedElement};
use leptos::prelude::*;

use crate::app::FrameSender;
use crate::state::selection::SelectionState;

/// Style properties the panel exposes.
const EDITABLE_STYLES: [(&str, &str); 3] = [
    ("color", "Text color"),
    ("background-color", "Background"),
    ("font-size", "Font size"),
];

/// Build the sparse edit for one apply action.
///
/// `text` is included only when it differs from the element's current text;
/// style entries are included only when non-empty and changed.
fn build_edit(
    selected: &SelectedElement,
    text: &str,
    styles: &BTreeMap<String, String>,
) -> ElementEdit {
    let mut edit = ElementEdit {
        locator: selected.locator.clone(),
        text: None,
        styles: BTreeMap::new(),
    };
    if text != selected.text {
        edit.text = Some(text.to_owned());
    }
    for (prop, value) in styles {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if selected.styles.get(prop).map(String::as_str) != Some(value) {
            edit.styles.insert(prop.clone(), value.to_owned());
        }
    }
    edit
}

/// Whether an edit would change anything on the embedded side.
fn is_noop(edit: &ElementEdit) -> bool {
    edit.text.is_none() && edit.styles.is_empty()
}

/// Editor panel showing the selected element and its editable fields.
#[component]
pub fn EditorPanel() -> impl IntoView {
    let selection = expect_context::<RwSignal<SelectionState>>();
    let sender = expect_context::<RwSignal<FrameSender>>();

    view! {
        <div class="editor-panel">
            {move || {
                if let Some(selected) = selection.get().current {
                    render_editor(selected, selection, sender).into_any()
                } else {
                    view! {
                        <p class="editor-panel__empty">
                            "Click an element in the preview to edit it."
                        </p>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

fn render_editor(
    selected: SelectedElement,
    selection: RwSignal<SelectionState>,
    sender: RwSignal<FrameSender>,
) -> impl IntoView {
    let text_input = RwSignal::new(selected.text.clone());
    let style_inputs: Vec<(&'static str, &'static str, RwSignal<String>)> = EDITABLE_STYLES
        .into_iter()
        .map(|(prop, label)| {
            let value = selected.styles.get(prop).cloned().unwrap_or_default();
            (prop, label, RwSignal::new(value))
        })
        .collect();

    let on_apply = {
        let selected = selected.clone();
        let style_inputs = style_inputs.clone();
        move |_| {
            let styles: BTreeMap<String, String> = style_inputs
                .iter()
                .map(|(prop, _, value)| ((*prop).to_owned(), value.get()))
                .collect();
            let edit = build_edit(&selected, &text_input.get(), &styles);
            if is_noop(&edit) {
                return;
            }
            sender.get().send(&Message::UpdateElement(edit));
        }
    };

    let on_close = move |_| {
        sender.get().send(&Message::ClearSelectionRequest);
        selection.update(SelectionState::clear);
    };

    view! {
        <div class="editor-panel__card">
            <header class="editor-panel__header">
                <h3 class="editor-panel__tag">{selected.tag.clone()}</h3>
                <button class="btn btn--ghost" on:click=on_close>
                    "Close"
                </button>
            </header>

            <label class="editor-panel__field">
                <span>"Text"</span>
                <textarea
                    prop:value=move || text_input.get()
                    on:input=move |ev| text_input.set(event_target_value(&ev))
                ></textarea>
            </label>

            {style_inputs
                .iter()
                .map(|(_, label, value)| {
                    let value = *value;
                    view! {
                        <label class="editor-panel__field">
                            <span>{*label}</span>
                            <input
                                type="text"
                                prop:value=move || value.get()
                                on:input=move |ev| value.set(event_target_value(&ev))
                            />
                        </label>
                    }
                })
                .collect::<Vec<_>>()}

            <button class="btn btn--primary" on:click=on_apply>
                "Apply"
            </button>
        </div>
    }
}
