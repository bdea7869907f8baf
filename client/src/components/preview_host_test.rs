use bridge::{PREVIEW_SCRIPT_ID, PREVIEW_STYLE_ID};

use super::{fold_frame_message, srcdoc_for};
use crate::state::selection::SelectionState;

const PAGE: &str = "<html><body><h1 id=\"hero\">Old</h1></body></html>";

// ===== SRCDOC =====

#[test]
fn srcdoc_none_while_generating() {
    assert!(srcdoc_for(None, true).is_none());
    assert!(srcdoc_for(None, false).is_none());
}

#[test]
fn srcdoc_instruments_when_editor_enabled() {
    let doc = srcdoc_for(Some(PAGE), true).expect("code should produce a document");
    assert!(doc.contains(PREVIEW_STYLE_ID));
    assert!(doc.contains(PREVIEW_SCRIPT_ID));
}

#[test]
fn srcdoc_is_identity_when_editor_disabled() {
    let doc = srcdoc_for(Some(PAGE), false).expect("code should produce a document");
    assert_eq!(doc, PAGE);
}

// ===== MESSAGE FOLDING =====

#[test]
fn fold_accepts_element_selected() {
    let mut selection = SelectionState::default();
    let json = r##"{"type": "ELEMENT_SELECTED", "payload": {"locator": "#hero", "tag": "h1", "text": "Old"}}"##;
    assert!(fold_frame_message(json, &mut selection));
    let current = selection.current.expect("selection should be present");
    assert_eq!(current.tag, "h1");
}

#[test]
fn fold_accepts_clear_selection() {
    let mut selection = SelectionState::default();
    let select = r##"{"type": "ELEMENT_SELECTED", "payload": {"locator": "#hero", "tag": "h1", "text": "Old"}}"##;
    assert!(fold_frame_message(select, &mut selection));
    assert!(fold_frame_message(r#"{"type": "CLEAR_SELECTION"}"#, &mut selection));
    assert!(selection.current.is_none());
}

#[test]
fn fold_rejects_foreign_window_traffic() {
    let mut selection = SelectionState::default();
    assert!(!fold_frame_message("not json", &mut selection));
    assert!(!fold_frame_message(r#"{"source": "react-devtools"}"#, &mut selection));
    assert!(!fold_frame_message(r#"{"type": "SOMETHING_ELSE"}"#, &mut selection));
    assert!(selection.current.is_none());
}

#[test]
fn fold_ignores_embedded_bound_echoes() {
    let mut selection = SelectionState::default();
    let json = r##"{"type": "UPDATE_ELEMENT", "payload": {"locator": "#hero", "text": "New"}}"##;
    assert!(!fold_frame_message(json, &mut selection));
}
