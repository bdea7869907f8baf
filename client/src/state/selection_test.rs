use std::collections::BTreeMap;

use bridge::{ElementEdit, ElementLocator, Message, SelectedElement};

use super::SelectionState;

fn element(tag: &str, text: &str) -> SelectedElement {
    SelectedElement {
        locator: ElementLocator::Id(format!("{tag}-el")),
        tag: tag.to_owned(),
        text: text.to_owned(),
        styles: BTreeMap::new(),
    }
}

#[test]
fn default_has_no_selection() {
    assert!(SelectionState::default().current.is_none());
}

#[test]
fn select_is_last_write_wins() {
    let mut state = SelectionState::default();
    state.select(element("h1", "Title"));
    state.select(element("p", "Lead"));
    let current = state.current.expect("selection should be present");
    assert_eq!(current.tag, "p");
}

#[test]
fn clear_is_idempotent() {
    let mut state = SelectionState::default();
    state.clear();
    assert!(state.current.is_none());
    state.select(element("h1", "Title"));
    state.clear();
    state.clear();
    assert!(state.current.is_none());
}

#[test]
fn apply_folds_host_bound_messages() {
    let mut state = SelectionState::default();
    assert!(state.apply(&Message::ElementSelected(element("h1", "Title"))));
    assert!(state.current.is_some());
    assert!(state.apply(&Message::ClearSelection));
    assert!(state.current.is_none());
}

#[test]
fn apply_ignores_embedded_bound_messages() {
    let mut state = SelectionState::default();
    state.select(element("h1", "Title"));
    assert!(!state.apply(&Message::UpdateElement(ElementEdit {
        locator: ElementLocator::Id("h1-el".to_owned()),
        text: Some("New".to_owned()),
        styles: BTreeMap::new(),
    })));
    assert!(!state.apply(&Message::ClearSelectionRequest));
    assert!(state.current.is_some(), "embedded-bound traffic must not touch the selection");
}

#[test]
fn rebuild_invalidates_the_selection() {
    let mut state = SelectionState::default();
    state.select(element("h1", "Title"));
    assert!(state.sync_rebuild(1));
    assert!(state.current.is_none());
}

#[test]
fn sync_rebuild_is_a_no_op_for_the_same_generation() {
    let mut state = SelectionState::default();
    assert!(state.sync_rebuild(1));
    state.select(element("h1", "Title"));
    assert!(!state.sync_rebuild(1));
    assert!(state.current.is_some());
}
