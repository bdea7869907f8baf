use std::collections::BTreeMap;

use bridge::{ElementLocator, SelectedElement};

use super::{build_edit, is_noop};

fn selected() -> SelectedElement {
    SelectedElement {
        locator: ElementLocator::Id("hero".to_owned()),
        tag: "h1".to_owned(),
        text: "Old".to_owned(),
        styles: BTreeMap::from([("color".to_owned(), "red".to_owned())]),
    }
}

fn styles(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn unchanged_inputs_produce_a_noop() {
    let edit = build_edit(&selected(), "Old", &styles(&[("color", "red")]));
    assert!(is_noop(&edit));
}

#[test]
fn changed_text_is_included() {
    let edit = build_edit(&selected(), "New", &styles(&[]));
    assert_eq!(edit.text.as_deref(), Some("New"));
    assert!(edit.styles.is_empty());
}

#[test]
fn unchanged_text_is_omitted() {
    let edit = build_edit(&selected(), "Old", &styles(&[("color", "blue")]));
    assert!(edit.text.is_none());
    assert_eq!(edit.styles.get("color").map(String::as_str), Some("blue"));
}

#[test]
fn empty_style_values_are_skipped() {
    let edit = build_edit(&selected(), "Old", &styles(&[("font-size", "  ")]));
    assert!(is_noop(&edit));
}

#[test]
fn style_values_are_trimmed() {
    let edit = build_edit(&selected(), "Old", &styles(&[("font-size", " 2rem ")]));
    assert_eq!(edit.styles.get("font-size").map(String::as_str), Some("2rem"));
}

#[test]
fn edit_targets_the_selected_locator() {
    let edit = build_edit(&selected(), "New", &styles(&[]));
    assert_eq!(edit.locator, ElementLocator::Id("hero".to_owned()));
}
