use super::*;

#[test]
fn default_is_expanded_desktop() {
    let state = UiState::default();
    assert!(state.sidebar_expanded);
    assert_eq!(state.device, Device::Desktop);
}

#[test]
fn device_frame_widths() {
    assert_eq!(Device::Phone.frame_width(), Some("412px"));
    assert_eq!(Device::Tablet.frame_width(), Some("768px"));
    assert_eq!(Device::Desktop.frame_width(), None);
}

#[test]
fn device_labels_are_distinct() {
    assert_ne!(Device::Phone.label(), Device::Tablet.label());
    assert_ne!(Device::Tablet.label(), Device::Desktop.label());
}
