#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state for the editor chrome: sidebar and device preset.
#[derive(Clone, Debug)]
pub struct UiState {
    pub sidebar_expanded: bool,
    pub device: Device,
}

impl Default for UiState {
    fn default() -> Self {
        Self { sidebar_expanded: true, device: Device::Desktop }
    }
}

/// Viewport presets for the preview frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Device {
    Phone,
    Tablet,
    #[default]
    Desktop,
}

impl Device {
    /// CSS width for the preview frame, or `None` for full width.
    #[must_use]
    pub fn frame_width(self) -> Option<&'static str> {
        match self {
            Self::Phone => Some("412px"),
            Self::Tablet => Some("768px"),
            Self::Desktop => None,
        }
    }

    /// Label shown on the device toolbar.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::Tablet => "Tablet",
            Self::Desktop => "Desktop",
        }
    }
}
