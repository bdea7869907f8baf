//! UI components for the editor and dashboard.

pub mod editor_panel;
pub mod preview_host;
pub mod project_card;
pub mod sidebar;
pub mod toolbar;
