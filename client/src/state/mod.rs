//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `project`, `selection`, `ui`) so
//! individual components can depend on small focused models. Each struct is
//! plain data held in an `RwSignal` provided via context from `App`.

pub mod auth;
pub mod project;
pub mod selection;
pub mod ui;
