//! Top-level route views.

pub mod home;
pub mod login;
pub mod preview;
pub mod project;
