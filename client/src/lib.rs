//! # client
//!
//! Leptos + WASM frontend for the AI site builder.
//!
//! This crate contains pages, components, application state, network types,
//! and the cross-frame selection bridge. The live preview is rendered inside
//! a sandboxed `<iframe>` whose document is instrumented by the `preview`
//! crate; `PreviewHost` is the component that owns that frame and speaks the
//! `bridge` message protocol with it.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Hydration entry point; called from the generated JS shim in the browser.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
