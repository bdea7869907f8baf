//! Embedded-document engine for the AI site builder preview.
//!
//! This crate owns everything that happens to a project's generated HTML
//! between the store and the iframe: injecting the instrumentation block for
//! editable previews, stripping it back out before export, and applying
//! bridge messages to a parsed document exactly the way the injected script
//! does inside a live iframe. The engine is the reference implementation of
//! the script's semantics, so host and embedded behavior can be driven
//! end-to-end in native tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`html`] | Lenient HTML parse → tree → mutate → serialize |
//! | [`inject`] | Pure-text instrumentation injection |
//! | [`instrument`] | Instrumentation asset and strip-before-export |
//! | [`engine`] | [`engine::PreviewEngine`], the embedded-side state machine |

pub mod engine;
pub mod html;
pub mod inject;
pub mod instrument;
