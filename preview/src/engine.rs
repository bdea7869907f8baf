//! Embedded-document engine: the instrumentation script's semantics, native.
//!
//! DESIGN
//! ======
//! The injected script is a browser asset and cannot run in native tests, so
//! [`PreviewEngine`] reimplements its behavior over the [`crate::html`] tree:
//! marking clicked elements, producing the outbound descriptor message,
//! applying inbound edits, and stripping instrumentation on export. Host
//! code drives the same engine in tests to exercise both sides of the bridge
//! end-to-end. Edits to stale locators are silent no-ops, matching the
//! best-effort contract of the bridge.

use bridge::{ElementLocator, Message, SelectedElement, SELECTED_ATTR, SELECTED_CLASS};

use crate::html::{self, Document};
use crate::inject::inject;
use crate::instrument::{self, SELECTION_OUTLINE};

/// Error returned by [`PreviewEngine::apply`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The message is addressed to the host, not the embedded document.
    #[error("message {0} is host-bound and cannot be applied to the preview")]
    HostBound(&'static str),
}

/// The embedded side of the preview bridge, owning at most one parsed
/// document at a time.
pub struct PreviewEngine {
    doc: Option<Document>,
    marked: Option<ElementLocator>,
}

impl PreviewEngine {
    /// Create an engine with no document loaded.
    #[must_use]
    pub fn new() -> Self {
        Self { doc: None, marked: None }
    }

    /// Whether a document is currently loaded.
    #[must_use]
    pub fn has_document(&self) -> bool {
        self.doc.is_some()
    }

    /// Rebuild the document from project code. Empty or absent code unloads
    /// the document entirely. Any selection marking belongs to the previous
    /// document and is discarded.
    pub fn set_code(&mut self, code: &str, editor_enabled: bool) {
        self.marked = None;
        if code.is_empty() {
            self.doc = None;
            return;
        }
        self.doc = Some(html::parse(&inject(code, editor_enabled)));
    }

    /// Simulate the instrumented click handler: mark the located element,
    /// unmark any previous one, and return the outbound `ELEMENT_SELECTED`
    /// message. Returns `None` when no document is loaded or the locator
    /// does not resolve.
    pub fn click(&mut self, locator: &ElementLocator) -> Option<Message> {
        let doc = self.doc.as_mut()?;
        // Descriptor reflects the element as it was before marking.
        let descriptor = {
            let el = doc.resolve(locator)?;
            SelectedElement {
                locator: locator.clone(),
                tag: el.tag.clone(),
                text: el.text_content(),
                styles: el.style_props().into_iter().collect(),
            }
        };

        if let Some(previous) = self.marked.take() {
            if let Some(el) = doc.resolve_mut(&previous) {
                unmark(el);
            }
        }

        let el = doc.resolve_mut(locator)?;
        el.add_class(SELECTED_CLASS);
        el.set_bare_attr(SELECTED_ATTR);
        el.set_style_prop("outline", SELECTION_OUTLINE);
        self.marked = Some(locator.clone());

        Some(Message::ElementSelected(descriptor))
    }

    /// Simulate the user clearing the selection inside the preview. Returns
    /// the outbound `CLEAR_SELECTION` message; clearing with nothing marked
    /// still reports clear, exactly as the script does.
    pub fn clear(&mut self) -> Message {
        self.unmark_current();
        Message::ClearSelection
    }

    /// Handle a host → embedded message.
    ///
    /// `UPDATE_ELEMENT` applies text and style changes in place; a locator
    /// that no longer resolves is silently ignored. `CLEAR_SELECTION_REQUEST`
    /// drops the visual marking.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::HostBound`] for the two embedded → host
    /// variants, which have no meaning here.
    pub fn apply(&mut self, message: &Message) -> Result<(), EngineError> {
        match message {
            Message::UpdateElement(edit) => {
                let Some(doc) = self.doc.as_mut() else {
                    return Ok(());
                };
                let Some(el) = doc.resolve_mut(&edit.locator) else {
                    return Ok(());
                };
                if let Some(text) = &edit.text {
                    el.set_text(text);
                }
                for (property, value) in &edit.styles {
                    el.set_style_prop(property, value);
                }
                Ok(())
            }
            Message::ClearSelectionRequest => {
                self.unmark_current();
                Ok(())
            }
            Message::ElementSelected(_) | Message::ClearSelection => {
                Err(EngineError::HostBound(message.tag()))
            }
        }
    }

    /// Export the document as a static artifact: strip all instrumentation,
    /// then serialize. Returns `None` when no document is loaded.
    #[must_use]
    pub fn export(&self) -> Option<String> {
        let mut doc = self.doc.clone()?;
        instrument::strip(&mut doc);
        Some(doc.serialize())
    }

    fn unmark_current(&mut self) {
        let Some(locator) = self.marked.take() else {
            return;
        };
        if let Some(doc) = self.doc.as_mut() {
            if let Some(el) = doc.resolve_mut(&locator) {
                unmark(el);
            }
        }
    }
}

impl Default for PreviewEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn unmark(el: &mut html::Element) {
    el.remove_class(SELECTED_CLASS);
    el.remove_attr(SELECTED_ATTR);
    el.remove_style_prop("outline");
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
