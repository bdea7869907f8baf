//! Instrumentation asset and strip-before-export.
//!
//! The instrumentation block is a `<style>` + `<script>` pair injected into
//! editable previews. The script runs inside the embedded document: it marks
//! clicked elements, reports them to the host over `postMessage`, and applies
//! inbound edit commands. The element ids and marker names it uses are the
//! `bridge` protocol constants — [`strip`] finds instrumentation by exactly
//! those identifiers, so export never leaks editing chrome into a user's
//! downloaded site.

use bridge::{PREVIEW_SCRIPT_ID, PREVIEW_STYLE_ID, SELECTED_ATTR, SELECTED_CLASS};

use crate::html::Document;

/// Inline outline applied to the marked element, on both sides of the bridge.
pub const SELECTION_OUTLINE: &str = "2px solid #6366f1";

/// The full instrumentation block, inserted by [`crate::inject::inject`].
///
/// Kept as a single static asset so host and embedded sides cannot drift;
/// tests assert that every reserved identifier in here matches the `bridge`
/// constants byte-for-byte.
pub const INSTRUMENTATION: &str = r##"<style id="ai-preview-style">
.ai-selected-element { cursor: pointer; }
body *:hover { outline: 1px dashed rgba(99, 102, 241, 0.5); outline-offset: 1px; }
</style><script id="ai-preview-script">
(function () {
  var SELECTED_CLASS = 'ai-selected-element';
  var SELECTED_ATTR = 'data-ai-selected';
  var OUTLINE = '2px solid #6366f1';
  var selected = null;

  function locatorFor(el) {
    if (el.id) return '#' + el.id;
    var steps = [];
    var node = el;
    while (node.parentElement) {
      steps.unshift(Array.prototype.indexOf.call(node.parentElement.children, node));
      node = node.parentElement;
    }
    return steps.join('/');
  }

  function resolveLocator(locator) {
    if (locator.charAt(0) === '#') return document.getElementById(locator.slice(1));
    var node = document.documentElement;
    var steps = locator.split('/');
    for (var i = 0; i < steps.length; i++) {
      node = node.children[parseInt(steps[i], 10)];
      if (!node) return null;
    }
    return node;
  }

  function describe(el) {
    var styles = {};
    for (var i = 0; i < el.style.length; i++) {
      var prop = el.style[i];
      styles[prop] = el.style.getPropertyValue(prop);
    }
    return {
      locator: locatorFor(el),
      tag: el.tagName.toLowerCase(),
      text: el.textContent || '',
      styles: styles
    };
  }

  function clearMarking() {
    if (!selected) return;
    selected.classList.remove(SELECTED_CLASS);
    selected.removeAttribute(SELECTED_ATTR);
    selected.style.outline = '';
    selected = null;
  }

  document.addEventListener('click', function (event) {
    event.preventDefault();
    event.stopPropagation();
    var el = event.target;
    if (el === document.documentElement || el === document.body) {
      clearMarking();
      parent.postMessage({ type: 'CLEAR_SELECTION' }, '*');
      return;
    }
    var descriptor = describe(el);
    clearMarking();
    selected = el;
    el.classList.add(SELECTED_CLASS);
    el.setAttribute(SELECTED_ATTR, '');
    el.style.outline = OUTLINE;
    parent.postMessage({ type: 'ELEMENT_SELECTED', payload: descriptor }, '*');
  }, true);

  document.addEventListener('keydown', function (event) {
    if (event.key !== 'Escape') return;
    clearMarking();
    parent.postMessage({ type: 'CLEAR_SELECTION' }, '*');
  });

  window.addEventListener('message', function (event) {
    var data = event.data || {};
    if (data.type === 'UPDATE_ELEMENT' && data.payload) {
      var el = resolveLocator(data.payload.locator);
      if (!el) return;
      if (typeof data.payload.text === 'string') el.textContent = data.payload.text;
      var styles = data.payload.styles || {};
      for (var prop in styles) {
        el.style.setProperty(prop, styles[prop]);
      }
    } else if (data.type === 'CLEAR_SELECTION_REQUEST') {
      clearMarking();
    }
  });
})();
</script>"##;

/// Remove every trace of instrumentation from a parsed document.
///
/// Drops the marker class, marker attribute, and inline outline from any
/// marked node, and removes the reserved style/script elements. Idempotent:
/// stripping an already-clean document changes nothing.
pub fn strip(doc: &mut Document) {
    doc.for_each_element_mut(&mut |el| {
        if el.has_class(SELECTED_CLASS) || el.attr(SELECTED_ATTR).is_some() {
            el.remove_class(SELECTED_CLASS);
            el.remove_attr(SELECTED_ATTR);
            el.remove_style_prop("outline");
        }
    });
    doc.remove_elements_by_id(PREVIEW_STYLE_ID);
    doc.remove_elements_by_id(PREVIEW_SCRIPT_ID);
}

/// Parse, strip, and re-serialize HTML text. Used where only the text form
/// is at hand (live iframe snapshots, server-side export).
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut doc = crate::html::parse(html);
    strip(&mut doc);
    doc.serialize()
}

#[cfg(test)]
#[path = "instrument_test.rs"]
mod tests;
