//! Instrumentation injection — a pure text transform.

use crate::instrument::INSTRUMENTATION;

/// Prepare project HTML for rendering in the preview iframe.
///
/// With the editor disabled this is the identity function: public previews
/// render the stored code exactly as saved. With the editor enabled, the
/// instrumentation block is inserted immediately before the first closing
/// `</body>` tag, or appended to the end of the text when there is none.
/// Empty input stays empty either way.
#[must_use]
pub fn inject(html: &str, editor_enabled: bool) -> String {
    if html.is_empty() || !editor_enabled {
        return html.to_owned();
    }

    if html.contains("</body>") {
        html.replacen("</body>", &format!("{INSTRUMENTATION}</body>"), 1)
    } else {
        format!("{html}{INSTRUMENTATION}")
    }
}

#[cfg(test)]
#[path = "inject_test.rs"]
mod tests;
