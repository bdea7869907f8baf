//! Shared message model and JSON codec for the host/preview bridge.
//!
//! This crate owns the wire representation used on both sides of the iframe
//! boundary: the host page (`client`) and the instrumentation script running
//! inside the embedded preview document (`preview`). Messages travel over
//! `postMessage` as a JSON envelope `{ "type": <TAG>, "payload": <object> }`,
//! so the envelope shape and the reserved DOM identifiers defined here are a
//! byte-for-byte contract between the two sides.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// PROTOCOL CONSTANTS
// =============================================================================

/// `id` of the `<style>` element injected alongside the instrumentation script.
pub const PREVIEW_STYLE_ID: &str = "ai-preview-style";

/// `id` of the injected instrumentation `<script>` element.
pub const PREVIEW_SCRIPT_ID: &str = "ai-preview-script";

/// CSS class marking the currently selected element inside the preview.
pub const SELECTED_CLASS: &str = "ai-selected-element";

/// Data attribute marking the currently selected element inside the preview.
pub const SELECTED_ATTR: &str = "data-ai-selected";

// =============================================================================
// ERRORS
// =============================================================================

/// Error returned by [`decode_message`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text was not valid JSON, or a payload did not match its message type.
    #[error("failed to decode bridge message: {0}")]
    Json(#[from] serde_json::Error),
    /// The envelope carried a `type` tag outside the protocol catalogue.
    #[error("unknown message type: {0}")]
    UnknownType(String),
    /// The envelope had no string `type` tag at all.
    #[error("message envelope is missing a type tag")]
    MissingType,
}

/// Error returned when parsing an [`ElementLocator`] from its string form.
#[derive(Debug, thiserror::Error)]
#[error("invalid element locator: {0:?}")]
pub struct LocatorError(pub String);

// =============================================================================
// LOCATOR
// =============================================================================

/// Stable reference to one element inside the embedded document.
///
/// Elements with an `id` attribute are addressed as `#the-id`. Elements
/// without one are addressed by a `/`-separated path of zero-based
/// element-child indexes walked down from the document element, e.g. `1/0/2`.
/// Both sides of the bridge compute and resolve the same format, so a locator
/// minted by the instrumentation script can later be resolved by the engine
/// and vice versa.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementLocator {
    /// `#id` form; the inner string excludes the `#` prefix.
    Id(String),
    /// Element-child index path from the document element.
    Path(Vec<usize>),
}

impl fmt::Display for ElementLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Path(steps) => {
                let mut first = true;
                for step in steps {
                    if !first {
                        f.write_str("/")?;
                    }
                    write!(f, "{step}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for ElementLocator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = s.strip_prefix('#') {
            if id.is_empty() {
                return Err(LocatorError(s.to_owned()));
            }
            return Ok(Self::Id(id.to_owned()));
        }
        if s.is_empty() {
            return Err(LocatorError(s.to_owned()));
        }
        let steps = s
            .split('/')
            .map(|part| part.parse::<usize>().map_err(|_| LocatorError(s.to_owned())))
            .collect::<Result<Vec<usize>, LocatorError>>()?;
        Ok(Self::Path(steps))
    }
}

impl Default for ElementLocator {
    /// Path to the document element's first element child.
    fn default() -> Self {
        Self::Path(vec![0])
    }
}

impl Serialize for ElementLocator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElementLocator {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Descriptor of the element the user clicked inside the preview.
///
/// Carried by [`Message::ElementSelected`]; the host keeps at most one of
/// these live at a time (single-selection model).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedElement {
    /// Stable reference used to re-find the node on later edits.
    pub locator: ElementLocator,
    /// Lowercase tag name, e.g. `"h1"`.
    pub tag: String,
    /// Text content at selection time.
    pub text: String,
    /// Inline style declarations at selection time, keyed by CSS property.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, String>,
}

/// Sparse edit applied to one element; only present fields change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementEdit {
    /// Element to edit. A locator that no longer resolves makes the whole
    /// edit a silent no-op on the embedded side.
    pub locator: ElementLocator,
    /// New text content, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline style properties to set, keyed by CSS property.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, String>,
}

// =============================================================================
// MESSAGES
// =============================================================================

/// Which side of the iframe boundary a message is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Embedded document → host page.
    ToHost,
    /// Host page → embedded document.
    ToEmbedded,
}

/// A single message on the host/preview bridge.
///
/// The four variants are the complete catalogue; receivers drop anything
/// else after logging. Delivery is best-effort and fire-and-forget — there
/// are no acknowledgements, sequence numbers, or retries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Message {
    /// Embedded → host: the user clicked an element; the payload describes it.
    #[serde(rename = "ELEMENT_SELECTED")]
    ElementSelected(SelectedElement),
    /// Embedded → host: the user cleared the selection inside the preview.
    #[serde(rename = "CLEAR_SELECTION")]
    ClearSelection,
    /// Host → embedded: apply text/style changes to the located element.
    #[serde(rename = "UPDATE_ELEMENT")]
    UpdateElement(ElementEdit),
    /// Host → embedded: drop the visual selection marking.
    #[serde(rename = "CLEAR_SELECTION_REQUEST")]
    ClearSelectionRequest,
}

impl Message {
    /// The side this message is addressed to.
    #[must_use]
    pub fn direction(&self) -> Direction {
        match self {
            Self::ElementSelected(_) | Self::ClearSelection => Direction::ToHost,
            Self::UpdateElement(_) | Self::ClearSelectionRequest => Direction::ToEmbedded,
        }
    }

    /// Wire tag string for this message, e.g. `"ELEMENT_SELECTED"`.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ElementSelected(_) => "ELEMENT_SELECTED",
            Self::ClearSelection => "CLEAR_SELECTION",
            Self::UpdateElement(_) => "UPDATE_ELEMENT",
            Self::ClearSelectionRequest => "CLEAR_SELECTION_REQUEST",
        }
    }
}

/// Encode a message into its JSON envelope text.
#[must_use]
pub fn encode_message(message: &Message) -> String {
    // Safety: serializing these types cannot fail; every field is a plain
    // string, map, or option with an infallible Serialize impl.
    serde_json::to_string(message).unwrap_or_default()
}

/// Decode JSON envelope text into a message.
///
/// # Errors
///
/// Returns [`CodecError::MissingType`] when the envelope has no string
/// `type` field, [`CodecError::UnknownType`] for a tag outside the
/// catalogue, and [`CodecError::Json`] for malformed JSON or a payload
/// that does not match its tag.
pub fn decode_message(text: &str) -> Result<Message, CodecError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let Some(tag) = value.get("type").and_then(|t| t.as_str()) else {
        return Err(CodecError::MissingType);
    };
    match tag {
        "ELEMENT_SELECTED" | "CLEAR_SELECTION" | "UPDATE_ELEMENT" | "CLEAR_SELECTION_REQUEST" => {
            Ok(serde_json::from_value(value)?)
        }
        other => Err(CodecError::UnknownType(other.to_owned())),
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
