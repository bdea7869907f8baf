#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use bridge::{Direction, Message, SelectedElement};

/// Holds the host-side view of the frame's selection.
///
/// The embedded document is the source of truth; this state only mirrors what
/// the frame last announced. Selection messages are last-write-wins and clear
/// is idempotent, so replayed or reordered announcements converge on the
/// frame's actual state.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    pub current: Option<SelectedElement>,
    seen_rebuilds: u64,
}

impl SelectionState {
    /// Replace the tracked selection. Last write wins.
    pub fn select(&mut self, element: SelectedElement) {
        self.current = Some(element);
    }

    /// Drop the tracked selection. Safe to call when nothing is selected.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Fold a decoded frame message into the tracked selection.
    ///
    /// Only host-bound messages are meaningful here; embedded-bound messages
    /// are ignored and `false` is returned.
    pub fn apply(&mut self, message: &Message) -> bool {
        if message.direction() != Direction::ToHost {
            return false;
        }
        match message {
            Message::ElementSelected(element) => self.select(element.clone()),
            // ClearSelection is the only other host-bound variant.
            _ => self.clear(),
        }
        true
    }

    /// Invalidate the selection when the preview document was rebuilt.
    ///
    /// Locators refer to positions in a specific document; after a rebuild
    /// they may resolve to a different element or to nothing, so the tracked
    /// selection is dropped. Returns `true` when a rebuild was observed.
    pub fn sync_rebuild(&mut self, rebuilds: u64) -> bool {
        if rebuilds == self.seen_rebuilds {
            return false;
        }
        self.seen_rebuilds = rebuilds;
        self.clear();
        true
    }
}
