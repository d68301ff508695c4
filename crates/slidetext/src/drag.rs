//! Pointer-drag gesture lifecycle.
//!
//! A session is acquired on pointer-down over an item, applies move events
//! to the deck while acquired, and is released exactly once on whichever
//! termination event arrives first. Moves after release are ignored.

use std::fmt;

use tracing::{debug, trace};

use crate::geometry::{ContainerRect, PointerPos, map_pointer_to_fraction};
use crate::model::ItemId;
use crate::store::Deck;

/// Why a drag session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseCause {
    PointerUp,
    PointerCancel,
    TouchEnd,
    /// The window lost focus mid-drag.
    FocusLost,
    /// The active slide changed mid-drag.
    Navigation,
    /// A new acquisition replaced this one.
    Superseded,
    /// The surface observed the button no longer held without a release event.
    ButtonNotHeld,
}

impl fmt::Display for ReleaseCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PointerUp => "pointer-up",
            Self::PointerCancel => "pointer-cancel",
            Self::TouchEnd => "touch-end",
            Self::FocusLost => "focus-lost",
            Self::Navigation => "navigation",
            Self::Superseded => "superseded",
            Self::ButtonNotHeld => "button-not-held",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Acquired {
        slide_index: usize,
        item: ItemId,
        /// Snapshot taken at acquisition; not re-measured during the drag.
        rect: ContainerRect,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    state: DragState,
}

impl Default for DragSession {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
        }
    }
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_acquired(&self) -> bool {
        matches!(self.state, DragState::Acquired { .. })
    }

    /// The item being dragged, if any.
    pub fn item(&self) -> Option<&ItemId> {
        match &self.state {
            DragState::Acquired { item, .. } => Some(item),
            DragState::Idle => None,
        }
    }

    /// Start a session for `item` on slide `slide_index`.
    ///
    /// An already acquired session is released first.
    pub fn acquire(&mut self, slide_index: usize, item: ItemId, rect: ContainerRect) {
        if self.is_acquired() {
            self.release(ReleaseCause::Superseded);
        }
        debug!(slide_index, item = %item, ?rect, "drag acquired");
        self.state = DragState::Acquired {
            slide_index,
            item,
            rect,
        };
    }

    /// Apply one pointer move to `deck`. Returns `deck` unchanged when idle
    /// or when the move maps to nothing.
    pub fn on_move(&self, deck: &Deck, pointer: PointerPos) -> Deck {
        let DragState::Acquired {
            slide_index,
            item,
            rect,
        } = &self.state
        else {
            trace!(?pointer, "move without drag session ignored");
            return deck.clone();
        };

        let Some(current) = deck.item(*slide_index, item) else {
            return deck.clone();
        };
        let Some(position) = map_pointer_to_fraction(pointer, rect).resolve(current.position)
        else {
            trace!(?pointer, ?rect, "degenerate container, move ignored");
            return deck.clone();
        };

        trace!(item = %item, x = position.x, y = position.y, "drag move");
        deck.move_item(*slide_index, item, position)
    }

    /// End the session. Returns `true` if a session was actually released.
    pub fn release(&mut self, cause: ReleaseCause) -> bool {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Acquired { item, .. } => {
                debug!(item = %item, %cause, "drag released");
                true
            }
            DragState::Idle => {
                trace!(%cause, "release without drag session");
                false
            }
        }
    }
}
