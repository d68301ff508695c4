//! Active slide tracking for the carousel.

use tracing::{debug, warn};

use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Which slide is current. `active` is `None` only for an empty deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTracker {
    active: Option<usize>,
    len: usize,
}

impl SlideTracker {
    /// Start on the first slide, or on nothing for an empty deck.
    pub fn new(len: usize) -> Self {
        Self {
            active: (len > 0).then_some(0),
            len,
        }
    }

    /// Start on `index`, clamped to the last slide.
    pub fn starting_at(len: usize, index: usize) -> Self {
        Self {
            active: (len > 0).then(|| index.min(len - 1)),
            len,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Make `index` current and clear the selection.
    ///
    /// An index outside the deck is rejected and nothing changes.
    pub fn on_navigate(&mut self, index: usize, selection: &mut Selection) -> bool {
        if index >= self.len {
            warn!(index, len = self.len, "navigation outside the deck ignored");
            return false;
        }
        debug!(from = ?self.active, to = index, "active slide changed");
        self.active = Some(index);
        selection.clear();
        true
    }

    /// Neighbouring index in `direction`, without wrapping.
    pub fn step(&self, direction: Direction) -> Option<usize> {
        let idx = self.active?;
        match direction {
            Direction::Forward => (idx + 1 < self.len).then_some(idx + 1),
            Direction::Backward => idx.checked_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    #[test]
    fn test_empty_deck_has_no_active_slide() {
        let tracker = SlideTracker::new(0);
        assert_eq!(tracker.active(), None);
        assert_eq!(tracker.step(Direction::Forward), None);
    }

    #[test]
    fn test_navigate_clears_selection() {
        let mut tracker = SlideTracker::new(3);
        let mut sel = Selection::new();
        sel.select(ItemId::new("t1"));

        assert!(tracker.on_navigate(2, &mut sel));
        assert_eq!(tracker.active(), Some(2));
        assert!(sel.selected().is_none());
    }

    #[test]
    fn test_out_of_range_navigation_is_rejected() {
        let mut tracker = SlideTracker::new(2);
        let mut sel = Selection::new();
        sel.select(ItemId::new("t1"));

        assert!(!tracker.on_navigate(2, &mut sel));
        assert_eq!(tracker.active(), Some(0));
        assert_eq!(sel.selected(), Some(&ItemId::new("t1")));
    }

    #[test]
    fn test_step_does_not_wrap() {
        let tracker = SlideTracker::starting_at(3, 2);
        assert_eq!(tracker.step(Direction::Forward), None);
        assert_eq!(tracker.step(Direction::Backward), Some(1));

        let tracker = SlideTracker::new(3);
        assert_eq!(tracker.step(Direction::Backward), None);
        assert_eq!(tracker.step(Direction::Forward), Some(1));
    }

    #[test]
    fn test_starting_at_clamps() {
        assert_eq!(SlideTracker::starting_at(3, 10).active(), Some(2));
        assert_eq!(SlideTracker::starting_at(0, 1).active(), None);
    }
}
