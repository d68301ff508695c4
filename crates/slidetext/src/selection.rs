//! Single-item selection, scoped to the active slide.

use tracing::debug;

use crate::model::{ItemId, OverlayItem, Slide};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: ItemId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&ItemId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Look the selected id up on `active`. A stale id resolves to `None`.
    pub fn resolve<'a>(&self, active: &'a Slide) -> Option<&'a OverlayItem> {
        self.selected.as_ref().and_then(|id| active.item(id))
    }

    /// Drop a selection that does not resolve on the active slide.
    pub fn retain_valid(&mut self, active: Option<&Slide>) {
        let Some(id) = &self.selected else { return };
        let valid = active.is_some_and(|slide| slide.contains(id));
        if !valid {
            debug!(item = %id, "clearing stale selection");
            self.selected = None;
        }
    }
}
