//! The composition layer: sole owner and writer of the slide deck.
//!
//! [`Editor`] wires the tracker, selection and drag session to the deck and
//! replaces its held [`Deck`] after each operation. All input is absorbed;
//! stale references and bad values never surface as errors.

use tracing::debug;

use crate::drag::{DragSession, ReleaseCause};
use crate::geometry::{ContainerRect, PointerPos};
use crate::model::{
    Color, FontFamily, FontSize, ItemId, ItemPatch, ItemTemplate, OverlayItem, Slide,
};
use crate::navigation::{Direction, SlideTracker};
use crate::selection::Selection;
use crate::store::Deck;

/// Pointer input forwarded by the render surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer went down on an overlay item. `rect` is the container's
    /// bounds measured at that moment.
    DownOnItem {
        item: ItemId,
        pointer: PointerPos,
        rect: ContainerRect,
    },
    /// Pointer went down on the slide background.
    DownOnBackground,
    Move(PointerPos),
    Up,
    Cancel,
    TouchEnd,
    FocusLost,
}

/// A raw edit from the style controls.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleInput {
    Text(String),
    /// Font size as typed; sanitized against the current value.
    FontSize(String),
    Color(Color),
    /// Color as typed; sanitized against the current value.
    ColorHex(String),
    FontFamily(FontFamily),
}

/// Values the style controls should display.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleControls {
    pub has_selection: bool,
    pub text: String,
    pub font_size: FontSize,
    pub color: Color,
    pub font_family: FontFamily,
}

impl Default for StyleControls {
    fn default() -> Self {
        Self {
            has_selection: false,
            text: String::new(),
            font_size: FontSize::DEFAULT,
            color: Color::WHITE,
            font_family: FontFamily::default(),
        }
    }
}

impl From<&OverlayItem> for StyleControls {
    fn from(item: &OverlayItem) -> Self {
        Self {
            has_selection: true,
            text: item.text.clone(),
            font_size: item.font_size,
            color: item.color,
            font_family: item.font_family,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Editor {
    deck: Deck,
    tracker: SlideTracker,
    selection: Selection,
    drag: DragSession,
    template: ItemTemplate,
    release_on_focus_loss: bool,
}

impl Editor {
    pub fn new(deck: Deck) -> Self {
        let tracker = SlideTracker::new(deck.len());
        Self {
            deck,
            tracker,
            selection: Selection::new(),
            drag: DragSession::new(),
            template: ItemTemplate::default(),
            release_on_focus_loss: true,
        }
    }

    pub fn with_template(mut self, template: ItemTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_release_on_focus_loss(mut self, enabled: bool) -> Self {
        self.release_on_focus_loss = enabled;
        self
    }

    /// Start on slide `index`, clamped to the deck.
    pub fn starting_at(mut self, index: usize) -> Self {
        self.tracker = SlideTracker::starting_at(self.deck.len(), index);
        self.selection.clear();
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn template(&self) -> &ItemTemplate {
        &self.template
    }

    pub fn active_index(&self) -> Option<usize> {
        self.tracker.active()
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.tracker.active().and_then(|i| self.deck.slide(i))
    }

    pub fn selected_id(&self) -> Option<&ItemId> {
        self.selection.selected()
    }

    pub fn selected_item(&self) -> Option<&OverlayItem> {
        self.active_slide()
            .and_then(|slide| self.selection.resolve(slide))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_acquired()
    }

    pub fn controls(&self) -> StyleControls {
        self.selected_item()
            .map(StyleControls::from)
            .unwrap_or_default()
    }

    /// Replace the deck wholesale, e.g. after the content source reloads.
    ///
    /// The active index is clamped, any drag is released and a selection
    /// that no longer resolves is dropped.
    pub fn reset_content(&mut self, deck: Deck) {
        self.release_drag(ReleaseCause::Navigation);
        let start = self.tracker.active().unwrap_or(0);
        self.tracker = SlideTracker::starting_at(deck.len(), start);
        self.deck = deck;
        let active = self.tracker.active().and_then(|i| self.deck.slide(i));
        self.selection.retain_valid(active);
    }

    /// Append a new text item to the active slide and select it.
    pub fn add_text(&mut self) -> Option<ItemId> {
        let index = self.tracker.active()?;
        let (deck, id) = self.deck.add_item(index, &self.template);
        self.deck = deck;
        if let Some(id) = &id {
            self.selection.select(id.clone());
        }
        id
    }

    /// Apply `patch` to the selected item. Returns `false` when nothing is selected.
    pub fn update_selected(&mut self, patch: &ItemPatch) -> bool {
        let Some(index) = self.tracker.active() else {
            return false;
        };
        let Some(id) = self.selected_item().map(|it| it.id.clone()) else {
            return false;
        };
        self.deck = self.deck.update_item(index, &id, patch);
        true
    }

    /// Sanitize a raw style edit and apply it to the selection.
    pub fn apply_style(&mut self, input: StyleInput) -> bool {
        let current = self.controls();
        if !current.has_selection {
            return false;
        }
        let patch = match input {
            StyleInput::Text(text) => ItemPatch::text(text),
            StyleInput::FontSize(raw) => {
                ItemPatch::font_size(FontSize::parse_or(&raw, current.font_size))
            }
            StyleInput::Color(color) => ItemPatch::color(color),
            StyleInput::ColorHex(raw) => ItemPatch::color(Color::parse_or(&raw, current.color)),
            StyleInput::FontFamily(family) => ItemPatch::font_family(family),
        };
        self.update_selected(&patch)
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::DownOnItem {
                item,
                pointer,
                rect,
            } => self.begin_drag(item, pointer, rect),
            PointerEvent::DownOnBackground => self.selection.clear(),
            PointerEvent::Move(pointer) => {
                self.deck = self.drag.on_move(&self.deck, pointer);
            }
            PointerEvent::Up => {
                self.release_drag(ReleaseCause::PointerUp);
            }
            PointerEvent::Cancel => {
                self.release_drag(ReleaseCause::PointerCancel);
            }
            PointerEvent::TouchEnd => {
                self.release_drag(ReleaseCause::TouchEnd);
            }
            PointerEvent::FocusLost => {
                if self.release_on_focus_loss {
                    self.release_drag(ReleaseCause::FocusLost);
                }
            }
        }
    }

    /// End any drag in progress. Returns `true` if one was released.
    pub fn release_drag(&mut self, cause: ReleaseCause) -> bool {
        self.drag.release(cause)
    }

    /// Make slide `index` current. Releases a drag in progress first.
    pub fn navigate(&mut self, index: usize) -> bool {
        if index < self.deck.len() {
            self.release_drag(ReleaseCause::Navigation);
        }
        self.tracker.on_navigate(index, &mut self.selection)
    }

    /// Index `step(direction)` would move to, if any.
    pub fn neighbor(&self, direction: Direction) -> Option<usize> {
        self.tracker.step(direction)
    }

    pub fn step(&mut self, direction: Direction) -> bool {
        match self.tracker.step(direction) {
            Some(index) => self.navigate(index),
            None => false,
        }
    }

    fn begin_drag(&mut self, item: ItemId, pointer: PointerPos, rect: ContainerRect) {
        let Some(index) = self.tracker.active() else {
            return;
        };
        if !self.deck.slide(index).is_some_and(|s| s.contains(&item)) {
            debug!(item = %item, "pointer-down on item not on active slide");
            return;
        }
        debug!(item = %item, ?pointer, "pointer-down on item");
        self.selection.select(item.clone());
        self.drag.acquire(index, item, rect);
    }
}
