//! The slide collection as an immutable value.
//!
//! Every mutation returns a new [`Deck`]. Slides and items live behind `Arc`,
//! so untouched slides and items are shared with the previous value and a
//! no-op returns a deck that is [`Deck::ptr_eq`] to its input.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::model::{ItemId, ItemPatch, ItemTemplate, OverlayItem, Position, Slide};

#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    slides: Arc<[Arc<Slide>]>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::from_slides(Vec::new())
    }
}

impl Deck {
    pub fn from_slides(slides: Vec<Slide>) -> Self {
        Self {
            slides: slides.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Arc<Slide>] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index).map(Arc::as_ref)
    }

    pub fn item(&self, index: usize, id: &ItemId) -> Option<&OverlayItem> {
        self.slide(index).and_then(|s| s.item(id))
    }

    /// True when both decks share the same underlying slide list.
    pub fn ptr_eq(&self, other: &Deck) -> bool {
        Arc::ptr_eq(&self.slides, &other.slides)
    }

    /// Append a new item to the slide at `index`.
    ///
    /// Returns the unchanged deck and `None` when `index` is out of range.
    pub fn add_item(&self, index: usize, template: &ItemTemplate) -> (Deck, Option<ItemId>) {
        let Some(slide) = self.slide(index) else {
            debug!(index, len = self.len(), "add_item: no slide at index");
            return (self.clone(), None);
        };

        let id = fresh_item_id(slide);
        let mut next = slide.clone();
        next.items
            .push(Arc::new(OverlayItem::from_template(id.clone(), template)));
        debug!(slide = %slide.id, item = %id, "added overlay item");
        (self.replace_slide(index, next), Some(id))
    }

    /// Apply `patch` to item `id` on slide `index`. Missing targets are a no-op.
    pub fn update_item(&self, index: usize, id: &ItemId, patch: &ItemPatch) -> Deck {
        self.map_item(index, id, |item| item.patched(patch))
    }

    /// Set the position of item `id` on slide `index`. Missing targets are a no-op.
    pub fn move_item(&self, index: usize, id: &ItemId, position: Position) -> Deck {
        self.map_item(index, id, |item| OverlayItem {
            position: Position::new(position.x, position.y),
            ..item.clone()
        })
    }

    fn map_item(
        &self,
        index: usize,
        id: &ItemId,
        f: impl FnOnce(&OverlayItem) -> OverlayItem,
    ) -> Deck {
        let Some(slide) = self.slide(index) else {
            trace!(index, item = %id, "no slide at index, ignoring edit");
            return self.clone();
        };
        let Some(pos) = slide.items.iter().position(|it| &it.id == id) else {
            trace!(slide = %slide.id, item = %id, "no such item, ignoring edit");
            return self.clone();
        };

        let updated = f(&slide.items[pos]);
        if updated == *slide.items[pos] {
            return self.clone();
        }

        let mut next = slide.clone();
        next.items[pos] = Arc::new(updated);
        self.replace_slide(index, next)
    }

    fn replace_slide(&self, index: usize, slide: Slide) -> Deck {
        let mut slides: Vec<Arc<Slide>> = self.slides.to_vec();
        slides[index] = Arc::new(slide);
        Deck {
            slides: slides.into(),
        }
    }
}

/// Smallest `t_<n>` id (n starting after the item count) not used on `slide`.
fn fresh_item_id(slide: &Slide) -> ItemId {
    let taken: HashSet<&str> = slide.items.iter().map(|it| it.id.as_str()).collect();
    (slide.items.len() + 1..)
        .map(|n| format!("t_{n}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .map(ItemId::new)
        .unwrap_or_else(|| ItemId::new(format!("t_{}", slide.items.len() + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, FontSize, SlideId};

    fn two_slides() -> Deck {
        let template = ItemTemplate::default();
        Deck::from_slides(vec![
            Slide::new(SlideId::new("s1"), "a.jpg")
                .with_item(OverlayItem::from_template(ItemId::new("t1"), &template)),
            Slide::new(SlideId::new("s2"), "b.jpg")
                .with_item(OverlayItem::from_template(ItemId::new("t2"), &template)),
        ])
    }

    #[test]
    fn test_add_appends_and_shares_existing_items() {
        let deck = two_slides();
        let (next, id) = deck.add_item(0, &ItemTemplate::default());
        let id = id.unwrap();

        let before = deck.slide(0).unwrap();
        let after = next.slide(0).unwrap();
        assert_eq!(after.items.len(), before.items.len() + 1);
        assert!(Arc::ptr_eq(&before.items[0], &after.items[0]));
        assert_eq!(after.items.last().unwrap().id, id);
        assert_eq!(after.items.last().unwrap().position, Position::new(0.5, 0.5));
    }

    #[test]
    fn test_add_out_of_range_is_noop() {
        let deck = two_slides();
        let (next, id) = deck.add_item(5, &ItemTemplate::default());
        assert!(id.is_none());
        assert!(next.ptr_eq(&deck));

        let (next, id) = Deck::default().add_item(0, &ItemTemplate::default());
        assert!(id.is_none());
        assert!(next.is_empty());
    }

    #[test]
    fn test_fresh_ids_do_not_collide() {
        let template = ItemTemplate::default();
        let slide = Slide::new(SlideId::new("s1"), "a.jpg")
            .with_item(OverlayItem::from_template(ItemId::new("t_2"), &template))
            .with_item(OverlayItem::from_template(ItemId::new("t_3"), &template));
        let mut deck = Deck::from_slides(vec![slide]);

        let mut seen = HashSet::new();
        seen.insert("t_2".to_string());
        seen.insert("t_3".to_string());
        for _ in 0..5 {
            let (next, id) = deck.add_item(0, &template);
            assert!(seen.insert(id.unwrap().to_string()));
            deck = next;
        }
        assert_eq!(deck.slide(0).unwrap().items.len(), 7);
    }

    #[test]
    fn test_update_missing_item_is_noop() {
        let deck = two_slides();
        let next = deck.update_item(0, &ItemId::new("nope"), &ItemPatch::text("x"));
        assert_eq!(next, deck);
        assert!(next.ptr_eq(&deck));

        let next = deck.move_item(0, &ItemId::new("t2"), Position::new(0.1, 0.1));
        assert_eq!(next, deck);
    }

    #[test]
    fn test_update_applies_patch() {
        let deck = two_slides();
        let patch = ItemPatch {
            text: Some("Hello".into()),
            font_size: Some(FontSize::new(40.0)),
            color: Some(Color::rgb(0xFF, 0xEF, 0)),
            ..ItemPatch::default()
        };
        let next = deck.update_item(0, &ItemId::new("t1"), &patch);
        let item = next.item(0, &ItemId::new("t1")).unwrap();
        assert_eq!(item.text, "Hello");
        assert_eq!(item.font_size.get(), 40.0);
        assert_eq!(item.color, Color::rgb(0xFF, 0xEF, 0));
        assert_eq!(item.position, Position::CENTER);
    }

    #[test]
    fn test_mutation_leaves_other_slides_untouched() {
        let deck = two_slides();
        let next = deck
            .move_item(0, &ItemId::new("t1"), Position::new(0.9, 0.1))
            .update_item(0, &ItemId::new("t1"), &ItemPatch::text("changed"));
        let (next, _) = next.add_item(0, &ItemTemplate::default());

        assert!(Arc::ptr_eq(&deck.slides()[1], &next.slides()[1]));
        assert_eq!(deck.slide(1), next.slide(1));
        assert_eq!(next.slide(0).unwrap().items.len(), 2);
    }

    #[test]
    fn test_move_clamps_position() {
        let deck = two_slides();
        let next = deck.move_item(
            1,
            &ItemId::new("t2"),
            Position {
                x: 4.0,
                y: -2.0,
            },
        );
        assert_eq!(
            next.item(1, &ItemId::new("t2")).unwrap().position,
            Position::new(1.0, 0.0)
        );
    }
}
