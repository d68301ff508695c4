//! Initial slide content.

use crate::model::{Color, FontFamily, FontSize, ItemId, OverlayItem, Position, Slide, SlideId};
use crate::store::Deck;

/// Supplies the initial ordered slides.
pub trait ContentSource {
    fn slides(&self) -> Vec<Slide>;

    fn deck(&self) -> Deck {
        Deck::from_slides(self.slides())
    }
}

/// Three demo slides, one text item each.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarterContent;

impl ContentSource for StarterContent {
    fn slides(&self) -> Vec<Slide> {
        vec![
            Slide::new(
                SlideId::new("s1"),
                "https://images.unsplash.com/photo-1520975916090-3105956dac38?q=80&w=1200&auto=format&fit=crop",
            )
            .with_item(text("t1", "Your first text", (0.2, 0.2), 24.0, Color::WHITE)),
            Slide::new(
                SlideId::new("s2"),
                "https://images.unsplash.com/photo-1509099836639-18ba1795216d?q=80&w=1200&auto=format&fit=crop",
            )
            .with_item(text(
                "t2",
                "Second slide text",
                (0.3, 0.6),
                28.0,
                Color::rgb(0xFF, 0xEF, 0x00),
            )),
            Slide::new(
                SlideId::new("s3"),
                "https://images.unsplash.com/photo-1549880338-65ddcdfd017b?q=80&w=1200&auto=format&fit=crop",
            )
            .with_item(text("t3", "Third slide!", (0.5, 0.4), 30.0, Color::WHITE)),
        ]
    }
}

pub fn starter_deck() -> Deck {
    StarterContent.deck()
}

fn text(id: &str, text: &str, (x, y): (f32, f32), size: f32, color: Color) -> OverlayItem {
    OverlayItem {
        id: ItemId::new(id),
        text: text.to_string(),
        position: Position::new(x, y),
        font_size: FontSize::new(size),
        color,
        font_family: FontFamily::Inter,
    }
}
