//! Text overlays on a carousel of background slides.
//!
//! The library holds the slide/overlay model and the pointer-driven
//! positioning engine. [`editor::Editor`] composes the pieces; the
//! `slidetext` binary wraps it in a desktop editor.

pub mod config;
pub mod content;
pub mod drag;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod model;
pub mod navigation;
pub mod selection;
pub mod store;

pub use editor::{Editor, PointerEvent, StyleControls, StyleInput};
pub use geometry::{ContainerRect, PointerPos, map_pointer_to_fraction};
pub use model::{
    Color, FontFamily, FontSize, ItemId, ItemPatch, ItemTemplate, OverlayItem, Position, Slide,
    SlideId,
};
pub use store::Deck;
