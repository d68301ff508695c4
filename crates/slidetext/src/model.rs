//! Slide and overlay item value types.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Identity of a slide, unique within a deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideId(String);

impl SlideId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of an overlay item, unique within its slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position as fractions of the slide's rendered bounds.
///
/// Both axes are always finite and within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const CENTER: Position = Position { x: 0.5, y: 0.5 };

    /// Clamp both axes into `[0, 1]`. NaN collapses to `0`.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_fraction(x),
            y: clamp_fraction(y),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::CENTER
    }
}

fn clamp_fraction(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Font size in points, clamped to `[FontSize::MIN, FontSize::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct FontSize(f32);

impl FontSize {
    pub const MIN: f32 = 8.0;
    pub const MAX: f32 = 120.0;
    pub const DEFAULT: FontSize = FontSize(24.0);

    pub fn new(size: f32) -> Self {
        if size.is_finite() {
            Self(size.clamp(Self::MIN, Self::MAX))
        } else {
            Self::DEFAULT
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Sanitize raw control input. Anything that is not a finite number
    /// falls back to `fallback`; numbers are clamped into range.
    pub fn parse_or(raw: &str, fallback: FontSize) -> FontSize {
        raw.parse::<FontSize>().unwrap_or(fallback)
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f32> for FontSize {
    fn from(size: f32) -> Self {
        Self::new(size)
    }
}

impl From<FontSize> for f32 {
    fn from(size: FontSize) -> Self {
        size.0
    }
}

impl FromStr for FontSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(Self::new(v)),
            _ => Err(ParseError::InvalidFontSize(s.to_string())),
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque RGB color with a `#rrggbb` text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }

    /// Sanitize raw control input, keeping `fallback` on anything unparsable.
    pub fn parse_or(raw: &str, fallback: Color) -> Color {
        raw.parse().unwrap_or(fallback)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
                Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 0x11)
                        .map_err(|_| err())
                };
                Ok(Self::rgb(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// The fixed font palette offered by the style controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    Inter,
    Georgia,
    TimesNewRoman,
    Arial,
    CourierNew,
}

impl FontFamily {
    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Inter,
            FontFamily::Georgia,
            FontFamily::TimesNewRoman,
            FontFamily::Arial,
            FontFamily::CourierNew,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::Georgia => "Georgia",
            Self::TimesNewRoman => "Times New Roman",
            Self::Arial => "Arial",
            Self::CourierNew => "Courier New",
        }
    }

    /// CSS-style font stack for this palette entry.
    pub fn css_stack(&self) -> &'static str {
        match self {
            Self::Inter => "Inter, sans-serif",
            Self::Georgia => "Georgia, serif",
            Self::TimesNewRoman => "'Times New Roman', serif",
            Self::Arial => "Arial, Helvetica, sans-serif",
            Self::CourierNew => "'Courier New', monospace",
        }
    }

    pub fn is_monospace(&self) -> bool {
        matches!(self, Self::CourierNew)
    }

    pub fn from_css(stack: &str) -> Option<FontFamily> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.css_stack() == stack.trim())
    }

    fn key(&self) -> &'static str {
        match self {
            Self::Inter => "inter",
            Self::Georgia => "georgia",
            Self::TimesNewRoman => "times-new-roman",
            Self::Arial => "arial",
            Self::CourierNew => "courier-new",
        }
    }
}

impl FromStr for FontFamily {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|f| f.key() == wanted || f.display_name().eq_ignore_ascii_case(&wanted))
            .or_else(|| Self::from_css(s))
            .ok_or_else(|| ParseError::InvalidFontFamily(s.to_string()))
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A positioned, styled text label belonging to one slide.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayItem {
    pub id: ItemId,
    pub text: String,
    pub position: Position,
    pub font_size: FontSize,
    pub color: Color,
    pub font_family: FontFamily,
}

impl OverlayItem {
    pub fn from_template(id: ItemId, template: &ItemTemplate) -> Self {
        Self {
            id,
            text: template.text.clone(),
            position: Position::CENTER,
            font_size: template.font_size,
            color: template.color,
            font_family: template.font_family,
        }
    }

    /// Return a copy with `patch` applied.
    pub fn patched(&self, patch: &ItemPatch) -> Self {
        let mut next = self.clone();
        if let Some(text) = &patch.text {
            next.text = text.clone();
        }
        if let Some(size) = patch.font_size {
            next.font_size = size;
        }
        if let Some(color) = patch.color {
            next.color = color;
        }
        if let Some(family) = patch.font_family {
            next.font_family = family;
        }
        next.position = Position::new(
            patch.x.unwrap_or(self.position.x),
            patch.y.unwrap_or(self.position.y),
        );
        next
    }
}

/// One background image plus its ordered overlay items.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: SlideId,
    /// Opaque image reference; never fetched by the core.
    pub image: String,
    pub items: Vec<Arc<OverlayItem>>,
}

impl Slide {
    pub fn new(id: SlideId, image: impl Into<String>) -> Self {
        Self {
            id,
            image: image.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: OverlayItem) -> Self {
        self.items.push(Arc::new(item));
        self
    }

    pub fn item(&self, id: &ItemId) -> Option<&OverlayItem> {
        self.items.iter().find(|it| &it.id == id).map(Arc::as_ref)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.item(id).is_some()
    }
}

/// Attributes used for newly added items.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemTemplate {
    pub text: String,
    pub font_size: FontSize,
    pub color: Color,
    pub font_family: FontFamily,
}

impl Default for ItemTemplate {
    fn default() -> Self {
        Self {
            text: "New text".to_string(),
            font_size: FontSize::DEFAULT,
            color: Color::WHITE,
            font_family: FontFamily::Inter,
        }
    }
}

/// Partial attribute update; every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub text: Option<String>,
    pub font_size: Option<FontSize>,
    pub color: Option<Color>,
    pub font_family: Option<FontFamily>,
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl ItemPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn font_size(size: FontSize) -> Self {
        Self {
            font_size: Some(size),
            ..Self::default()
        }
    }

    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn font_family(family: FontFamily) -> Self {
        Self {
            font_family: Some(family),
            ..Self::default()
        }
    }

    pub fn position(position: Position) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
