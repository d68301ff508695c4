use eframe::egui::{Color32, FontFamily as EguiFamily, FontId};

use slidetext::{Color, FontFamily, FontSize};

/// Colors for the editor chrome around the slides.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color32,
    pub slide_placeholder: Color32,
    pub caption: Color32,
    pub selection_ring: Color32,
    pub selection_fill: Color32,
    pub dot_active: Color32,
    pub dot_inactive: Color32,
    pub arrow: Color32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            slide_placeholder: Color32::BLACK,
            caption: Color32::from_rgba_unmultiplied(200, 200, 200, 140),
            selection_ring: Color32::from_rgb(0x3B, 0x82, 0xF6),
            selection_fill: Color32::from_rgba_unmultiplied(0, 0, 0, 51),
            dot_active: Color32::WHITE,
            dot_inactive: Color32::from_rgba_unmultiplied(255, 255, 255, 90),
            arrow: Color32::from_rgb(0x52, 0x94, 0xE2),
        }
    }

    pub fn text_color(color: Color) -> Color32 {
        Color32::from_rgb(color.r, color.g, color.b)
    }

    /// egui only ships proportional and monospace faces; map the palette onto them.
    pub fn font_id(family: FontFamily, size: FontSize, scale: f32) -> FontId {
        let egui_family = if family.is_monospace() {
            EguiFamily::Monospace
        } else {
            EguiFamily::Proportional
        };
        FontId::new(size.get() * scale, egui_family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_stand_out_from_background() {
        let theme = Theme::dark();
        assert_ne!(theme.arrow, theme.background);
        assert_ne!(theme.arrow, theme.slide_placeholder);
    }

    #[test]
    fn test_font_id_maps_palette_to_egui_faces() {
        let size = FontSize::new(30.0);
        let mono = Theme::font_id(FontFamily::CourierNew, size, 2.0);
        assert_eq!(mono.family, EguiFamily::Monospace);
        assert_eq!(mono.size, 60.0);
        let serif = Theme::font_id(FontFamily::Georgia, size, 1.0);
        assert_eq!(serif.family, EguiFamily::Proportional);
    }
}
