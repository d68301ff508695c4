use eframe::egui;
use tracing::info;

use slidetext::config::{AspectRatio, Config};
use slidetext::content::starter_deck;
use slidetext::drag::ReleaseCause;
use slidetext::navigation::Direction;
use slidetext::{
    Color, ContainerRect, Editor, FontFamily, ItemId, PointerEvent, PointerPos, StyleInput,
};

use crate::theme::Theme;

/// Horizontal travel on the background that counts as a swipe.
const SWIPE_THRESHOLD: f32 = 60.0;
const DOT_SIZE: f32 = 14.0;

struct EditorApp {
    editor: Editor,
    theme: Theme,
    aspect: AspectRatio,
    /// Raw contents of the size field; the editor only sees sanitized values.
    size_input: String,
    /// Item the size field currently reflects.
    size_input_for: Option<ItemId>,
    /// Where a background press started, for swipe detection.
    swipe_origin: Option<egui::Pos2>,
    window_focused: bool,
}

impl EditorApp {
    fn new(editor: Editor, aspect: AspectRatio) -> Self {
        let size_input = editor.controls().font_size.to_string();
        Self {
            editor,
            theme: Theme::dark(),
            aspect,
            size_input,
            size_input_for: None,
            swipe_origin: None,
            window_focused: true,
        }
    }

    fn sync_size_input(&mut self) {
        let selected = self.editor.selected_id().cloned();
        if selected != self.size_input_for {
            self.size_input = self.editor.controls().font_size.to_string();
            self.size_input_for = selected;
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        self.sync_size_input();
        let controls = self.editor.controls();

        ui.horizontal_wrapped(|ui| {
            if ui.button("Add Text").clicked() {
                self.editor.add_text();
            }

            let mut family = controls.font_family;
            egui::ComboBox::from_id_salt("font_family")
                .selected_text(family.display_name())
                .show_ui(ui, |ui| {
                    for f in FontFamily::all() {
                        ui.selectable_value(&mut family, *f, f.display_name());
                    }
                });
            if family != controls.font_family {
                self.editor.apply_style(StyleInput::FontFamily(family));
            }

            ui.label("Size");
            let size = ui.add(egui::TextEdit::singleline(&mut self.size_input).desired_width(48.0));
            if size.changed() {
                self.editor
                    .apply_style(StyleInput::FontSize(self.size_input.clone()));
            }
            if size.lost_focus() {
                self.size_input = self.editor.controls().font_size.to_string();
            }

            ui.label("Color");
            let mut rgb = controls.color.to_array();
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                self.editor
                    .apply_style(StyleInput::Color(Color::from_array(rgb)));
            }

            ui.label("Text");
            let mut text = controls.text.clone();
            let edit = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .hint_text("Edit selected text")
                    .desired_width(192.0),
            );
            if edit.changed() {
                self.editor.apply_style(StyleInput::Text(text));
            }
        });
    }

    fn draw_carousel_chrome(&mut self, ui: &mut egui::Ui) {
        let count = self.editor.deck().len();
        let active = self.editor.active_index();

        ui.horizontal(|ui| {
            let back = self.editor.neighbor(Direction::Backward).is_some();
            if ui.add_enabled(back, self.arrow_button("\u{25C0}")).clicked() {
                self.editor.step(Direction::Backward);
            }

            for i in 0..count {
                let (rect, resp) =
                    ui.allocate_exact_size(egui::vec2(DOT_SIZE, DOT_SIZE), egui::Sense::click());
                let color = if Some(i) == active {
                    self.theme.dot_active
                } else {
                    self.theme.dot_inactive
                };
                ui.painter().circle_filled(rect.center(), DOT_SIZE * 0.3, color);
                if resp.clicked() {
                    self.jump_to(i);
                }
            }

            let forward = self.editor.neighbor(Direction::Forward).is_some();
            if ui.add_enabled(forward, self.arrow_button("\u{25B6}")).clicked() {
                self.editor.step(Direction::Forward);
            }
        });
    }

    fn arrow_button(&self, glyph: &str) -> egui::Button<'static> {
        egui::Button::new(egui::RichText::new(glyph).color(self.theme.arrow))
    }

    /// Dot click. The slide showing is not re-entered.
    fn jump_to(&mut self, index: usize) {
        if self.editor.active_index() != Some(index) {
            self.editor.navigate(index);
        }
    }

    /// Paint the active slide and return the on-screen rect of each item.
    fn paint_slide(&self, painter: &egui::Painter, rect: egui::Rect) -> Vec<(ItemId, egui::Rect)> {
        painter.rect_filled(rect, 0.0, self.theme.slide_placeholder);

        let Some(slide) = self.editor.active_slide() else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No slides",
                egui::FontId::proportional(18.0),
                self.theme.caption,
            );
            return Vec::new();
        };

        painter.text(
            rect.left_bottom() + egui::vec2(8.0, -6.0),
            egui::Align2::LEFT_BOTTOM,
            &slide.image,
            egui::FontId::proportional(10.0),
            self.theme.caption,
        );

        let mut hits = Vec::with_capacity(slide.items.len());
        for item in &slide.items {
            let color = Theme::text_color(item.color);
            let galley = painter.layout_no_wrap(
                item.text.clone(),
                Theme::font_id(item.font_family, item.font_size, 1.0),
                color,
            );
            // Anchor the label's centre on its fractional position.
            let center = rect.min
                + egui::vec2(
                    item.position.x * rect.width(),
                    item.position.y * rect.height(),
                );
            let text_rect = egui::Rect::from_center_size(center, galley.size());
            let hit_rect = egui::Rect::from_center_size(
                center,
                galley.size().max(egui::vec2(12.0, item.font_size.get())),
            );

            if self.editor.selected_id() == Some(&item.id) {
                let frame = hit_rect.expand2(egui::vec2(4.0, 2.0));
                painter.rect_filled(frame, 4.0, self.theme.selection_fill);
                painter.rect_stroke(
                    frame,
                    4.0,
                    egui::Stroke::new(2.0, self.theme.selection_ring),
                    egui::StrokeKind::Outside,
                );
            }
            painter.galley(text_rect.min, galley, color);
            hits.push((item.id.clone(), hit_rect));
        }
        hits
    }

    fn handle_canvas_input(
        &mut self,
        ctx: &egui::Context,
        rect: egui::Rect,
        hits: &[(ItemId, egui::Rect)],
    ) {
        let (pressed, down, released, press_pos, latest_pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.press_origin(),
                i.pointer.latest_pos(),
            )
        });
        let (touch_end, cancelled, moved_to) = ctx.input(|i| {
            let mut end = false;
            let mut cancel = false;
            let mut moved_to = None;
            for event in &i.events {
                match event {
                    egui::Event::PointerMoved(p) => moved_to = Some(*p),
                    egui::Event::Touch { phase, .. } => match phase {
                        egui::TouchPhase::End => end = true,
                        egui::TouchPhase::Cancel => cancel = true,
                        _ => {}
                    },
                    egui::Event::PointerGone => cancel = true,
                    _ => {}
                }
            }
            (end, cancel, moved_to)
        });

        let mut acquired_now = false;
        if pressed {
            if let Some(origin) = press_pos.filter(|p| rect.contains(*p)) {
                // Topmost item wins: later items paint over earlier ones.
                match hits.iter().rev().find(|(_, r)| r.contains(origin)) {
                    Some((id, _)) => {
                        self.swipe_origin = None;
                        self.editor.handle_pointer(PointerEvent::DownOnItem {
                            item: id.clone(),
                            pointer: PointerPos::new(origin.x, origin.y),
                            rect: ContainerRect::new(
                                rect.left(),
                                rect.top(),
                                rect.width(),
                                rect.height(),
                            ),
                        });
                        acquired_now = self.editor.is_dragging();
                    }
                    None => {
                        self.swipe_origin = Some(origin);
                        self.editor.handle_pointer(PointerEvent::DownOnBackground);
                    }
                }
            }
        }

        // Only pointer motion after the press reaches the deck.
        if self.editor.is_dragging() && !acquired_now {
            if let Some(p) = moved_to {
                self.editor
                    .handle_pointer(PointerEvent::Move(PointerPos::new(p.x, p.y)));
            }
        }

        if touch_end {
            self.editor.handle_pointer(PointerEvent::TouchEnd);
        }
        if cancelled {
            self.editor.handle_pointer(PointerEvent::Cancel);
            self.swipe_origin = None;
        }
        if released {
            self.editor.handle_pointer(PointerEvent::Up);
            if let (Some(origin), Some(end)) = (self.swipe_origin.take(), latest_pos) {
                let dx = end.x - origin.x;
                if dx.abs() > SWIPE_THRESHOLD {
                    let direction = if dx < 0.0 {
                        Direction::Forward
                    } else {
                        Direction::Backward
                    };
                    self.editor.step(direction);
                }
            }
        }

        // A release we never saw as an event still ends the drag.
        if self.editor.is_dragging() && !down && !pressed {
            self.editor.release_drag(ReleaseCause::ButtonNotHeld);
        }

        if let Some(p) = latest_pos {
            if self.editor.is_dragging() || hits.iter().any(|(_, r)| r.contains(p)) {
                ctx.set_cursor_icon(egui::CursorIcon::Move);
            }
        }
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (right, left) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::ArrowLeft),
            )
        });
        if right {
            self.editor.step(Direction::Forward);
        }
        if left {
            self.editor.step(Direction::Backward);
        }
    }

    fn handle_focus(&mut self, ctx: &egui::Context) {
        let focused = ctx.input(|i| i.focused);
        if self.window_focused && !focused {
            self.editor.handle_pointer(PointerEvent::FocusLost);
        }
        self.window_focused = focused;
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_focus(ctx);
        self.handle_keyboard(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.draw_toolbar(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("carousel").show(ctx, |ui| {
            ui.add_space(4.0);
            self.draw_carousel_chrome(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.background).inner_margin(12.0))
            .show(ctx, |ui| {
                let rect = fit_aspect(ui.available_rect_before_wrap(), self.aspect.ratio());
                ui.allocate_rect(rect, egui::Sense::click_and_drag());
                let painter = ui.painter_at(rect);
                let hits = self.paint_slide(&painter, rect);
                self.handle_canvas_input(ctx, rect, &hits);
            });
    }
}

/// Largest rect of the given width/height ratio centred in `area`.
fn fit_aspect(area: egui::Rect, ratio: f32) -> egui::Rect {
    let mut width = area.width();
    let mut height = width / ratio;
    if height > area.height() {
        height = area.height();
        width = height * ratio;
    }
    egui::Rect::from_center_size(area.center(), egui::vec2(width, height))
}

pub fn run(fullscreen: bool, start_slide: usize) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let editor = Editor::new(starter_deck())
        .with_template(config.item_template())
        .with_release_on_focus_loss(config.release_on_focus_loss())
        .starting_at(start_slide);
    let aspect = config.aspect_ratio();

    info!(
        slides = editor.deck().len(),
        start = ?editor.active_index(),
        %aspect,
        "starting editor"
    );

    let viewport = if fullscreen {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title("slidetext")
    } else {
        egui::ViewportBuilder::default()
            .with_inner_size([720.0, 960.0])
            .with_title("slidetext")
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "slidetext",
        options,
        Box::new(move |_cc| Ok(Box::new(EditorApp::new(editor, aspect)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
