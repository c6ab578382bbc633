//! Theme constants and one-time style application for the egui app.

use super::GhostpadApp;
use eframe::egui::{
    self, style::WidgetVisuals, Color32, CornerRadius, FontFamily, FontId, Margin, Stroke,
    TextStyle, Visuals,
};

pub(super) const COLOR_BG_PRIMARY: Color32 = Color32::from_rgb(0x10, 0x13, 0x18);
pub(super) const COLOR_BG_SECONDARY: Color32 = Color32::from_rgb(0x18, 0x1c, 0x23);
pub(super) const COLOR_BG_TERTIARY: Color32 = Color32::from_rgb(0x22, 0x27, 0x2e);
pub(super) const COLOR_TEXT_PRIMARY: Color32 = Color32::from_rgb(0xd4, 0xd8, 0xde);
pub(super) const COLOR_TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8b, 0x94, 0x9e);
pub(super) const COLOR_TEXT_MUTED: Color32 = Color32::from_rgb(0x6e, 0x76, 0x81);
pub(super) const COLOR_GHOST_TEXT: Color32 = Color32::from_rgb(0x5c, 0x63, 0x70);
pub(super) const COLOR_ACCENT: Color32 = Color32::from_rgb(0x4f, 0x9d, 0xa6);
pub(super) const COLOR_ACCENT_HOVER: Color32 = Color32::from_rgb(0x3d, 0x84, 0x8c);
pub(super) const COLOR_WARNING: Color32 = Color32::from_rgb(0xe3, 0xb3, 0x41);
pub(super) const COLOR_BORDER: Color32 = Color32::from_rgb(0x30, 0x36, 0x3d);
const SELECTION_FILL_RGBA: [u8; 4] = [0x4f, 0x9d, 0xa6, 0x55];

/// Font used by both the editor and the ghost text.
pub(super) fn editor_font(size: f32) -> FontId {
    FontId::new(size, FontFamily::Monospace)
}

fn widget(fill: Color32, stroke: Color32, fg: Color32, expansion: f32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke::new(1.0, stroke),
        corner_radius: CornerRadius::same(6),
        fg_stroke: Stroke::new(1.0, fg),
        expansion,
    }
}

impl GhostpadApp {
    pub(super) fn ensure_style(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = Visuals::dark();
        style.visuals.override_text_color = Some(COLOR_TEXT_PRIMARY);
        style.visuals.window_fill = COLOR_BG_PRIMARY;
        style.visuals.panel_fill = COLOR_BG_SECONDARY;
        style.visuals.extreme_bg_color = COLOR_BG_PRIMARY;
        style.visuals.faint_bg_color = COLOR_BG_TERTIARY;
        style.visuals.window_stroke = Stroke::new(1.0, COLOR_BORDER);
        style.visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(
            SELECTION_FILL_RGBA[0],
            SELECTION_FILL_RGBA[1],
            SELECTION_FILL_RGBA[2],
            SELECTION_FILL_RGBA[3],
        );
        style.visuals.selection.stroke = Stroke::new(1.0, COLOR_ACCENT);
        style.visuals.text_edit_bg_color = Some(COLOR_BG_PRIMARY);

        style.visuals.widgets.noninteractive = widget(
            COLOR_BG_SECONDARY,
            COLOR_BORDER,
            COLOR_TEXT_SECONDARY,
            0.0,
        );
        style.visuals.widgets.inactive =
            widget(COLOR_BG_TERTIARY, COLOR_BORDER, COLOR_TEXT_PRIMARY, 0.0);
        style.visuals.widgets.hovered = widget(
            COLOR_ACCENT_HOVER,
            COLOR_ACCENT_HOVER,
            Color32::WHITE,
            0.5,
        );
        style.visuals.widgets.active = widget(COLOR_ACCENT, COLOR_ACCENT, Color32::WHITE, 0.5);
        style.visuals.widgets.open = widget(COLOR_ACCENT, COLOR_ACCENT, Color32::WHITE, 0.0);

        style.spacing.window_margin = Margin::same(12);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.item_spacing = egui::vec2(10.0, 8.0);
        style.spacing.interact_size.y = 30.0;

        style.text_styles.insert(
            TextStyle::Heading,
            FontId::new(20.0, FontFamily::Proportional),
        );
        style
            .text_styles
            .insert(TextStyle::Body, FontId::new(15.0, FontFamily::Proportional));
        style.text_styles.insert(
            TextStyle::Button,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
        self.style_applied = true;
    }
}
