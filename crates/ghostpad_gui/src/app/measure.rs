//! egui-backed text measurement for ghost-text placement.

use eframe::egui::{self, Color32, FontFamily, FontId};
use ghostpad_core::copilot::{FontMetrics, TextMeasure};

/// Measures with the same font shaping the editor galley uses.
pub(super) struct EguiTextMeasure<'a> {
    ctx: &'a egui::Context,
    family: FontFamily,
}

impl<'a> EguiTextMeasure<'a> {
    pub(super) fn new(ctx: &'a egui::Context, family: FontFamily) -> Self {
        Self { ctx, family }
    }

    /// Size and row height of `font` as laid out by egui.
    pub(super) fn metrics(&self, font: &FontId) -> FontMetrics {
        let line_height = self.ctx.fonts_mut(|fonts| {
            fonts
                .layout_no_wrap("x".to_owned(), font.clone(), Color32::PLACEHOLDER)
                .size()
                .y
        });
        FontMetrics {
            size: font.size,
            line_height,
        }
    }
}

impl TextMeasure for EguiTextMeasure<'_> {
    fn measure_width(&self, text: &str, font: &FontMetrics) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let font_id = FontId::new(font.size, self.family.clone());
        self.ctx.fonts_mut(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), font_id, Color32::PLACEHOLDER)
                .size()
                .x
        })
    }
}
