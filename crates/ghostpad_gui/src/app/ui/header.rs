//! Top bar: save, autosave, font size and the suggestions toggle.

use super::super::style::{COLOR_ACCENT, COLOR_TEXT_MUTED};
use super::super::GhostpadApp;
use eframe::egui;
use ghostpad_core::constants::{MAX_FONT_SIZE, MIN_FONT_SIZE};

impl GhostpadApp {
    pub(crate) fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(egui::RichText::new("Ghostpad").color(COLOR_ACCENT));
                    ui.separator();

                    if ui.button("Save").on_hover_text("Ctrl+S").clicked() {
                        self.save_now();
                        self.focus_editor_next = true;
                    }
                    let mut auto_save = self.preferences.auto_save;
                    if ui.checkbox(&mut auto_save, "Autosave").changed() {
                        self.toggle_autosave();
                    }
                    ui.separator();

                    let font_size = self.preferences.font_size;
                    if ui
                        .add_enabled(font_size > MIN_FONT_SIZE, egui::Button::new("A-"))
                        .clicked()
                    {
                        self.adjust_font_size(-1.0);
                    }
                    ui.label(
                        egui::RichText::new(format!("{:.0}px", font_size))
                            .small()
                            .color(COLOR_TEXT_MUTED),
                    );
                    if ui
                        .add_enabled(font_size < MAX_FONT_SIZE, egui::Button::new("A+"))
                        .clicked()
                    {
                        self.adjust_font_size(1.0);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let enabled = self.copilot.is_enabled();
                        let label = if enabled {
                            "Suggestions: on"
                        } else {
                            "Suggestions: off"
                        };
                        let mut response = ui.selectable_label(enabled, label);
                        if let Some(error) = self.copilot.error() {
                            response = response.on_hover_text(error);
                        }
                        if response.clicked() {
                            self.toggle_copilot();
                            self.focus_editor_next = true;
                        }
                    });
                });
            });
    }
}
