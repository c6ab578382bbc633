//! Bottom status bar: save state, last save time and suggestion state.

use super::super::style::{COLOR_TEXT_MUTED, COLOR_TEXT_SECONDARY, COLOR_WARNING};
use super::super::{GhostpadApp, SaveStatus};
use chrono::Local;
use eframe::egui;
use std::time::Instant;

impl GhostpadApp {
    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let (label, color) = match self.save_status {
                        SaveStatus::Saved => ("Saved", COLOR_TEXT_SECONDARY),
                        SaveStatus::Dirty => ("Unsaved", COLOR_WARNING),
                        SaveStatus::Saving => ("Saving...", COLOR_TEXT_MUTED),
                    };
                    ui.label(egui::RichText::new(label).color(color));
                    if let Some(saved_at) = self.last_saved_at {
                        ui.label(
                            egui::RichText::new(format!(
                                "last saved {}",
                                saved_at.with_timezone(&Local).format("%H:%M:%S")
                            ))
                            .small()
                            .color(COLOR_TEXT_MUTED),
                        );
                    }
                    if let Some(status) = &self.status {
                        ui.separator();
                        ui.label(egui::RichText::new(&status.text).color(COLOR_WARNING));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let copilot_color = if self.copilot.error().is_some() {
                            COLOR_WARNING
                        } else {
                            COLOR_TEXT_SECONDARY
                        };
                        ui.label(
                            egui::RichText::new(self.copilot_status_text(now))
                                .small()
                                .color(copilot_color),
                        );
                        ui.separator();
                        ui.label(
                            egui::RichText::new(format!("{} chars", self.note.chars().count()))
                                .small()
                                .color(COLOR_TEXT_MUTED),
                        );
                        ui.separator();
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&self.db_path)
                                    .small()
                                    .monospace()
                                    .color(COLOR_TEXT_MUTED),
                            )
                            .truncate(),
                        );
                    });
                });
            });
    }
}
