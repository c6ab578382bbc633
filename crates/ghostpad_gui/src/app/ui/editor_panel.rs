//! Central editor panel: the note `TextEdit` plus ghost text at the caret.

use super::super::measure::EguiTextMeasure;
use super::super::style::{editor_font, COLOR_GHOST_TEXT, COLOR_TEXT_PRIMARY};
use super::super::{GhostpadApp, EDITOR_ID};
use eframe::egui::{
    self,
    text::{CCursor, CCursorRange, LayoutJob},
    Key, Modifiers,
};
use ghostpad_core::copilot::OverlayPositioner;
use std::time::Instant;

impl GhostpadApp {
    pub(crate) fn render_editor_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let editor_id = egui::Id::new(EDITOR_ID);
            let focused = ui.memory(|memory| memory.has_focus(editor_id));
            let suggestion_live = self.copilot.display_suggestion().is_some();

            // Tab and Escape belong to the suggestion only while one is shown.
            if focused && suggestion_live {
                let (tab, escape) = ui.input_mut(|input| {
                    (
                        input.consume_key(Modifiers::NONE, Key::Tab),
                        input.consume_key(Modifiers::NONE, Key::Escape),
                    )
                });
                if tab {
                    self.accept_suggestion(Instant::now());
                } else if escape {
                    self.dismiss_suggestion();
                }
            }

            if let Some(cursor) = self.pending_cursor.take() {
                let mut state = egui::TextEdit::load_state(ui.ctx(), editor_id).unwrap_or_default();
                state
                    .cursor
                    .set_char_range(Some(CCursorRange::one(CCursor::new(cursor))));
                state.store(ui.ctx(), editor_id);
            }

            let font_id = editor_font(self.preferences.font_size);
            let layout_font = font_id.clone();
            // No wrapping: ghost-text placement assumes one row per line.
            let mut layouter = |ui: &egui::Ui, text: &dyn egui::TextBuffer, _wrap_width: f32| {
                let job = LayoutJob::simple(
                    text.as_str().to_owned(),
                    layout_font.clone(),
                    COLOR_TEXT_PRIMARY,
                    f32::INFINITY,
                );
                ui.fonts_mut(|fonts| fonts.layout_job(job))
            };

            egui::ScrollArea::both()
                .id_salt("editor_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let output = egui::TextEdit::multiline(&mut self.note)
                        .id(editor_id)
                        .font(font_id.clone())
                        .desired_width(f32::INFINITY)
                        .desired_rows(24)
                        .lock_focus(true)
                        .hint_text("Start writing...")
                        .layouter(&mut layouter)
                        .show(ui);
                    ui.memory_mut(|mem| {
                        mem.set_focus_lock_filter(
                            editor_id,
                            egui::EventFilter {
                                tab: true,
                                horizontal_arrows: true,
                                vertical_arrows: true,
                                // Keep focus on Escape while it dismisses a suggestion.
                                escape: suggestion_live,
                            },
                        )
                    });

                    if self.focus_editor_next {
                        output.response.request_focus();
                        self.focus_editor_next = false;
                    }

                    let cursor = output
                        .cursor_range
                        .map(|range| range.primary.index)
                        .unwrap_or(self.cursor);
                    if output.response.changed() {
                        self.cursor = cursor;
                        self.handle_note_edited(Instant::now());
                    } else if cursor != self.cursor {
                        self.cursor = cursor;
                        self.handle_cursor_moved();
                    }

                    let Some(suggestion) = self.copilot.display_suggestion() else {
                        return;
                    };
                    let measure = EguiTextMeasure::new(ui.ctx(), font_id.family.clone());
                    let padding = output.galley_pos - output.response.rect.min;
                    let positioner = OverlayPositioner {
                        padding_left: padding.x,
                        padding_top: padding.y,
                        font: measure.metrics(&font_id),
                    };
                    let buffer = self.edit_buffer();
                    let Some(position) = positioner.locate(&buffer, Some(suggestion), &measure)
                    else {
                        return;
                    };
                    let ghost = ui.fonts_mut(|fonts| {
                        fonts.layout_no_wrap(suggestion.to_owned(), font_id.clone(), COLOR_GHOST_TEXT)
                    });
                    let origin = output.response.rect.min + egui::vec2(position.x, position.y);
                    ui.painter_at(output.response.rect)
                        .galley(origin, ghost, COLOR_GHOST_TEXT);
                });
        });
    }
}
