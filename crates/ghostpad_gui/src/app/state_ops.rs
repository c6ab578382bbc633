//! Save, preference and shortcut handling for `GhostpadApp`.

use super::{GhostpadApp, SaveStatus};
use crate::backend::{CoreCmd, CoreErrorSource, CoreEvent};
use eframe::egui::{self, Key, KeyboardShortcut, Modifiers};
use std::time::Instant;
use tracing::{debug, error};

const FONT_STEP: f32 = 1.0;

impl GhostpadApp {
    pub(super) fn apply_event(&mut self, event: CoreEvent) {
        match event {
            CoreEvent::NoteSaved { revision, saved_at } => {
                self.save_in_flight = false;
                self.last_saved_at = Some(saved_at);
                // Edits made while the save was in flight keep the note dirty.
                if revision == self.edit_revision {
                    self.save_status = SaveStatus::Saved;
                } else {
                    debug!(
                        revision,
                        current = self.edit_revision,
                        "save acked for an older revision"
                    );
                    self.save_status = SaveStatus::Dirty;
                }
            }
            CoreEvent::PreferencesSaved => {}
            CoreEvent::Error { source, message } => {
                if source == CoreErrorSource::SaveNote {
                    self.save_in_flight = false;
                    self.save_status = SaveStatus::Dirty;
                    // Back off one autosave interval before retrying.
                    self.last_edit_at = Some(Instant::now());
                }
                self.set_status(message);
            }
        }
    }

    pub(super) fn mark_dirty(&mut self, now: Instant) {
        self.edit_revision = self.edit_revision.wrapping_add(1);
        self.save_status = SaveStatus::Dirty;
        self.last_edit_at = Some(now);
    }

    pub(super) fn maybe_autosave(&mut self, now: Instant) {
        if !self.preferences.auto_save || self.backend.is_none() {
            return;
        }
        if self.save_in_flight || self.save_status != SaveStatus::Dirty {
            return;
        }
        let Some(last_edit) = self.last_edit_at else {
            return;
        };
        if now.saturating_duration_since(last_edit) < self.autosave_delay {
            return;
        }
        let _sent = self.dispatch_save("Autosave");
    }

    /// Manual save; writes even when nothing changed so the timestamp refreshes.
    pub(super) fn save_now(&mut self) {
        if self.save_in_flight {
            return;
        }
        let _sent = self.dispatch_save("Save");
    }

    pub(super) fn dispatch_save(&mut self, mode: &str) -> bool {
        let command = CoreCmd::SaveNote {
            text: self.note.clone(),
            revision: self.edit_revision,
        };
        let sent = match &self.backend {
            Some(backend) => backend.cmd_tx.send(command).map_err(|err| err.to_string()),
            None => Err("store unavailable".to_string()),
        };
        match sent {
            Ok(()) => {
                self.save_in_flight = true;
                self.save_status = SaveStatus::Saving;
                true
            }
            Err(err) => {
                error!("{} dispatch failed: {}", mode, err);
                self.save_status = SaveStatus::Dirty;
                self.set_status(format!("{} failed: {}", mode, err));
                false
            }
        }
    }

    pub(super) fn save_preferences(&mut self) {
        self.preferences = self.preferences.clone().normalized();
        let Some(backend) = &self.backend else {
            return;
        };
        if backend
            .cmd_tx
            .send(CoreCmd::SavePreferences {
                preferences: self.preferences.clone(),
            })
            .is_err()
        {
            error!("preferences dispatch failed: store worker stopped");
        }
    }

    pub(super) fn adjust_font_size(&mut self, delta: f32) {
        let before = self.preferences.font_size;
        self.preferences.adjust_font_size(delta);
        if self.preferences.font_size != before {
            self.save_preferences();
        }
    }

    pub(super) fn toggle_autosave(&mut self) {
        self.preferences.auto_save = !self.preferences.auto_save;
        self.save_preferences();
        self.set_status(if self.preferences.auto_save {
            "Autosave on"
        } else {
            "Autosave off"
        });
    }

    pub(super) fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let save = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
        let grow = KeyboardShortcut::new(Modifiers::COMMAND, Key::Equals);
        let grow_plus = KeyboardShortcut::new(Modifiers::COMMAND, Key::Plus);
        let shrink = KeyboardShortcut::new(Modifiers::COMMAND, Key::Minus);

        let (save_pressed, grow_pressed, shrink_pressed) = ctx.input_mut(|input| {
            (
                input.consume_shortcut(&save),
                input.consume_shortcut(&grow) || input.consume_shortcut(&grow_plus),
                input.consume_shortcut(&shrink),
            )
        });
        if save_pressed {
            self.save_now();
        }
        if grow_pressed {
            self.adjust_font_size(FONT_STEP);
        }
        if shrink_pressed {
            self.adjust_font_size(-FONT_STEP);
        }
    }
}
