//! Glue between the editor widget, the suggestion controller and the
//! completion worker.

use super::GhostpadApp;
use crate::backend::{CompletionCmd, CompletionEvent};
use ghostpad_core::completion::CompletionError;
use ghostpad_core::copilot::Dispatch;
use ghostpad_core::EditBuffer;
use std::time::Instant;
use tracing::{info, warn};

impl GhostpadApp {
    pub(super) fn edit_buffer(&self) -> EditBuffer {
        EditBuffer::new(self.note.clone(), self.cursor)
    }

    /// The editor changed the text; `self.note` and `self.cursor` are current.
    pub(super) fn handle_note_edited(&mut self, now: Instant) {
        self.mark_dirty(now);
        let buffer = self.edit_buffer();
        self.copilot.on_change(&buffer, now);
    }

    pub(super) fn handle_cursor_moved(&mut self) {
        let buffer = self.edit_buffer();
        self.copilot.on_cursor_move(&buffer);
    }

    /// Hand a due request to the completion worker.
    pub(super) fn poll_copilot(&mut self, now: Instant) {
        let Some(Dispatch {
            request_id,
            snapshot,
        }) = self.copilot.poll(now)
        else {
            return;
        };
        let sent = match &self.completion {
            Some(completion) => completion
                .cmd_tx
                .send(CompletionCmd::Request {
                    request_id,
                    text: snapshot.text,
                    cursor: snapshot.cursor,
                })
                .is_ok(),
            None => false,
        };
        if !sent {
            warn!(request_id, "completion worker unavailable");
            self.apply_completion(
                request_id,
                Err(CompletionError::Request(
                    "completion worker unavailable".to_string(),
                )),
                now,
            );
        }
    }

    pub(super) fn drain_completion_events(&mut self, now: Instant) {
        let events: Vec<_> = match &self.completion {
            Some(completion) => completion.evt_rx.try_iter().collect(),
            None => return,
        };
        for event in events {
            match event {
                CompletionEvent::Finished { request_id, result } => {
                    self.apply_completion(request_id, result, now);
                }
            }
        }
    }

    fn apply_completion(
        &mut self,
        request_id: u64,
        result: Result<Option<String>, CompletionError>,
        now: Instant,
    ) {
        let previous_error = self.copilot.error().map(str::to_owned);
        let buffer = self.edit_buffer();
        self.copilot.on_response(request_id, result, &buffer, now);
        let error = self.copilot.error().map(str::to_owned);
        if error.is_some() && error != previous_error {
            if let Some(message) = error {
                self.set_status(message);
            }
        }
    }

    /// Tab: splice the live suggestion in and move the caret past it.
    pub(super) fn accept_suggestion(&mut self, now: Instant) -> bool {
        let mut buffer = self.edit_buffer();
        if !self.copilot.accept(&mut buffer) {
            return false;
        }
        self.cursor = buffer.cursor();
        self.note = buffer.into_text();
        self.pending_cursor = Some(self.cursor);
        self.mark_dirty(now);
        true
    }

    /// Escape: drop the live suggestion, leaving the text alone.
    pub(super) fn dismiss_suggestion(&mut self) -> bool {
        self.copilot.dismiss()
    }

    pub(super) fn toggle_copilot(&mut self) {
        let was_enabled = self.copilot.is_enabled();
        let enabled = self.copilot.toggle();
        if enabled == was_enabled {
            let message = self
                .copilot
                .error()
                .unwrap_or("Suggestions are unavailable.")
                .to_string();
            self.set_status(message);
            return;
        }
        info!(enabled, "suggestions toggled");
        self.preferences.copilot_enabled = enabled;
        self.save_preferences();
        self.set_status(if enabled {
            "Suggestions on"
        } else {
            "Suggestions off"
        });
    }
}
