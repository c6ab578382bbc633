//! UI-facing feedback helpers for status and toasts.

use super::{GhostpadApp, StatusMessage, ToastMessage, STATUS_TTL, TOAST_LIMIT, TOAST_TTL};
use std::time::Instant;

impl GhostpadApp {
    /// Sets the status banner message and mirrors it into the toast queue.
    pub(super) fn set_status(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.status = Some(StatusMessage {
            text: text.clone(),
            expires_at: Instant::now() + STATUS_TTL,
        });
        self.push_toast(text);
    }

    fn push_toast(&mut self, text: String) {
        let now = Instant::now();
        if let Some(last) = self.toasts.back_mut() {
            if last.text == text {
                last.expires_at = now + TOAST_TTL;
                return;
            }
        }
        self.toasts.push_back(ToastMessage {
            text,
            expires_at: now + TOAST_TTL,
        });
        while self.toasts.len() > TOAST_LIMIT {
            self.toasts.pop_front();
        }
    }

    /// One-line description of the suggestion feature for the status bar.
    pub(super) fn copilot_status_text(&self, now: Instant) -> String {
        if !self.copilot.is_enabled() {
            return match self.copilot.error() {
                Some(error) => error.to_string(),
                None => "Suggestions off".to_string(),
            };
        }
        if let Some(remaining) = self.copilot.cooldown_remaining(now) {
            return format!("Suggestions paused ({}s)", remaining.as_secs().max(1));
        }
        if self.copilot.is_loading() {
            return "Thinking…".to_string();
        }
        if self.copilot.display_suggestion().is_some() {
            return "Tab to accept, Esc to dismiss".to_string();
        }
        match self.copilot.error() {
            Some(error) => error.to_string(),
            None => "Suggestions on".to_string(),
        }
    }
}
