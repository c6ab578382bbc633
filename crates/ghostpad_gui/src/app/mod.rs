//! Native egui app: a single note with autosave and inline suggestions.

mod copilot_flow;
mod measure;
mod shutdown;
mod state_feedback;
mod state_ops;
mod style;
mod ui;

#[cfg(test)]
mod tests;

use crate::backend::{
    spawn_backend, spawn_completion_worker, BackendHandle, CompletionHandle,
};
use chrono::{DateTime, Utc};
use eframe::egui;
use ghostpad_core::completion::{CompletionEndpoint, CompletionError, HttpCompletionClient};
use ghostpad_core::models::Preferences;
use ghostpad_core::{Config, CopilotController, Database};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [1100.0, 720.0];
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [640.0, 420.0];
const STATUS_TTL: Duration = Duration::from_secs(5);
const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_LIMIT: usize = 4;
const CHANNEL_POLL_INTERVAL: Duration = Duration::from_millis(50);
const EDITOR_ID: &str = "ghostpad_editor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveStatus {
    Saved,
    Dirty,
    Saving,
}

struct StatusMessage {
    text: String,
    expires_at: Instant,
}

struct ToastMessage {
    text: String,
    expires_at: Instant,
}

/// Persisted state read once at startup.
#[derive(Debug, Clone, Default)]
struct LoadedState {
    note: String,
    preferences: Preferences,
    last_saved_at: Option<DateTime<Utc>>,
}

/// Main egui application state.
pub(crate) struct GhostpadApp {
    backend: Option<BackendHandle>,
    completion: Option<CompletionHandle>,
    copilot: CopilotController,
    note: String,
    /// Char offset of the caret in `note`.
    cursor: usize,
    /// Caret to push into the editor widget on the next frame.
    pending_cursor: Option<usize>,
    edit_revision: u64,
    preferences: Preferences,
    status: Option<StatusMessage>,
    toasts: VecDeque<ToastMessage>,
    save_status: SaveStatus,
    last_edit_at: Option<Instant>,
    save_in_flight: bool,
    last_saved_at: Option<DateTime<Utc>>,
    autosave_delay: Duration,
    db_path: String,
    style_applied: bool,
    focus_editor_next: bool,
}

impl GhostpadApp {
    /// Open the store, load the note and start both workers.
    ///
    /// A store that cannot be opened leaves the app editing in memory with a
    /// status message; a missing or unusable credential leaves suggestions
    /// off.
    pub(crate) fn new() -> Self {
        let config = Config::from_env();
        let autosave_delay = Duration::from_millis(config.auto_save_interval);

        let db = match Database::open(&config.db_path) {
            Ok(db) => db,
            Err(err) => {
                error!("failed to open store at {}: {}", config.db_path, err);
                let (completion, copilot) =
                    build_completion(&config, None, Preferences::default().copilot_enabled);
                let mut app = Self::assemble(
                    None,
                    completion,
                    copilot,
                    LoadedState::default(),
                    autosave_delay,
                    config.db_path.clone(),
                );
                app.set_status(format!("Store unavailable, edits will not be saved: {}", err));
                return app;
            }
        };

        let loaded = load_state(&db);
        let stored_key = db.api_key().unwrap_or_else(|err| {
            warn!("failed to read stored API key: {}", err);
            None
        });
        let (completion, copilot) =
            build_completion(&config, stored_key, loaded.preferences.copilot_enabled);
        info!(
            db_path = %config.db_path,
            chars = loaded.note.chars().count(),
            suggestions = copilot.is_enabled(),
            "note loaded"
        );

        Self::assemble(
            Some(spawn_backend(db)),
            completion,
            copilot,
            loaded,
            autosave_delay,
            config.db_path.clone(),
        )
    }

    fn assemble(
        backend: Option<BackendHandle>,
        completion: Option<CompletionHandle>,
        copilot: CopilotController,
        loaded: LoadedState,
        autosave_delay: Duration,
        db_path: String,
    ) -> Self {
        let cursor = loaded.note.chars().count();
        Self {
            backend,
            completion,
            copilot,
            note: loaded.note,
            cursor,
            pending_cursor: Some(cursor),
            edit_revision: 0,
            preferences: loaded.preferences.normalized(),
            status: None,
            toasts: VecDeque::new(),
            save_status: SaveStatus::Saved,
            last_edit_at: None,
            save_in_flight: false,
            last_saved_at: loaded.last_saved_at,
            autosave_delay,
            db_path,
            style_applied: false,
            focus_editor_next: true,
        }
    }

    fn expire_feedback(&mut self, now: Instant) {
        if let Some(status) = &self.status {
            if now >= status.expires_at {
                self.status = None;
            }
        }
        while self
            .toasts
            .front()
            .map(|toast| now >= toast.expires_at)
            .unwrap_or(false)
        {
            self.toasts.pop_front();
        }
    }

    fn drain_backend_events(&mut self) {
        let events: Vec<_> = match &self.backend {
            Some(backend) => backend.evt_rx.try_iter().collect(),
            None => return,
        };
        for event in events {
            self.apply_event(event);
        }
    }

    /// Earliest instant at which some timer needs another frame.
    fn next_wakeup(&self, now: Instant) -> Option<Instant> {
        let mut deadlines: Vec<Instant> = Vec::new();
        if let Some(status) = &self.status {
            deadlines.push(status.expires_at);
        }
        if let Some(toast) = self.toasts.front() {
            deadlines.push(toast.expires_at);
        }
        if let Some(deadline) = self.copilot.next_deadline() {
            deadlines.push(deadline);
        }
        if self.preferences.auto_save && self.save_status == SaveStatus::Dirty {
            if let Some(last_edit) = self.last_edit_at {
                deadlines.push(last_edit + self.autosave_delay);
            }
        }
        if self.copilot.is_loading() || self.save_in_flight {
            deadlines.push(now + CHANNEL_POLL_INTERVAL);
        }
        if let Some(remaining) = self.copilot.cooldown_remaining(now) {
            deadlines.push(now + remaining.min(Duration::from_secs(1)));
        }
        deadlines.into_iter().min()
    }
}

fn load_state(db: &Database) -> LoadedState {
    let note = db.note().unwrap_or_else(|err| {
        warn!("failed to load note: {}", err);
        String::new()
    });
    let preferences = db.preferences().unwrap_or_else(|err| {
        warn!("failed to load preferences: {}", err);
        Preferences::default()
    });
    let last_saved_at = db.last_saved_at().unwrap_or_else(|err| {
        warn!("failed to load last-saved time: {}", err);
        None
    });
    LoadedState {
        note,
        preferences,
        last_saved_at,
    }
}

fn build_completion(
    config: &Config,
    stored_key: Option<String>,
    enabled: bool,
) -> (Option<CompletionHandle>, CopilotController) {
    let Some(api_key) = config.resolve_api_key(stored_key) else {
        return (
            None,
            CopilotController::unavailable(&CompletionError::MissingCredential),
        );
    };
    match HttpCompletionClient::new(CompletionEndpoint::from_config(config, api_key)) {
        Ok(client) => (
            Some(spawn_completion_worker(Box::new(client))),
            CopilotController::new(enabled),
        ),
        Err(err) => {
            warn!("completion client unavailable: {}", err);
            (None, CopilotController::unavailable(&err))
        }
    }
}

impl eframe::App for GhostpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_style(ctx);

        let now = Instant::now();
        self.expire_feedback(now);
        self.drain_backend_events();
        self.drain_completion_events(now);
        self.handle_shortcuts(ctx);

        self.render_header(ctx);
        self.render_status_bar(ctx);
        self.render_editor_panel(ctx);
        self.render_toasts(ctx);

        let now = Instant::now();
        self.poll_copilot(now);
        self.maybe_autosave(now);

        if let Some(deadline) = self.next_wakeup(now) {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.flush_for_shutdown();
    }
}
