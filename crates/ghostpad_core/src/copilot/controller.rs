//! Suggestion lifecycle: Idle, Loading, Offered, PartiallyConsumed.

use super::buffer::EditBuffer;
use super::scheduler::{Dispatch, DispatchGate, RequestScheduler, SchedulerTimings, Snapshot};
use super::suggestion::{LiveSuggestion, Reconciliation};
use crate::completion::CompletionError;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Shown after a throttling error.
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit reached. Suggestions paused for 60 seconds.";
/// Shown after a generic request failure.
pub const UNAVAILABLE_MESSAGE: &str = "Suggestions temporarily unavailable.";
/// Shown when the provider rejects the credential.
pub const UNAUTHORIZED_MESSAGE: &str = "Suggestions disabled: add a valid API key.";
/// Shown when no credential is configured.
pub const MISSING_KEY_MESSAGE: &str = "Suggestions disabled: no API key configured.";

/// Observable snapshot of the feature, for status display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopilotState {
    pub suggestion: Option<String>,
    pub is_loading: bool,
    pub is_enabled: bool,
    pub error: Option<String>,
}

/// Coarse lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopilotPhase {
    Idle,
    Loading,
    Offered,
    PartiallyConsumed,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Loading { request_id: u64, snapshot: Snapshot },
    Live(LiveSuggestion),
}

/// Owns the live suggestion and drives the scheduler.
///
/// Every method takes the current time; nothing here reads a clock.
#[derive(Debug)]
pub struct CopilotController {
    scheduler: RequestScheduler,
    phase: Phase,
    enabled: bool,
    available: bool,
    error: Option<String>,
}

impl CopilotController {
    /// Controller with a working client; `enabled` is the stored preference.
    pub fn new(enabled: bool) -> Self {
        Self::with_timings(enabled, SchedulerTimings::default())
    }

    pub fn with_timings(enabled: bool, timings: SchedulerTimings) -> Self {
        Self {
            scheduler: RequestScheduler::new(timings),
            phase: Phase::Idle,
            enabled,
            available: true,
            error: None,
        }
    }

    /// Controller whose client failed to initialize; the feature stays off.
    pub fn unavailable(error: &CompletionError) -> Self {
        let mut controller = Self::new(false);
        controller.mark_unavailable(error);
        controller
    }

    fn mark_unavailable(&mut self, error: &CompletionError) {
        self.available = false;
        self.enabled = false;
        self.scheduler.cancel_pending();
        if let Phase::Live(_) = self.phase {
            self.phase = Phase::Idle;
        }
        self.error = Some(
            match error {
                CompletionError::MissingCredential => MISSING_KEY_MESSAGE,
                _ => UNAUTHORIZED_MESSAGE,
            }
            .to_string(),
        );
        warn!(error = %error, "suggestions disabled");
    }

    pub fn phase(&self) -> CopilotPhase {
        match &self.phase {
            Phase::Idle => CopilotPhase::Idle,
            Phase::Loading { .. } => CopilotPhase::Loading,
            Phase::Live(live) if live.is_partially_consumed() => CopilotPhase::PartiallyConsumed,
            Phase::Live(_) => CopilotPhase::Offered,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// False once the client could not be created or the key was rejected.
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Ghost text to render, if a suggestion is live.
    pub fn display_suggestion(&self) -> Option<&str> {
        match &self.phase {
            Phase::Live(live) => Some(live.display()),
            _ => None,
        }
    }

    pub fn state(&self) -> CopilotState {
        CopilotState {
            suggestion: self.display_suggestion().map(str::to_string),
            is_loading: self.is_loading(),
            is_enabled: self.enabled,
            error: self.error.clone(),
        }
    }

    /// Handle a text change. `buffer` is the state after the edit.
    ///
    /// A live suggestion is reconciled against the edit; otherwise (or after
    /// a dismissal) the edit is a qualifying keystroke and goes to the
    /// scheduler.
    pub fn on_change(&mut self, buffer: &EditBuffer, now: Instant) {
        if !self.enabled || buffer.is_empty() {
            self.clear_live("not qualifying");
            self.scheduler.cancel_pending();
            return;
        }
        if self.reconcile(buffer) {
            return;
        }
        self.scheduler.schedule(buffer.text(), buffer.cursor(), now);
    }

    /// Handle a cursor-only move. Never schedules a request.
    pub fn on_cursor_move(&mut self, buffer: &EditBuffer) {
        self.reconcile(buffer);
    }

    /// Returns true when a suggestion is still live after the reconcile.
    fn reconcile(&mut self, buffer: &EditBuffer) -> bool {
        let Phase::Live(live) = &mut self.phase else {
            return false;
        };
        match live.reconcile(buffer) {
            Reconciliation::Unchanged => true,
            Reconciliation::Shrunk(rest) => {
                live.shrink_to(rest);
                true
            }
            Reconciliation::Dismiss(reason) => {
                debug!(?reason, "suggestion dismissed by edit");
                self.phase = Phase::Idle;
                false
            }
        }
    }

    /// Advance timers.
    ///
    /// # Returns
    /// A request the caller must run and later report via
    /// [`on_response`](Self::on_response).
    pub fn poll(&mut self, now: Instant) -> Option<Dispatch> {
        let gate = DispatchGate {
            enabled: self.enabled && self.available,
            loading: self.is_loading(),
            suggestion_live: matches!(self.phase, Phase::Live(_)),
        };
        let dispatch = self.scheduler.poll(now, gate)?;
        self.phase = Phase::Loading {
            request_id: dispatch.request_id,
            snapshot: dispatch.snapshot.clone(),
        };
        self.error = None;
        Some(dispatch)
    }

    /// Apply a completion result. `buffer` is the current editor state.
    ///
    /// A suggestion is only offered when the request's snapshot still equals
    /// the current buffer and cursor; stale results are dropped and the
    /// current buffer is rescheduled.
    ///
    /// # Returns
    /// `true` when a suggestion became live.
    pub fn on_response(
        &mut self,
        request_id: u64,
        result: Result<Option<String>, CompletionError>,
        buffer: &EditBuffer,
        now: Instant,
    ) -> bool {
        let snapshot = match &self.phase {
            Phase::Loading {
                request_id: expected,
                snapshot,
            } if *expected == request_id => snapshot.clone(),
            _ => {
                debug!(request_id, "ignoring response for a request no longer in flight");
                return false;
            }
        };
        self.phase = Phase::Idle;
        let current = snapshot.text == buffer.text() && snapshot.cursor == buffer.cursor();

        match result {
            Ok(Some(suggestion)) => {
                if !self.enabled || !current {
                    debug!(request_id, "dropping stale suggestion");
                    self.reschedule_stale(buffer, now);
                    return false;
                }
                match LiveSuggestion::offer(buffer, suggestion) {
                    Some(live) => {
                        self.phase = Phase::Live(live);
                        true
                    }
                    None => false,
                }
            }
            Ok(None) => {
                if !current {
                    self.reschedule_stale(buffer, now);
                }
                false
            }
            Err(err) if err.is_rate_limit() => {
                self.scheduler.enter_cooldown(now);
                self.error = Some(RATE_LIMIT_MESSAGE.to_string());
                info!("completion provider throttled; pausing suggestions");
                false
            }
            Err(err) if err.is_initialization() => {
                self.mark_unavailable(&err);
                false
            }
            Err(err) => {
                warn!(error = %err, "completion request failed");
                self.error = Some(UNAVAILABLE_MESSAGE.to_string());
                if !current {
                    self.reschedule_stale(buffer, now);
                }
                false
            }
        }
    }

    /// Request the newest input when the one in flight no longer matches it.
    fn reschedule_stale(&mut self, buffer: &EditBuffer, now: Instant) {
        if self.enabled && !buffer.is_empty() && !self.scheduler.has_pending() {
            debug!("rescheduling input typed during the request");
            self.scheduler.schedule(buffer.text(), buffer.cursor(), now);
        }
    }

    /// Insert the live remainder at the cursor and move the cursor past it.
    ///
    /// # Returns
    /// `false` (buffer untouched) when nothing is live.
    pub fn accept(&mut self, buffer: &mut EditBuffer) -> bool {
        let Phase::Live(live) = &self.phase else {
            return false;
        };
        buffer.insert_at_cursor(live.display());
        self.phase = Phase::Idle;
        true
    }

    /// Drop the live suggestion without touching the buffer.
    ///
    /// # Returns
    /// `false` when nothing was live.
    pub fn dismiss(&mut self) -> bool {
        self.clear_live("dismissed")
    }

    fn clear_live(&mut self, why: &'static str) -> bool {
        if matches!(self.phase, Phase::Live(_)) {
            debug!(why, "clearing suggestion");
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    /// Flip the feature on or off.
    ///
    /// # Returns
    /// The new enabled state. Enabling fails (stays `false`) when no client is
    /// available.
    pub fn toggle(&mut self) -> bool {
        let target = !self.enabled;
        self.set_enabled(target)
    }

    /// Set the enabled state; disabling clears any live suggestion.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if enabled && !self.available {
            return false;
        }
        self.enabled = enabled;
        if !enabled {
            self.clear_live("disabled");
            self.scheduler.cancel_pending();
        }
        self.enabled
    }

    /// Earliest instant at which [`poll`](Self::poll) may dispatch.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn cooldown_remaining(&self, now: Instant) -> Option<Duration> {
        self.scheduler.cooldown_remaining(now)
    }
}
