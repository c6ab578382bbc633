//! Request scheduling policy: debounce, minimum spacing, throttling cooldown.
//!
//! The scheduler is clock-free. Callers pass `now` into every method and call
//! [`RequestScheduler::poll`] whenever a deadline from
//! [`RequestScheduler::next_deadline`] may have passed (the GUI does this once
//! per frame). It holds no suggestion text; the controller decides what a
//! dispatch means.

use crate::constants::{MIN_REQUEST_INTERVAL, RATE_LIMIT_COOLDOWN, SUGGESTION_DEBOUNCE};
use std::time::{Duration, Instant};
use tracing::debug;

/// Timing knobs for [`RequestScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerTimings {
    /// Trailing-edge quiet window.
    pub debounce: Duration,
    /// Minimum spacing between two dispatches.
    pub min_interval: Duration,
    /// Quiet period after a throttling error.
    pub cooldown: Duration,
}

impl Default for SchedulerTimings {
    fn default() -> Self {
        Self {
            debounce: SUGGESTION_DEBOUNCE,
            min_interval: MIN_REQUEST_INTERVAL,
            cooldown: RATE_LIMIT_COOLDOWN,
        }
    }
}

/// Text and cursor a request is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub text: String,
    pub cursor: usize,
}

/// A request the caller should send now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub request_id: u64,
    pub snapshot: Snapshot,
}

/// Controller state the scheduler consults before dispatching.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchGate {
    pub enabled: bool,
    pub loading: bool,
    pub suggestion_live: bool,
}

impl DispatchGate {
    fn blocked_by(&self) -> Option<&'static str> {
        if !self.enabled {
            Some("disabled")
        } else if self.loading {
            Some("request in flight")
        } else if self.suggestion_live {
            Some("suggestion displayed")
        } else {
            None
        }
    }
}

/// Identifies an armed retry; replaced on every new arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryToken(u64);

#[derive(Debug)]
struct PendingDebounce {
    snapshot: Snapshot,
    fires_at: Instant,
}

#[derive(Debug)]
struct PendingRetry {
    token: RetryToken,
    snapshot: Snapshot,
    fires_at: Instant,
}

/// Debounces keystrokes into requests and spaces them out.
///
/// At most one retry is pending at a time, and any new [`schedule`] call
/// cancels it.
///
/// [`schedule`]: RequestScheduler::schedule
#[derive(Debug)]
pub struct RequestScheduler {
    timings: SchedulerTimings,
    debounce: Option<PendingDebounce>,
    latest_debounced: Option<Snapshot>,
    retry: Option<PendingRetry>,
    last_dispatch_at: Option<Instant>,
    cooldown_until: Option<Instant>,
    next_token: u64,
    next_request_id: u64,
}

impl Default for RequestScheduler {
    fn default() -> Self {
        Self::new(SchedulerTimings::default())
    }
}

impl RequestScheduler {
    pub fn new(timings: SchedulerTimings) -> Self {
        Self {
            timings,
            debounce: None,
            latest_debounced: None,
            retry: None,
            last_dispatch_at: None,
            cooldown_until: None,
            next_token: 0,
            next_request_id: 0,
        }
    }

    /// Register a qualifying keystroke.
    ///
    /// Restarts the debounce window and cancels any pending retry.
    pub fn schedule(&mut self, text: &str, cursor: usize, now: Instant) {
        if let Some(retry) = self.retry.take() {
            debug!(token = retry.token.0, "retry superseded by new keystroke");
        }
        self.debounce = Some(PendingDebounce {
            snapshot: Snapshot {
                text: text.to_string(),
                cursor,
            },
            fires_at: now + self.timings.debounce,
        });
    }

    /// Fire whichever timer is due and decide whether to dispatch.
    ///
    /// # Returns
    /// `Some(Dispatch)` when the caller should send a request now.
    pub fn poll(&mut self, now: Instant, gate: DispatchGate) -> Option<Dispatch> {
        if self.debounce.as_ref().is_some_and(|d| now >= d.fires_at) {
            let fired = self.debounce.take()?;
            self.latest_debounced = Some(fired.snapshot.clone());
            return self.debounced(fired.snapshot, now, gate);
        }
        if self.retry.as_ref().is_some_and(|r| now >= r.fires_at) {
            let fired = self.retry.take()?;
            return self.retried(fired, now, gate);
        }
        None
    }

    fn debounced(&mut self, snapshot: Snapshot, now: Instant, gate: DispatchGate) -> Option<Dispatch> {
        if self.in_cooldown(now) {
            debug!("debounced request dropped during cooldown");
            return None;
        }
        if let Some(reason) = gate.blocked_by() {
            debug!(reason, "debounced request dropped");
            return None;
        }
        if let Some(last) = self.last_dispatch_at {
            let ready_at = last + self.timings.min_interval;
            if now < ready_at {
                let token = RetryToken(self.next_token);
                self.next_token += 1;
                debug!(
                    token = token.0,
                    wait_ms = (ready_at - now).as_millis() as u64,
                    "request deferred by minimum interval"
                );
                self.retry = Some(PendingRetry {
                    token,
                    snapshot,
                    fires_at: ready_at,
                });
                return None;
            }
        }
        Some(self.dispatch(snapshot, now))
    }

    fn retried(&mut self, retry: PendingRetry, now: Instant, gate: DispatchGate) -> Option<Dispatch> {
        if self.in_cooldown(now) {
            debug!(token = retry.token.0, "retry dropped during cooldown");
            return None;
        }
        if self.latest_debounced.as_ref() != Some(&retry.snapshot) {
            debug!(token = retry.token.0, "retry dropped: snapshot is stale");
            return None;
        }
        if let Some(reason) = gate.blocked_by() {
            debug!(token = retry.token.0, reason, "retry dropped");
            return None;
        }
        Some(self.dispatch(retry.snapshot, now))
    }

    fn dispatch(&mut self, snapshot: Snapshot, now: Instant) -> Dispatch {
        self.next_request_id += 1;
        self.last_dispatch_at = Some(now);
        debug!(
            request_id = self.next_request_id,
            cursor = snapshot.cursor,
            "dispatching completion request"
        );
        Dispatch {
            request_id: self.next_request_id,
            snapshot,
        }
    }

    /// Start the throttling cooldown at `now` and drop any pending retry.
    pub fn enter_cooldown(&mut self, now: Instant) {
        self.cooldown_until = Some(now + self.timings.cooldown);
        if let Some(retry) = self.retry.take() {
            debug!(token = retry.token.0, "retry cancelled by cooldown");
        }
        debug!(
            cooldown_secs = self.timings.cooldown.as_secs(),
            "entering rate-limit cooldown"
        );
    }

    pub fn in_cooldown(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    /// Time left in the cooldown, if one is active.
    pub fn cooldown_remaining(&self, now: Instant) -> Option<Duration> {
        self.cooldown_until
            .filter(|until| now < *until)
            .map(|until| until - now)
    }

    /// Drop the pending debounce and retry (feature disabled, buffer cleared).
    pub fn cancel_pending(&mut self) {
        self.debounce = None;
        self.retry = None;
    }

    /// True when a debounce or retry timer is armed.
    pub fn has_pending(&self) -> bool {
        self.debounce.is_some() || self.retry.is_some()
    }

    pub fn pending_retry(&self) -> Option<RetryToken> {
        self.retry.as_ref().map(|retry| retry.token)
    }

    /// Earliest instant at which [`poll`](Self::poll) may do something.
    pub fn next_deadline(&self) -> Option<Instant> {
        let debounce = self.debounce.as_ref().map(|d| d.fires_at);
        let retry = self.retry.as_ref().map(|r| r.fires_at);
        match (debounce, retry) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
