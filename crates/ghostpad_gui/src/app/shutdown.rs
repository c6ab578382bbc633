//! Shutdown save-flush logic for `GhostpadApp`.

use super::{GhostpadApp, SaveStatus};
use std::time::Duration;
use tracing::warn;

const BACKEND_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

impl GhostpadApp {
    /// Queue a final save of unsaved edits, then stop the store worker.
    ///
    /// The store worker handles commands in order, so the final save lands
    /// before the shutdown command. Safe to call more than once.
    pub(super) fn flush_for_shutdown(&mut self) {
        // The completion worker exits once its command channel is dropped.
        self.completion = None;
        self.copilot.set_enabled(false);

        if self.backend.is_none() {
            if self.save_status != SaveStatus::Saved {
                warn!("exiting with unsaved edits: store unavailable");
            }
            return;
        }

        if self.save_status == SaveStatus::Dirty {
            // A stale in-flight save must not hold back the newest text.
            self.save_in_flight = false;
            if !self.dispatch_save("Shutdown save") {
                warn!("shutdown flush could not dispatch the final save");
            }
        }

        if let Some(backend) = self.backend.as_mut() {
            if let Err(err) = backend.shutdown_and_join(BACKEND_SHUTDOWN_TIMEOUT) {
                warn!(error = %err, "store worker did not stop cleanly");
            }
        }
        self.drain_backend_events();
        self.backend = None;
    }
}
