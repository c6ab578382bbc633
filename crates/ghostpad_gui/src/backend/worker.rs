//! Background worker thread for store access.

use crate::backend::{CoreCmd, CoreErrorSource, CoreEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use ghostpad_core::Database;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error};

const JOIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Handle for sending commands to, and receiving events from, the store worker.
pub struct BackendHandle {
    pub cmd_tx: Sender<CoreCmd>,
    pub evt_rx: Receiver<CoreEvent>,
    worker: Option<JoinHandle<()>>,
}

impl BackendHandle {
    /// Handle wired to caller-owned channels with no worker thread behind it.
    pub fn from_test_channels(cmd_tx: Sender<CoreCmd>, evt_rx: Receiver<CoreEvent>) -> Self {
        Self {
            cmd_tx,
            evt_rx,
            worker: None,
        }
    }

    /// Ask the worker to stop after pending commands and wait for it.
    ///
    /// # Errors
    /// Returns a message when the worker does not exit within `timeout` or
    /// panicked.
    pub fn shutdown_and_join(&mut self, timeout: Duration) -> Result<(), String> {
        let _ = self.cmd_tx.send(CoreCmd::Shutdown);
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        let deadline = Instant::now() + timeout;
        while !worker.is_finished() {
            if Instant::now() >= deadline {
                return Err(format!(
                    "store worker still running after {}ms",
                    timeout.as_millis()
                ));
            }
            thread::sleep(JOIN_POLL_INTERVAL);
        }
        worker
            .join()
            .map_err(|_| "store worker panicked".to_string())
    }
}

fn send_error(evt_tx: &Sender<CoreEvent>, source: CoreErrorSource, message: String) {
    let _ = evt_tx.send(CoreEvent::Error { source, message });
}

/// Spawn the worker thread that performs blocking store writes.
///
/// All I/O stays off the UI thread; the worker replies with [`CoreEvent`]
/// values that are polled each frame. Commands run in order, so a
/// [`CoreCmd::Shutdown`] sent after a save is processed after that save.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_backend(db: Database) -> BackendHandle {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    let worker = thread::Builder::new()
        .name("ghostpad-store".to_string())
        .spawn(move || {
            for cmd in cmd_rx.iter() {
                match cmd {
                    CoreCmd::SaveNote { text, revision } => match db.save_note(&text) {
                        Ok(saved_at) => {
                            debug!(revision, chars = text.chars().count(), "note saved");
                            let _ = evt_tx.send(CoreEvent::NoteSaved { revision, saved_at });
                        }
                        Err(err) => {
                            error!("note save failed: {}", err);
                            send_error(
                                &evt_tx,
                                CoreErrorSource::SaveNote,
                                format!("Save failed: {}", err),
                            );
                        }
                    },
                    CoreCmd::SavePreferences { preferences } => {
                        match db.set_preferences(&preferences) {
                            Ok(()) => {
                                let _ = evt_tx.send(CoreEvent::PreferencesSaved);
                            }
                            Err(err) => {
                                error!("preferences save failed: {}", err);
                                send_error(
                                    &evt_tx,
                                    CoreErrorSource::SavePreferences,
                                    format!("Preferences not saved: {}", err),
                                );
                            }
                        }
                    }
                    CoreCmd::Shutdown => break,
                }
            }
        })
        .expect("spawn store worker");

    BackendHandle {
        cmd_tx,
        evt_rx,
        worker: Some(worker),
    }
}
