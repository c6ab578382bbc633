//! Background worker that runs blocking completion calls.

use crate::backend::{CompletionCmd, CompletionEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use ghostpad_core::completion::{request_completion, CompletionClient};
use std::thread;
use std::time::Instant;
use tracing::debug;

/// Handle for the completion worker.
pub struct CompletionHandle {
    pub cmd_tx: Sender<CompletionCmd>,
    pub evt_rx: Receiver<CompletionEvent>,
}

impl CompletionHandle {
    /// Handle wired to caller-owned channels with no worker thread behind it.
    pub fn from_test_channels(
        cmd_tx: Sender<CompletionCmd>,
        evt_rx: Receiver<CompletionEvent>,
    ) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

/// Spawn the thread that owns `client` and serves [`CompletionCmd`]s in order.
///
/// The controller never has more than one request outstanding, so the queue
/// stays at most one deep in practice. The thread exits when the handle is
/// dropped.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_completion_worker(client: Box<dyn CompletionClient>) -> CompletionHandle {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("ghostpad-completion".to_string())
        .spawn(move || {
            for cmd in cmd_rx.iter() {
                match cmd {
                    CompletionCmd::Request {
                        request_id,
                        text,
                        cursor,
                    } => {
                        let started = Instant::now();
                        let result = request_completion(client.as_ref(), &text, cursor);
                        debug!(
                            request_id,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            ok = result.is_ok(),
                            "completion finished"
                        );
                        let _ = evt_tx.send(CompletionEvent::Finished { request_id, result });
                    }
                }
            }
        })
        .expect("spawn completion worker");

    CompletionHandle { cmd_tx, evt_rx }
}
