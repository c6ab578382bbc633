//! App-level tests that drive state transitions through fake worker channels.

use super::*;
use crate::backend::{BackendHandle, CompletionCmd, CompletionEvent, CompletionHandle, CoreCmd, CoreEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use ghostpad_core::completion::CompletionError;

mod editor_panel;
mod shutdown_behavior;

struct TestHarness {
    app: GhostpadApp,
    cmd_rx: Receiver<CoreCmd>,
    evt_tx: Sender<CoreEvent>,
    completion_rx: Receiver<CompletionCmd>,
    completion_tx: Sender<CompletionEvent>,
}

fn make_app(note: &str) -> TestHarness {
    make_app_with(note, CopilotController::new(true))
}

fn make_app_with(note: &str, copilot: CopilotController) -> TestHarness {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();
    let (completion_cmd_tx, completion_rx) = unbounded();
    let (completion_tx, completion_evt_rx) = unbounded();
    let app = GhostpadApp::assemble(
        Some(BackendHandle::from_test_channels(cmd_tx, evt_rx)),
        Some(CompletionHandle::from_test_channels(
            completion_cmd_tx,
            completion_evt_rx,
        )),
        copilot,
        LoadedState {
            note: note.to_string(),
            ..LoadedState::default()
        },
        Duration::from_millis(2_000),
        "test-db".to_string(),
    );
    TestHarness {
        app,
        cmd_rx,
        evt_tx,
        completion_rx,
        completion_tx,
    }
}

fn recv_cmd(rx: &Receiver<CoreCmd>) -> CoreCmd {
    rx.recv_timeout(Duration::from_millis(200))
        .expect("expected backend command")
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Replace the note as if typed, caret at the end.
fn type_note(harness: &mut TestHarness, text: &str, now: Instant) {
    harness.app.note = text.to_string();
    harness.app.cursor = text.chars().count();
    harness.app.handle_note_edited(now);
}

/// Let the debounce fire and return the dispatched request id.
fn dispatch_after_debounce(harness: &mut TestHarness, typed_at: Instant) -> u64 {
    harness.app.poll_copilot(typed_at + ms(600));
    match harness
        .completion_rx
        .try_recv()
        .expect("expected completion request")
    {
        CompletionCmd::Request { request_id, .. } => request_id,
    }
}

fn respond(
    harness: &mut TestHarness,
    request_id: u64,
    result: Result<Option<String>, CompletionError>,
    now: Instant,
) {
    harness
        .completion_tx
        .send(CompletionEvent::Finished { request_id, result })
        .expect("send completion");
    harness.app.drain_completion_events(now);
}

/// Bring a suggestion live for the current note, caret at the end.
fn offer_suggestion(harness: &mut TestHarness, suggestion: &str, now: Instant) {
    let buffer = harness.app.edit_buffer();
    harness.app.copilot.on_change(&buffer, now);
    let request_id = dispatch_after_debounce(harness, now);
    respond(
        harness,
        request_id,
        Ok(Some(suggestion.to_string())),
        now + ms(700),
    );
    assert_eq!(harness.app.copilot.display_suggestion(), Some(suggestion));
}
