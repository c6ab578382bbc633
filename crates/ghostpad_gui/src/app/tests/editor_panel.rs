use super::*;
use eframe::egui::{self, Key, Modifiers};

fn key_press(key: Key) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: Modifiers::NONE,
    }
}

fn run_editor_frame(app: &mut GhostpadApp, ctx: &egui::Context, events: Vec<egui::Event>) {
    let input = egui::RawInput {
        events,
        ..Default::default()
    };
    let _ = ctx.run(input, |ctx| app.render_editor_panel(ctx));
}

fn focused_harness(note: &str) -> (TestHarness, egui::Context) {
    let mut harness = make_app(note);
    let ctx = egui::Context::default();
    run_editor_frame(&mut harness.app, &ctx, Vec::new());
    run_editor_frame(&mut harness.app, &ctx, Vec::new());
    assert!(ctx.memory(|memory| memory.has_focus(egui::Id::new(EDITOR_ID))));
    (harness, ctx)
}

#[test]
fn first_frames_focus_editor_with_caret_at_end() {
    let (harness, _ctx) = focused_harness("hello world");
    assert_eq!(harness.app.cursor, 11);
    assert!(harness.app.pending_cursor.is_none());
    assert!(!harness.app.focus_editor_next);
    assert_eq!(harness.app.save_status, SaveStatus::Saved);
}

#[test]
fn tab_accepts_live_suggestion_in_focused_editor() {
    let (mut harness, ctx) = focused_harness("Dear team, thanks for the");
    offer_suggestion(&mut harness, " quick reply", Instant::now());

    // Ghost text frame paints without touching the note.
    run_editor_frame(&mut harness.app, &ctx, Vec::new());
    assert_eq!(harness.app.note, "Dear team, thanks for the");

    run_editor_frame(&mut harness.app, &ctx, vec![key_press(Key::Tab)]);
    assert_eq!(harness.app.note, "Dear team, thanks for the quick reply");
    assert_eq!(harness.app.cursor, 37);
    assert_eq!(harness.app.copilot.display_suggestion(), None);
    assert_eq!(harness.app.save_status, SaveStatus::Dirty);
}

#[test]
fn escape_dismisses_live_suggestion_in_focused_editor() {
    let (mut harness, ctx) = focused_harness("Dear team, thanks for the");
    offer_suggestion(&mut harness, " quick reply", Instant::now());
    run_editor_frame(&mut harness.app, &ctx, Vec::new());

    run_editor_frame(&mut harness.app, &ctx, vec![key_press(Key::Escape)]);
    assert_eq!(harness.app.note, "Dear team, thanks for the");
    assert_eq!(harness.app.copilot.display_suggestion(), None);
    assert!(ctx.memory(|memory| memory.has_focus(egui::Id::new(EDITOR_ID))));
}
