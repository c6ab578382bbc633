use super::*;

#[test]
fn on_exit_flushes_dirty_note_before_shutdown() {
    let mut harness = make_app("");
    type_note(&mut harness, "unsaved tail", Instant::now());

    eframe::App::on_exit(&mut harness.app, None);

    match recv_cmd(&harness.cmd_rx) {
        CoreCmd::SaveNote { text, revision } => {
            assert_eq!(text, "unsaved tail");
            assert_eq!(revision, 1);
        }
        other => panic!("unexpected command: {:?}", other),
    }
    assert!(matches!(recv_cmd(&harness.cmd_rx), CoreCmd::Shutdown));
    assert!(harness.app.backend.is_none());
    assert!(harness.app.completion.is_none());
}

#[test]
fn on_exit_with_clean_note_only_stops_the_worker() {
    let mut harness = make_app("already saved");
    eframe::App::on_exit(&mut harness.app, None);
    assert!(matches!(recv_cmd(&harness.cmd_rx), CoreCmd::Shutdown));
    assert!(harness.cmd_rx.try_recv().is_err());
}

#[test]
fn on_exit_requeues_edits_made_after_an_in_flight_save() {
    let mut harness = make_app("");
    let t0 = Instant::now();
    type_note(&mut harness, "v1", t0);
    harness.app.save_now();
    let _ = recv_cmd(&harness.cmd_rx);
    type_note(&mut harness, "v1 and more", t0 + ms(10));

    eframe::App::on_exit(&mut harness.app, None);
    match recv_cmd(&harness.cmd_rx) {
        CoreCmd::SaveNote { text, revision } => {
            assert_eq!(text, "v1 and more");
            assert_eq!(revision, 2);
        }
        other => panic!("unexpected command: {:?}", other),
    }
    assert!(matches!(recv_cmd(&harness.cmd_rx), CoreCmd::Shutdown));
}

#[test]
fn on_exit_twice_is_harmless() {
    let mut harness = make_app("");
    eframe::App::on_exit(&mut harness.app, None);
    eframe::App::on_exit(&mut harness.app, None);
    assert!(matches!(recv_cmd(&harness.cmd_rx), CoreCmd::Shutdown));
    assert!(harness.cmd_rx.try_recv().is_err());
}
