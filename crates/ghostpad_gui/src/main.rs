//! Standalone editor binary; the `ghostpad` CLI launches the same window.

fn main() {
    let exit_code = run_and_report(ghostpad_gui::run);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Message printed when the editor window fails to start or exits with an error.
fn failure_message(err: &dyn std::fmt::Display) -> String {
    format!(
        "ghostpad: the editor stopped unexpectedly: {}\n\
         unsaved edits may be lost; set RUST_LOG=ghostpad_gui=debug for details",
        err
    )
}

fn run_and_report<F, E>(open_editor: F) -> i32
where
    F: FnOnce() -> Result<(), E>,
    E: std::fmt::Display,
{
    match open_editor() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", failure_message(&err));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{failure_message, run_and_report};

    #[test]
    fn clean_editor_exit_maps_to_zero() {
        assert_eq!(run_and_report(|| Ok::<(), &str>(())), 0);
    }

    #[test]
    fn editor_failure_maps_to_one_and_names_the_cause() {
        assert_eq!(run_and_report(|| Err::<(), &str>("no adapter")), 1);
        let message = failure_message(&"no adapter");
        assert!(message.starts_with("ghostpad: the editor stopped unexpectedly: no adapter"));
        assert!(message.contains("RUST_LOG"));
    }
}
