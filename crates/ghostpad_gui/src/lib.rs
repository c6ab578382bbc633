//! Ghostpad desktop app library entry point.
//!
//! Exposes a `run` helper so the workspace root can launch the UI without
//! duplicating initialization logic.

mod app;
/// Background workers + protocol types used by the GUI and headless tests.
pub mod backend;

use app::GhostpadApp;
use eframe::egui;
use ghostpad_core::config::env_flag_enabled;
use tracing_subscriber::filter::{Directive, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "ghostpad=warn,ghostpad_gui=info";
const COPILOT_TRACE_DIRECTIVE: &str = "ghostpad_core::copilot=debug";

fn suppress_vulkan_loader_debug() {
    if std::env::var("GHOSTPAD_KEEP_VK_DEBUG").is_ok() {
        return;
    }
    std::env::remove_var("VK_LOADER_DEBUG");
}

/// Build the log filter from `RUST_LOG`, falling back to the app default.
///
/// `GHOSTPAD_COPILOT_TRACE` adds per-decision scheduler logging on top.
pub fn log_filter() -> EnvFilter {
    let mut filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    if env_flag_enabled("GHOSTPAD_COPILOT_TRACE") {
        if let Ok(directive) = COPILOT_TRACE_DIRECTIVE.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_target(false)
        .compact()
        .try_init();
}

/// Start the desktop UI with tracing enabled.
///
/// # Returns
/// The result of `eframe::run_native`.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error. A store that
/// cannot be opened is not an error; the app then edits in memory only.
pub fn run() -> eframe::Result<()> {
    suppress_vulkan_loader_debug();
    init_tracing();

    let app = GhostpadApp::new();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("Ghostpad"),
        ..Default::default()
    };

    eframe::run_native("Ghostpad", options, Box::new(|_cc| Ok(Box::new(app))))
}

#[cfg(test)]
mod tests {
    use super::log_filter;
    use ghostpad_core::env::{env_lock, EnvGuard};

    #[test]
    fn copilot_trace_flag_adds_scheduler_debug_directive() {
        let _lock = env_lock().lock().expect("env lock");
        let _rust_log = EnvGuard::remove("RUST_LOG");

        let _trace = EnvGuard::remove("GHOSTPAD_COPILOT_TRACE");
        let quiet = log_filter().to_string();
        assert!(quiet.contains("ghostpad_gui=info"));
        assert!(!quiet.contains("ghostpad_core::copilot=debug"));

        let _trace = EnvGuard::set("GHOSTPAD_COPILOT_TRACE", "1");
        assert!(log_filter()
            .to_string()
            .contains("ghostpad_core::copilot=debug"));
    }
}
