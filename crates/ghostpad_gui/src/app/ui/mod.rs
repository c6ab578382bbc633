//! UI panels rendered by the main update loop.

/// Multiline editor with the ghost-text overlay.
pub(super) mod editor_panel;
/// Top bar controls.
pub(super) mod header;
/// Bottom status bar content.
pub(super) mod status_bar;
/// Transient toast notifications.
pub(super) mod toasts;
