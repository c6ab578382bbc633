//! Background workers for the GUI.
//!
//! This module exposes the command/event protocol plus the spawn helpers for
//! the store worker and the completion worker used by the egui UI thread.

mod completion;
mod protocol;
mod worker;

pub use completion::{spawn_completion_worker, CompletionHandle};
pub use protocol::{CompletionCmd, CompletionEvent, CoreCmd, CoreErrorSource, CoreEvent};
pub use worker::{spawn_backend, BackendHandle};
