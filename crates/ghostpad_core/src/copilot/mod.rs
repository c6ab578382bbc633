//! Inline suggestion lifecycle, independent of any UI toolkit.

/// Note text plus cursor.
pub mod buffer;
/// Lifecycle state machine and user-facing status.
pub mod controller;
/// Ghost-text placement.
pub mod overlay;
/// Debounce, spacing and cooldown policy.
pub mod scheduler;
/// Live suggestion reconciliation.
pub mod suggestion;

pub use buffer::EditBuffer;
pub use controller::{CopilotController, CopilotPhase, CopilotState};
pub use overlay::{FontMetrics, MonospaceMeasure, OverlayPosition, OverlayPositioner, TextMeasure};
pub use scheduler::{Dispatch, DispatchGate, RequestScheduler, SchedulerTimings, Snapshot};
pub use suggestion::{DismissReason, LiveSuggestion, Reconciliation, SuggestionContext};
