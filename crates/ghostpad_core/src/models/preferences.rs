//! User preferences persisted alongside the note.

use crate::constants::{DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE};
use serde::{Deserialize, Serialize};

/// Editor preferences restored at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub font_size: f32,
    pub auto_save: bool,
    pub copilot_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            auto_save: true,
            copilot_enabled: true,
        }
    }
}

impl Preferences {
    /// Return a copy with `font_size` clamped into the supported range.
    ///
    /// Non-finite sizes fall back to the default.
    pub fn normalized(mut self) -> Self {
        self.font_size = if self.font_size.is_finite() {
            self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
        } else {
            DEFAULT_FONT_SIZE
        };
        self
    }

    /// Step the font size by `delta` points, staying within bounds.
    pub fn adjust_font_size(&mut self, delta: f32) {
        self.font_size = (self.font_size + delta).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }
}
