//! A live suggestion and how it reacts to further edits.

use super::buffer::EditBuffer;
use crate::text::{char_len, slice_chars, split_at_char};

/// The buffer state a suggestion was offered against, plus the suggestion.
///
/// Never patched: a new response replaces the whole context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionContext {
    original_text: String,
    original_cursor: usize,
    suggestion: String,
}

impl SuggestionContext {
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn original_cursor(&self) -> usize {
        self.original_cursor
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }
}

/// Why a live suggestion was dropped while the user kept editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Text got shorter or the cursor moved before the anchor.
    Retreated,
    /// Text before the anchor changed.
    EditedBehindAnchor,
    /// The user typed the whole suggestion.
    Completed,
    /// Typed text does not match the suggestion.
    Diverged,
}

/// Outcome of comparing a new buffer state against a live suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    Dismiss(DismissReason),
    /// Nothing typed past the anchor; keep showing the current remainder.
    Unchanged,
    /// The user typed a prefix of the suggestion; show this remainder.
    Shrunk(String),
}

/// A suggestion currently shown as ghost text.
///
/// `display` is always a non-empty suffix of the original suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSuggestion {
    context: SuggestionContext,
    display: String,
}

impl LiveSuggestion {
    /// Capture `buffer` as the snapshot for `suggestion`.
    ///
    /// # Returns
    /// `None` for an empty suggestion.
    pub fn offer(buffer: &EditBuffer, suggestion: impl Into<String>) -> Option<Self> {
        let suggestion = suggestion.into();
        if suggestion.is_empty() {
            return None;
        }
        Some(Self {
            context: SuggestionContext {
                original_text: buffer.text().to_string(),
                original_cursor: buffer.cursor(),
                suggestion: suggestion.clone(),
            },
            display: suggestion,
        })
    }

    pub fn context(&self) -> &SuggestionContext {
        &self.context
    }

    /// Ghost text to render.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// True once the user has typed part of the suggestion.
    pub fn is_partially_consumed(&self) -> bool {
        self.display.len() < self.context.suggestion.len()
    }

    /// Compare `buffer` against the snapshot.
    ///
    /// Always diffs against the original suggestion, never the shrunk display.
    pub fn reconcile(&self, buffer: &EditBuffer) -> Reconciliation {
        let ctx = &self.context;
        if buffer.len_chars() < char_len(&ctx.original_text)
            || buffer.cursor() < ctx.original_cursor
        {
            return Reconciliation::Dismiss(DismissReason::Retreated);
        }

        let anchor_prefix = split_at_char(&ctx.original_text, ctx.original_cursor).0;
        if split_at_char(buffer.text(), ctx.original_cursor).0 != anchor_prefix {
            return Reconciliation::Dismiss(DismissReason::EditedBehindAnchor);
        }

        let typed = slice_chars(buffer.text(), ctx.original_cursor, buffer.cursor());
        if typed.is_empty() {
            return Reconciliation::Unchanged;
        }

        match ctx.suggestion.strip_prefix(typed) {
            Some("") => Reconciliation::Dismiss(DismissReason::Completed),
            Some(rest) => Reconciliation::Shrunk(rest.to_string()),
            None => Reconciliation::Dismiss(DismissReason::Diverged),
        }
    }

    /// Replace the shown remainder after a [`Reconciliation::Shrunk`].
    pub(crate) fn shrink_to(&mut self, remainder: String) {
        debug_assert!(self.context.suggestion.ends_with(&remainder));
        self.display = remainder;
    }
}
