//! Editable note text plus a char-offset cursor.

use crate::text::{char_len, char_to_byte, split_at_char};

/// The note being edited: text and a cursor with `0 <= cursor <= len`.
///
/// Offsets are char indices, matching what egui reports for text cursors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
}

impl EditBuffer {
    /// Create a buffer, clamping `cursor` into the text.
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        let text = text.into();
        let cursor = cursor.min(char_len(&text));
        Self { text, cursor }
    }

    /// Buffer with the cursor at the end of `text`.
    pub fn at_end(text: impl Into<String>) -> Self {
        Self::new(text, usize::MAX)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len_chars(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace text and cursor together (a change notification).
    pub fn set(&mut self, text: impl Into<String>, cursor: usize) {
        *self = Self::new(text, cursor);
    }

    /// Move the cursor, clamped to the text.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.len_chars());
    }

    pub fn before_cursor(&self) -> &str {
        split_at_char(&self.text, self.cursor).0
    }

    pub fn after_cursor(&self) -> &str {
        split_at_char(&self.text, self.cursor).1
    }

    /// Splice `insert` at the cursor and move the cursor past it.
    pub fn insert_at_cursor(&mut self, insert: &str) {
        let byte = char_to_byte(&self.text, self.cursor);
        self.text.insert_str(byte, insert);
        self.cursor += char_len(insert);
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
