// SPDX-License-Identifier: GPL-3.0-only

//! In-memory text document used as a preview host.
//!
//! The cursor is a character index, never a byte index, so multi-byte
//! symbols are inserted and deleted whole.

use crate::input::sink::TextSink;

/// A text buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    cursor: usize,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Checks if the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text before and after the cursor.
    #[must_use]
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.text.split_at(self.byte_offset(self.cursor))
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }
}

impl TextSink for Document {
    fn insert_text(&mut self, text: &str) {
        let offset = self.byte_offset(self.cursor);
        self.text.insert_str(offset, text);
        self.cursor += text.chars().count();
    }

    fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let offset = self.byte_offset(self.cursor - 1);
        self.text.remove(offset);
        self.cursor -= 1;
    }

    fn insert_return(&mut self) {
        self.insert_text("\n");
    }

    fn move_cursor(&mut self, offset: i32) {
        let target = self.cursor as i64 + i64::from(offset);
        self.cursor = target.clamp(0, self.len() as i64) as usize;
    }

    fn switch_to_next_input_mode(&mut self) {
        // A document has no input methods to cycle.
    }
}
