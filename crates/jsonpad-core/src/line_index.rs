//! Logical line index.
//!
//! Provides line counting and offset↔position conversion over the document
//! mirror using a Rope, supporting O(log N) access. The index is rebuilt from
//! the full text on every value change; the widget never edits it in place.

use ropey::Rope;

/// Rope-backed line index over the current document text.
///
/// Line numbers are 0-based internally; the gutter adds 1 for display.
/// An empty document has exactly one line.
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index (a single empty line).
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build a line index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total line count. Equals the number of `'\n'` characters plus one.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total byte count.
    pub fn byte_count(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Get line number and column from a character offset.
    ///
    /// Offsets past the end clamp to the final position.
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);
        let char_in_line = char_offset - line_start_char;

        (line_idx, char_in_line)
    }

    /// Get the character offset for a line/column position.
    ///
    /// The column is clamped to the line length (excluding the newline).
    pub fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        let line_start_char = self.rope.line_to_char(line);
        let line_len = if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1) - line_start_char - 1 // -1 for newline
        } else {
            self.rope.len_chars() - line_start_char
        };

        line_start_char + column.min(line_len)
    }

    /// Get the 0-based line containing a character offset.
    pub fn line_for_char_offset(&self, char_offset: usize) -> usize {
        self.char_offset_to_position(char_offset).0
    }

    /// Get the text of a line (excluding the trailing newline).
    pub fn get_line_text(&self, line_number: usize) -> Option<String> {
        if line_number >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line_number).to_string();

        if text.ends_with('\n') {
            text.pop();
        }

        Some(text)
    }

    /// Get the complete text.
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
