//! Document text and insertion point

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Insertion point within a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// A named editable document with line-based storage
///
/// The core treats content as opaque text; it is read and written by the
/// editor variants, not interpreted here. The insertion point always stays
/// clamped to the current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    name: String,
    lines: Vec<String>,
    insertion_point: Position,
    modified: bool,
}

impl Buffer {
    /// Creates an empty buffer with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
            insertion_point: Position::zero(),
            modified: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn as_string(&self) -> String {
        self.lines.join("\n")
    }

    /// True if the buffer has been mutated since the flag was last cleared
    pub fn modified(&self) -> bool {
        self.modified
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
    }

    pub fn insertion_point(&self) -> Position {
        self.insertion_point
    }

    /// Moves the insertion point, clamping it to the current content
    pub fn set_insertion_point(&mut self, pos: Position) {
        self.insertion_point = self.clamp(pos);
    }

    /// Replaces the whole content, leaving the insertion point on the last line
    pub fn set_text(&mut self, text: &str) {
        self.lines = if text.is_empty() {
            Vec::new()
        } else {
            text.lines().map(|s| s.into()).collect()
        };
        let row = self.lines.len().saturating_sub(1);
        self.insertion_point = Position::new(row, 0);
        self.modified = true;
    }

    /// Inserts a line so it ends up at `row`; `row == line_count` appends.
    /// Returns false if `row` is past the end.
    pub fn insert_line(&mut self, row: usize, text: impl Into<String>) -> bool {
        if row > self.lines.len() {
            return false;
        }
        self.lines.insert(row, text.into());
        self.insertion_point = Position::new(row, 0);
        self.modified = true;
        true
    }

    /// Replaces the line at `row`
    pub fn replace_line(&mut self, row: usize, text: impl Into<String>) -> bool {
        match self.lines.get_mut(row) {
            Some(line) => {
                *line = text.into();
                self.insertion_point = self.clamp(Position::new(row, self.insertion_point.col));
                self.modified = true;
                true
            }
            None => false,
        }
    }

    /// Deletes the line at `row`, moving the insertion point to the line
    /// that takes its place (or the new last line)
    pub fn delete_line(&mut self, row: usize) -> bool {
        if row >= self.lines.len() {
            return false;
        }
        self.lines.remove(row);
        let new_row = row.min(self.lines.len().saturating_sub(1));
        self.insertion_point = Position::new(if self.lines.is_empty() { 0 } else { new_row }, 0);
        self.modified = true;
        true
    }

    fn clamp(&self, pos: Position) -> Position {
        if self.lines.is_empty() {
            return Position::zero();
        }
        let row = pos.row.min(self.lines.len() - 1);
        let col = pos.col.min(self.lines[row].len());
        Position::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_empty() {
        let buf = Buffer::new("scratch");
        assert_eq!(buf.name(), "scratch");
        assert_eq!(buf.line_count(), 0);
        assert!(buf.is_empty());
        assert!(!buf.modified());
        assert_eq!(buf.insertion_point(), Position::zero());
    }

    #[test]
    fn test_set_text() {
        let mut buf = Buffer::new("doc");
        buf.set_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line(0), Some("hello"));
        assert_eq!(buf.line(1), Some("world"));
        assert_eq!(buf.as_string(), "hello\nworld");
        assert_eq!(buf.insertion_point(), Position::new(1, 0));
        assert!(buf.modified());
    }

    #[test]
    fn test_insert_line() {
        let mut buf = Buffer::new("doc");
        assert!(buf.insert_line(0, "first"));
        assert!(buf.insert_line(1, "third"));
        assert!(buf.insert_line(1, "second"));
        assert_eq!(buf.as_string(), "first\nsecond\nthird");
        assert_eq!(buf.insertion_point(), Position::new(1, 0));
    }

    #[test]
    fn test_insert_line_past_end_rejected() {
        let mut buf = Buffer::new("doc");
        assert!(!buf.insert_line(1, "too far"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_replace_line() {
        let mut buf = Buffer::new("doc");
        buf.set_text("one\ntwo");
        assert!(buf.replace_line(1, "TWO"));
        assert_eq!(buf.line(1), Some("TWO"));
        assert!(!buf.replace_line(5, "nope"));
    }

    #[test]
    fn test_delete_line() {
        let mut buf = Buffer::new("doc");
        buf.set_text("a\nb\nc");
        assert!(buf.delete_line(1));
        assert_eq!(buf.as_string(), "a\nc");
        assert_eq!(buf.insertion_point(), Position::new(1, 0));
    }

    #[test]
    fn test_delete_last_remaining_line() {
        let mut buf = Buffer::new("doc");
        buf.set_text("only");
        assert!(buf.delete_line(0));
        assert!(buf.is_empty());
        assert_eq!(buf.insertion_point(), Position::zero());
        assert!(!buf.delete_line(0));
    }

    #[test]
    fn test_insertion_point_clamped() {
        let mut buf = Buffer::new("doc");
        buf.set_text("short\nlonger line");
        buf.set_insertion_point(Position::new(10, 99));
        assert_eq!(buf.insertion_point(), Position::new(1, 11));
        buf.set_insertion_point(Position::new(0, 3));
        assert_eq!(buf.insertion_point(), Position::new(0, 3));
    }

    #[test]
    fn test_modified_flag() {
        let mut buf = Buffer::new("doc");
        buf.set_text("x");
        assert!(buf.modified());
        buf.clear_modified();
        assert!(!buf.modified());
        buf.insert_line(0, "y");
        assert!(buf.modified());
    }
}
