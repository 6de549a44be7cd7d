//! Text frame: a viewport over the current buffer
//!
//! Renders to plain strings. Rows past the end of the buffer show `~` in
//! the left margin; the insertion point is marked inline on its line; the
//! status line carries buffer name, modified marker, and dot/last.

use buffer_store::Buffer;

/// Default viewport height in buffer lines (excluding the status line)
pub const DEFAULT_HEIGHT: usize = 12;

/// A scrolling viewport that follows the insertion point
pub struct Frame {
    height: usize,
    top: usize,
}

impl Frame {
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(1),
            top: 0,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// First visible buffer row (0-based)
    pub fn top(&self) -> usize {
        self.top
    }

    /// Renders the buffer into `height` text rows plus one status line,
    /// scrolling first so the insertion point is visible
    pub fn render(&mut self, buf: &Buffer) -> Vec<String> {
        let cursor = buf.insertion_point();
        self.follow(cursor.row);

        let mut rows = Vec::with_capacity(self.height + 1);
        for row in self.top..self.top + self.height {
            match buf.line(row) {
                Some(line) if row == cursor.row && !buf.is_empty() => {
                    rows.push(mark_cursor(line, cursor.col));
                }
                Some(line) => rows.push(line.into()),
                None => rows.push("~".into()),
            }
        }
        rows.push(self.status_line(buf));
        rows
    }

    fn follow(&mut self, row: usize) {
        if row < self.top {
            self.top = row;
        } else if row >= self.top + self.height {
            self.top = row + 1 - self.height;
        }
    }

    fn status_line(&self, buf: &Buffer) -> String {
        let dot = if buf.is_empty() {
            0
        } else {
            buf.insertion_point().row + 1
        };
        format!(
            "--- {}{} [{}/{}] ---",
            buf.name(),
            if buf.modified() { "*" } else { "" },
            dot,
            buf.line_count()
        )
    }
}

/// Marks the cursor column inline, `[c]` around the character under it
fn mark_cursor(line: &str, col: usize) -> String {
    let mut result = String::new();
    let mut marked = false;
    for (i, ch) in line.chars().enumerate() {
        if i == col {
            result.push('[');
            result.push(ch);
            result.push(']');
            marked = true;
        } else {
            result.push(ch);
        }
    }
    if !marked {
        result.push_str("[ ]");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use buffer_store::Position;

    fn buffer_with(text: &str) -> Buffer {
        let mut buf = Buffer::new("doc.txt");
        buf.set_text(text);
        buf
    }

    #[test]
    fn test_render_empty_buffer() {
        let mut frame = Frame::new(3);
        let buf = Buffer::new("empty.txt");
        let rows = frame.render(&buf);
        assert_eq!(rows, vec!["~", "~", "~", "--- empty.txt [0/0] ---"]);
    }

    #[test]
    fn test_render_marks_cursor_line() {
        let mut frame = Frame::new(3);
        let mut buf = buffer_with("alpha\nbeta");
        buf.set_insertion_point(Position::new(0, 2));
        let rows = frame.render(&buf);
        assert_eq!(rows[0], "al[p]ha");
        assert_eq!(rows[1], "beta");
        assert_eq!(rows[2], "~");
        assert_eq!(rows[3], "--- doc.txt* [1/2] ---");
    }

    #[test]
    fn test_cursor_at_end_of_line() {
        let mut frame = Frame::new(1);
        let mut buf = buffer_with("hi");
        buf.set_insertion_point(Position::new(0, 2));
        let rows = frame.render(&buf);
        assert_eq!(rows[0], "hi[ ]");
    }

    #[test]
    fn test_viewport_follows_cursor_down_and_up() {
        let mut frame = Frame::new(2);
        let mut buf = buffer_with("l1\nl2\nl3\nl4\nl5");

        buf.set_insertion_point(Position::new(4, 0));
        let rows = frame.render(&buf);
        assert_eq!(frame.top(), 3);
        assert_eq!(rows[0], "l4");
        assert_eq!(rows[1], "[l]5");

        buf.set_insertion_point(Position::new(0, 0));
        let rows = frame.render(&buf);
        assert_eq!(frame.top(), 0);
        assert_eq!(rows[0], "[l]1");
    }

    #[test]
    fn test_status_line_tracks_modified_flag() {
        let mut frame = Frame::new(1);
        let mut buf = buffer_with("x");
        buf.clear_modified();
        let rows = frame.render(&buf);
        assert_eq!(rows[1], "--- doc.txt [1/1] ---");
    }
}
