//! Designated control inputs
//!
//! The driver is line-oriented, so the control keystrokes arrive as control
//! characters alone on a line. Each job's run behavior recognizes them and
//! emits the matching signal; the dispatcher never interprets raw input.

/// The designated suspend keystroke (^Z)
pub const SUSPEND: char = '\x1a';

/// The designated end-of-input keystroke (^D)
///
/// Quits the foreground job; in the interpreter it is equivalent to
/// `exit()`.
pub const END_OF_INPUT: char = '\x04';

/// Returns true if the line is the suspend keystroke
pub fn is_suspend(line: &str) -> bool {
    let mut chars = line.trim_end_matches(['\r', '\n']).chars();
    chars.next() == Some(SUSPEND) && chars.next().is_none()
}

/// Returns true if the line is the end-of-input keystroke
pub fn is_end_of_input(line: &str) -> bool {
    let mut chars = line.trim_end_matches(['\r', '\n']).chars();
    chars.next() == Some(END_OF_INPUT) && chars.next().is_none()
}
