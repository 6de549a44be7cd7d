//! # Input Script Parser
//!
//! A line-based input format for deterministic sessions and demos.
//!
//! ## Format
//!
//! Each line is fed to the session verbatim, with two exceptions:
//! - `# ...` lines are comments and are skipped
//! - the tokens `^Z` and `^D` denote the suspend and end-of-input control
//!   keys (the literal control characters also work)
//!
//! Blank lines are kept: a blank line is meaningful input to the editors.
//!
//! ## Example
//!
//! ```text
//! # edit a note, suspend, inspect from the shell
//! ed('notes.txt')
//! a
//! remember the milk
//! .
//! ^Z
//! jobs()
//! fg()
//! q
//! ```

use session_types::keys;
use std::collections::VecDeque;
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("empty script")]
    EmptyScript,
}

/// A parsed input script: one session input per entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputScript {
    lines: VecDeque<String>,
}

impl InputScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, ScriptError> {
        let mut lines = VecDeque::new();
        for raw in text.lines() {
            if raw.trim_start().starts_with('#') {
                continue;
            }
            lines.push_back(translate(raw));
        }
        // trailing blank lines are an artifact of the file, not input
        while lines.back().is_some_and(|l| l.is_empty()) {
            lines.pop_back();
        }
        if lines.is_empty() {
            return Err(ScriptError::EmptyScript);
        }
        Ok(Self { lines })
    }

    /// Returns the next input line, if any
    pub fn next_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    pub fn has_more(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

/// Maps the printable control-key tokens onto the designated keys
fn translate(line: &str) -> String {
    match line.trim() {
        "^Z" => keys::SUSPEND.to_string(),
        "^D" => keys::END_OF_INPUT.to_string(),
        _ => line.into(),
    }
}
