//! The ed command engine
//!
//! Classic ed conventions: line addresses are 1-based, the first line is 1
//! and the last is the line count; dot is the current line, 0 only when the
//! buffer is empty. Dot is stored in the shared buffer's insertion point, so
//! it survives suspend/resume and is seen by every front end driving the
//! same buffer.

use buffer_store::{BufferHandle, BufferStore, Position};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// The session-wide buffer store, shared among all editor front ends
pub type SharedStore = Rc<RefCell<BufferStore>>;

/// Name of the buffer every session starts in
pub const MAIN_BUFFER: &str = "main";

/// Command errors, reported in the terse `?` convention
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EdError {
    #[error("invalid address")]
    InvalidAddress,

    #[error("empty buffer")]
    EmptyBuffer,

    #[error("command expected at {0}")]
    CommandExpected(String),

    #[error("buffer name expected")]
    BufferNameExpected,

    #[error("s/old/new/")]
    BadSubstitution,

    #[error("no match")]
    NoMatch,
}

/// What the caller should do after one executed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdOutcome {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdMode {
    Command,
    /// Collecting text; the next typed line is inserted at `row`
    Input { row: usize },
}

/// Ed-style command engine over the shared buffer store
///
/// Holds which buffer is current for this front end; the content and dot
/// live in the store and are shared with every other front end.
pub struct EdCore {
    store: SharedStore,
    current: String,
    mode: EdMode,
}

impl EdCore {
    pub fn new(store: SharedStore) -> Self {
        store.borrow_mut().open(MAIN_BUFFER);
        Self {
            store,
            current: MAIN_BUFFER.into(),
            mode: EdMode::Command,
        }
    }

    pub fn store(&self) -> SharedStore {
        Rc::clone(&self.store)
    }

    pub fn current_name(&self) -> &str {
        &self.current
    }

    /// Handle to the current buffer (created on first reference)
    pub fn buffer(&self) -> BufferHandle {
        self.store.borrow_mut().open(&self.current)
    }

    pub fn in_input_mode(&self) -> bool {
        matches!(self.mode, EdMode::Input { .. })
    }

    /// Current line number, 1-based; 0 when the buffer is empty
    pub fn dot(&self) -> usize {
        let handle = self.buffer();
        let buf = handle.borrow();
        if buf.is_empty() {
            0
        } else {
            buf.insertion_point().row + 1
        }
    }

    /// Last line number; 0 when the buffer is empty
    pub fn last(&self) -> usize {
        self.buffer().borrow().line_count()
    }

    /// Opens `name` as the current buffer, creating it if absent
    pub fn open(&mut self, name: &str) {
        self.store.borrow_mut().open(name);
        self.current = name.into();
    }

    /// Executes one command-mode or input-mode line
    pub fn execute(&mut self, line: &str, out: &mut Vec<String>) -> Result<EdOutcome, EdError> {
        if let EdMode::Input { row } = self.mode {
            return Ok(self.input_line(row, line));
        }

        let input = line.trim();
        let (addr, rest) = self.parse_address(input)?;
        let cmd = rest.chars().next();
        let params = match cmd {
            Some(c) => rest[c.len_utf8()..].trim(),
            None => "",
        };

        match cmd {
            // bare address (or bare return): move dot there and print
            None => {
                let target = match addr {
                    Some(i) => i,
                    None => self.dot() + 1,
                };
                self.print_line(target, out)?;
                Ok(EdOutcome::Continue)
            }
            Some('p') => {
                let target = addr.unwrap_or_else(|| self.dot());
                self.print_line(target, out)?;
                Ok(EdOutcome::Continue)
            }
            Some('=') => {
                let target = addr.unwrap_or_else(|| self.last());
                if target > self.last() {
                    return Err(EdError::InvalidAddress);
                }
                out.push(target.to_string());
                Ok(EdOutcome::Continue)
            }
            Some('a') => {
                let after = addr.unwrap_or_else(|| self.dot());
                if after > self.last() {
                    return Err(EdError::InvalidAddress);
                }
                self.mode = EdMode::Input { row: after };
                Ok(EdOutcome::Continue)
            }
            Some('i') => {
                let before = addr.unwrap_or_else(|| self.dot());
                if before > self.last() {
                    return Err(EdError::InvalidAddress);
                }
                self.mode = EdMode::Input {
                    row: before.saturating_sub(1),
                };
                Ok(EdOutcome::Continue)
            }
            Some('d') => {
                let target = self.require_line(addr)?;
                self.buffer().borrow_mut().delete_line(target - 1);
                Ok(EdOutcome::Continue)
            }
            Some('s') => {
                let target = self.require_line(addr)?;
                self.substitute(target, params, out)?;
                Ok(EdOutcome::Continue)
            }
            Some('e') => {
                if params.is_empty() {
                    return Err(EdError::BufferNameExpected);
                }
                self.open(params);
                out.push(format!("{}, {} lines", params, self.last()));
                Ok(EdOutcome::Continue)
            }
            Some('b') => {
                if !params.is_empty() {
                    self.open(params);
                }
                out.push(self.status_line(&self.current.clone()));
                Ok(EdOutcome::Continue)
            }
            Some('n') => {
                out.push("    ./$    Buffer".into());
                out.push("    ---    ------".into());
                for name in self.store.borrow().names() {
                    out.push(self.status_line(&name));
                }
                Ok(EdOutcome::Continue)
            }
            Some('q') => Ok(EdOutcome::Quit),
            Some(_) => Err(EdError::CommandExpected(rest.into())),
        }
    }

    // --- input mode ---

    fn input_line(&mut self, row: usize, line: &str) -> EdOutcome {
        if line.trim_end() == "." {
            self.mode = EdMode::Command;
        } else {
            self.buffer().borrow_mut().insert_line(row, line);
            self.mode = EdMode::Input { row: row + 1 };
        }
        EdOutcome::Continue
    }

    // --- addressing ---

    /// Parses an optional leading line address: digits, `.` (dot), `$` (last)
    fn parse_address<'i>(&self, input: &'i str) -> Result<(Option<usize>, &'i str), EdError> {
        if let Some(rest) = input.strip_prefix('.') {
            return Ok((Some(self.dot()), rest));
        }
        if let Some(rest) = input.strip_prefix('$') {
            return Ok((Some(self.last()), rest));
        }
        let digits_end = input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len());
        if digits_end > 0 {
            let n: usize = input[..digits_end]
                .parse()
                .map_err(|_| EdError::InvalidAddress)?;
            return Ok((Some(n), &input[digits_end..]));
        }
        Ok((None, input))
    }

    /// Resolves an optional address to an existing line, defaulting to dot
    fn require_line(&self, addr: Option<usize>) -> Result<usize, EdError> {
        if self.last() == 0 {
            return Err(EdError::EmptyBuffer);
        }
        let target = addr.unwrap_or_else(|| self.dot());
        if target == 0 || target > self.last() {
            return Err(EdError::InvalidAddress);
        }
        Ok(target)
    }

    // --- commands ---

    fn print_line(&mut self, target: usize, out: &mut Vec<String>) -> Result<(), EdError> {
        let target = self.require_line(Some(target))?;
        let handle = self.buffer();
        let mut buf = handle.borrow_mut();
        buf.set_insertion_point(Position::new(target - 1, 0));
        match buf.line(target - 1) {
            Some(text) => {
                out.push(text.into());
                Ok(())
            }
            None => Err(EdError::InvalidAddress),
        }
    }

    /// `s/old/new/` with optional trailing `g`, applied to one line
    fn substitute(&mut self, target: usize, params: &str, out: &mut Vec<String>) -> Result<(), EdError> {
        let parts: Vec<&str> = params.split('/').collect();
        let (old, new, global) = match parts.as_slice() {
            ["", old, new, ""] if !old.is_empty() => (*old, *new, false),
            ["", old, new, "g"] if !old.is_empty() => (*old, *new, true),
            _ => return Err(EdError::BadSubstitution),
        };

        let handle = self.buffer();
        let mut buf = handle.borrow_mut();
        let line = match buf.line(target - 1) {
            Some(l) => l.to_string(),
            None => return Err(EdError::InvalidAddress),
        };
        if !line.contains(old) {
            return Err(EdError::NoMatch);
        }
        let replaced = if global {
            line.replace(old, new)
        } else {
            line.replacen(old, new, 1)
        };
        buf.replace_line(target - 1, replaced.clone());
        out.push(replaced);
        Ok(())
    }

    /// One `n`-listing line: dot/last, current and modified markers, name
    fn status_line(&self, name: &str) -> String {
        match self.store.borrow().get(name) {
            Some(snap) => {
                let dot = if snap.line_count == 0 {
                    0
                } else {
                    snap.insertion_point.row + 1
                };
                let loc = format!("{}/{}", dot, snap.line_count);
                format!(
                    "{:>7}  {}{}{}",
                    loc,
                    if name == self.current { '.' } else { ' ' },
                    if snap.modified { '*' } else { ' ' },
                    name
                )
            }
            None => format!("?        {}", name),
        }
    }
}
