//! # Line Editor
//!
//! A line-oriented editor job in the classic ed style, operating on the
//! shared buffer store.
//!
//! ## Philosophy
//!
//! - **Line-pumped**: One command per input line; input mode (`a`, `i`)
//!   collects text lines until a lone `.`
//! - **Shared state**: The engine holds a reference to the session's buffer
//!   store, never a private copy; dot travels with the buffer
//! - **Recoverable errors**: Command errors are reported in the terse `?`
//!   convention and never leave command mode
//!
//! The engine ([`EdCore`]) is separate from the job glue ([`LineEditorJob`])
//! so the display editor can drive the same command language.

pub mod engine;
pub mod job;

pub use engine::{EdCore, EdError, EdOutcome, SharedStore, MAIN_BUFFER};
pub use job::LineEditorJob;
