//! # Conmux Session Host
//!
//! Wires the interpreter and the two editors into one dispatcher over one
//! shared buffer store, and drives the session from a terminal or a script.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: jobs never print; the host flushes collected output
//! - **Deterministic mode is first-class**: input scripts replay a whole
//!   session for tests and demos
//! - **One wiring**: every session has the same three jobs in the same
//!   declaration order — `shell` (root), `ed`, `edsel`

pub mod runtime;
pub mod script;
pub mod session;

pub use runtime::{Runtime, RuntimeConfig, RuntimeError};
pub use script::{InputScript, ScriptError};
pub use session::Session;
