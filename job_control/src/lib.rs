//! # Job Control
//!
//! The job-control state machine for a single-terminal session: a registry
//! of named interactive jobs and a dispatcher that transfers terminal
//! control among them.
//!
//! ## Philosophy
//!
//! - **Cooperative**: At most one job runs at any instant. Control moves only
//!   when a job emits one of the two designated signals.
//! - **Explicit**: The dispatcher keeps its own invocation stack instead of
//!   recursing, so "suspend returns to the top" is a stack clear, not an
//!   exception-style unwind.
//! - **Testable**: Registry and dispatcher are plain constructed values,
//!   never singletons; tests build as many independent ones as they like.
//! - **Recoverable errors**: Control-layer errors are reported to the
//!   invoking context and never corrupt registry state.
//!
//! ## Core Concepts
//!
//! - [`JobRegistry`]: declaration-ordered job table, single foreground,
//!   LIFO suspended stack, transition audit trail
//! - [`Dispatcher`]: routes input lines to the foreground job and applies
//!   the resulting steps; owns the top-level control surface
//! - [`JobProgram`]: the one capability each job variant implements
//! - [`ControlRequest`]: parsed control expressions (`jobs()`, `fg()`, ...)

pub mod commands;
pub mod dispatcher;
pub mod job;
pub mod registry;

pub use commands::{ControlParseError, ControlRequest};
pub use dispatcher::{Dispatcher, Feed, TOP_LEVEL_PROMPT};
pub use job::{JobContext, JobProgram, JobStep};
pub use registry::{ControlError, ControlEvent, JobListing, JobRegistry};
