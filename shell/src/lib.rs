//! # Shell
//!
//! The command-interpreter job: the root of every session.
//!
//! ## Philosophy
//!
//! - **Thin over the dispatcher**: control expressions (`jobs()`, `fg()`,
//!   job invocations, `exit()`) are parsed here but executed by the
//!   dispatcher; the shell holds no registry state
//! - **Small builtin surface**: `echo`, `help`, `buffers`, `print` — enough
//!   to inspect the session, not a programming language
//! - **Never fatal**: unknown input is reported and the shell continues

pub mod job;

pub use job::ShellJob;
