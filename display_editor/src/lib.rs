//! # Display Editor
//!
//! A screen-oriented editor job: the same ed command language as the line
//! editor, plus a text frame that follows the insertion point.
//!
//! ## Philosophy
//!
//! - **One engine, two front ends**: this crate drives the same `EdCore`
//!   command engine as the line editor, over the same shared buffer store;
//!   the frame is the only addition
//! - **Renders to strings**: the frame produces plain text lines, never
//!   terminal escape sequences; a host decides how to put them on a screen
//! - **Single window**: one frame over the current buffer; the `o` window
//!   command reports single-window operation

pub mod frame;
pub mod job;

pub use frame::Frame;
pub use job::DisplayEditorJob;
