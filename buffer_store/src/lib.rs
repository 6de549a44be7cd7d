//! # Buffer Store
//!
//! Named editable documents shared among editor front ends.
//!
//! ## Philosophy
//!
//! - **One instance per name**: `open` always returns a handle to the same
//!   buffer; content is never copied per caller.
//! - **Shared by reference**: both editor variants hold non-owning handles,
//!   so a mutation through one is visible through the other on next access.
//! - **No locking**: at most one job runs at any instant, so coherence holds
//!   by construction.
//!
//! ## Core Concepts
//!
//! - [`Buffer`]: line-based document text plus an insertion point
//! - [`BufferHandle`]: shared reference (`Rc<RefCell<Buffer>>`)
//! - [`BufferStore`]: creation-ordered table of buffers keyed by name
//! - [`BufferSnapshot`]: read-only view for display purposes

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod buffer;
pub mod store;

pub use buffer::{Buffer, Position};
pub use store::{BufferHandle, BufferSnapshot, BufferStore};
