//! # Session Types
//!
//! This crate defines the fundamental types used throughout conmux.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Job identity and lifecycle states are typed
//!   and cannot be confused with plain strings.
//! - **Single foreground**: The type vocabulary makes the control states
//!   explicit so the registry can enforce them.
//! - **Cooperative only**: `Signal` names the only two values that ever cross
//!   the job/dispatcher boundary.
//!
//! ## Key Types
//!
//! - [`JobId`]: Unique identifier for a job
//! - [`JobState`]: Job lifecycle state (Loaded/Foreground/Background/Suspended)
//! - [`Signal`]: Cooperative yield signal (Quit/Suspend)
//! - [`keys`]: Designated control inputs (suspend, end-of-input)

pub mod ids;
pub mod keys;
pub mod state;

pub use ids::JobId;
pub use state::{JobState, Signal};
