//! Job lifecycle states and cooperative signals

use serde::{Deserialize, Serialize};
use std::fmt;

/// Job lifecycle state
///
/// At most one job is `Foreground` at any instant; only the foreground job
/// holds terminal control. `Background` and `Suspended` describe dormancy,
/// not concurrent activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// Created but never run
    Loaded,
    /// Currently holds terminal control
    Foreground,
    /// Quit out of, still resumable by invoking it again
    Background,
    /// Suspended via the designated suspend input; on the suspended stack
    Suspended,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Loaded => "Loaded",
            JobState::Foreground => "Foreground",
            JobState::Background => "Background",
            JobState::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cooperative yield signal emitted by a job's run behavior
///
/// These are the only two values that cross the job/dispatcher boundary.
/// The dispatcher must not infer either one from any other condition;
/// errors inside a job are the job's own concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Return control to whoever invoked this job
    Quit,
    /// Return control unconditionally to the top level
    Suspend,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Quit => write!(f, "quit"),
            Signal::Suspend => write!(f, "suspend"),
        }
    }
}
