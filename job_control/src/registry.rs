//! Job registry: the ordered job table and its control state

use serde::{Deserialize, Serialize};
use session_types::{JobId, JobState};
use thiserror::Error;

/// Control-layer error types
///
/// All of these are local and recoverable: they are reported to the invoking
/// context and leave registry state unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("unknown job: {name}")]
    UnknownJob { name: String },

    #[error("no suspended job")]
    NoSuspendedJob,

    #[error("invalid transition for {name}: {from} -> {to}")]
    InvalidTransition {
        name: String,
        from: JobState,
        to: JobState,
    },

    #[error("job already registered: {name}")]
    DuplicateJob { name: String },
}

/// Audit record of a control transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// Job was added to the registry
    Registered { id: JobId, name: String },
    /// Job gained the foreground; `previous` moved to Background
    Foregrounded { id: JobId, previous: Option<JobId> },
    /// Job was suspended and pushed on the suspended stack
    Suspended { id: JobId },
    /// Job quit out of the foreground
    Backgrounded { id: JobId },
    /// Job was popped off the suspended stack for resumption
    Popped { id: JobId },
}

/// One registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    id: JobId,
    name: String,
    state: JobState,
    last_running: u64,
}

impl JobRecord {
    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Monotonic ordering key, bumped each time the job gains the foreground
    pub fn last_running(&self) -> u64 {
        self.last_running
    }
}

/// Listing snapshot produced by [`JobRegistry::list`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListing {
    pub id: JobId,
    pub name: String,
    pub state: JobState,
}

/// The ordered collection of all jobs plus the control state
///
/// Jobs are registered once at session start, in declaration order, and are
/// never destroyed: their internal state must survive for the life of the
/// process. Invariants enforced here:
///
/// - at most one job is `Foreground` at any instant
/// - a job appears on `suspended_stack` iff its state is `Suspended`, and
///   at most once; the top is always the most recently suspended job
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: Vec<JobRecord>,
    foreground: Option<JobId>,
    suspended_stack: Vec<JobId>,
    audit_trail: Vec<ControlEvent>,
    clock: u64,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a job under a unique name; declaration order is listing order
    pub fn register(&mut self, name: impl Into<String>) -> Result<JobId, ControlError> {
        let name = name.into();
        if self.jobs.iter().any(|j| j.name == name) {
            return Err(ControlError::DuplicateJob { name });
        }
        let id = JobId::new();
        self.jobs.push(JobRecord {
            id,
            name: name.clone(),
            state: JobState::Loaded,
            last_running: 0,
        });
        self.audit_trail.push(ControlEvent::Registered { id, name });
        Ok(id)
    }

    /// Resolves a job name to its id
    pub fn lookup(&self, name: &str) -> Result<JobId, ControlError> {
        self.jobs
            .iter()
            .find(|j| j.name == name)
            .map(|j| j.id)
            .ok_or_else(|| ControlError::UnknownJob { name: name.into() })
    }

    pub fn name_of(&self, id: JobId) -> Option<&str> {
        self.record(id).map(|j| j.name.as_str())
    }

    pub fn state_of(&self, id: JobId) -> Option<JobState> {
        self.record(id).map(|j| j.state)
    }

    pub fn foreground(&self) -> Option<JobId> {
        self.foreground
    }

    /// Top of the suspended stack without popping it
    pub fn most_recently_suspended(&self) -> Option<JobId> {
        self.suspended_stack.last().copied()
    }

    pub fn suspended_stack(&self) -> &[JobId] {
        &self.suspended_stack
    }

    pub fn audit_trail(&self) -> &[ControlEvent] {
        &self.audit_trail
    }

    /// Snapshots all jobs in declaration order, regardless of state. Pure.
    pub fn list(&self) -> Vec<JobListing> {
        self.jobs
            .iter()
            .map(|j| JobListing {
                id: j.id,
                name: j.name.clone(),
                state: j.state,
            })
            .collect()
    }

    /// Gives `id` the foreground; the previously foreground job (if any)
    /// becomes Background.
    ///
    /// A no-op if `id` is already foreground. Foregrounding a Suspended job
    /// removes it from the suspended stack so the stack invariant holds.
    pub fn mark_foreground(&mut self, id: JobId) -> Result<(), ControlError> {
        self.require(id)?;
        if self.foreground == Some(id) {
            return Ok(());
        }

        let previous = self.foreground;
        if let Some(prev) = previous {
            if let Some(rec) = self.record_mut(prev) {
                rec.state = JobState::Background;
            }
        }

        self.suspended_stack.retain(|s| *s != id);
        self.clock += 1;
        let clock = self.clock;
        if let Some(rec) = self.record_mut(id) {
            rec.state = JobState::Foreground;
            rec.last_running = clock;
        }
        self.foreground = Some(id);
        self.audit_trail
            .push(ControlEvent::Foregrounded { id, previous });
        Ok(())
    }

    /// Suspends the foreground job, pushing it on the suspended stack.
    /// Only Foreground -> Suspended is defined; anything else is rejected.
    pub fn mark_suspended(&mut self, id: JobId) -> Result<(), ControlError> {
        let rec = self.require(id)?;
        if rec.state != JobState::Foreground {
            return Err(ControlError::InvalidTransition {
                name: rec.name.clone(),
                from: rec.state,
                to: JobState::Suspended,
            });
        }
        if let Some(rec) = self.record_mut(id) {
            rec.state = JobState::Suspended;
        }
        self.foreground = None;
        self.suspended_stack.push(id);
        self.audit_trail.push(ControlEvent::Suspended { id });
        Ok(())
    }

    /// Takes the foreground job back to Background (the quit path)
    pub fn mark_background(&mut self, id: JobId) -> Result<(), ControlError> {
        let rec = self.require(id)?;
        if rec.state != JobState::Foreground {
            return Err(ControlError::InvalidTransition {
                name: rec.name.clone(),
                from: rec.state,
                to: JobState::Background,
            });
        }
        if let Some(rec) = self.record_mut(id) {
            rec.state = JobState::Background;
        }
        self.foreground = None;
        self.audit_trail.push(ControlEvent::Backgrounded { id });
        Ok(())
    }

    /// Removes and returns the most recently suspended job
    ///
    /// The caller is expected to foreground it immediately; the record keeps
    /// state Suspended until then.
    pub fn pop_most_recently_suspended(&mut self) -> Result<JobId, ControlError> {
        let id = self
            .suspended_stack
            .pop()
            .ok_or(ControlError::NoSuspendedJob)?;
        self.audit_trail.push(ControlEvent::Popped { id });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    fn record(&self, id: JobId) -> Option<&JobRecord> {
        self.jobs.iter().find(|j| j.id == id)
    }

    fn record_mut(&mut self, id: JobId) -> Option<&mut JobRecord> {
        self.jobs.iter_mut().find(|j| j.id == id)
    }

    fn require(&self, id: JobId) -> Result<&JobRecord, ControlError> {
        self.record(id).ok_or_else(|| ControlError::UnknownJob {
            name: id.to_string(),
        })
    }
}
