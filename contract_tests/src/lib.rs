//! # Session Contract Tests
//!
//! Cross-crate tests that pin the control-layer contract of a fully wired
//! session so it does not drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: the contract is written as code
//! - **Whole sessions**: every test drives a real `conmuxd::Session`, never
//!   a mocked registry
//! - **Properties, not examples**: each module pins one lifecycle law
//!
//! ## Structure
//!
//! - [`control_transfer`]: quit returns to caller, suspend returns to top,
//!   single-foreground invariant
//! - [`suspension`]: LIFO resume law, listing stability
//! - [`shared_buffers`]: buffer coherence between editors, state
//!   preservation across suspend/resume

pub mod control_transfer;
pub mod shared_buffers;
pub mod suspension;

/// Common helpers for driving whole sessions
pub mod test_helpers {
    use conmuxd::Session;
    use session_types::{JobId, JobState};

    /// A started session with the standard wiring (shell, ed, edsel)
    pub fn started_session() -> Session {
        let mut session = Session::new().expect("standard wiring must register");
        session.start();
        session
    }

    /// Feeds every line in order, returning all output
    pub fn run(session: &mut Session, lines: &[&str]) -> Vec<String> {
        let mut all = Vec::new();
        for line in lines {
            all.extend(session.feed_line(line).output);
        }
        all
    }

    pub fn id_of(session: &Session, name: &str) -> JobId {
        session.registry().lookup(name).expect("job must exist")
    }

    pub fn state_of(session: &Session, name: &str) -> JobState {
        let id = id_of(session, name);
        session.registry().state_of(id).expect("job must exist")
    }

    /// Asserts the single-foreground invariant on the current state
    pub fn assert_single_foreground(session: &Session) {
        let count = session
            .registry()
            .list()
            .iter()
            .filter(|j| j.state == JobState::Foreground)
            .count();
        assert!(count <= 1, "more than one foreground job");
        match session.registry().foreground() {
            Some(id) => assert_eq!(
                session.registry().state_of(id),
                Some(JobState::Foreground),
                "foreground reference disagrees with job state"
            ),
            None => assert_eq!(count, 0, "foreground job without a reference"),
        }
    }
}
