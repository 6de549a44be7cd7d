//! Session wiring: one dispatcher, one store, three jobs

use buffer_store::BufferStore;
use display_editor::DisplayEditorJob;
use job_control::{ControlError, Dispatcher, Feed, JobRegistry};
use line_editor::{LineEditorJob, SharedStore};
use session_log::SessionLog;
use shell::ShellJob;
use std::cell::RefCell;
use std::rc::Rc;

/// A fully wired session
///
/// Declaration order is fixed: `shell` is registered first and so is the
/// root interpreter; `ed` and `edsel` share the one buffer store.
pub struct Session {
    dispatcher: Dispatcher,
    store: SharedStore,
}

impl Session {
    pub fn new() -> Result<Self, ControlError> {
        Self::with_log(SessionLog::new())
    }

    pub fn with_log(log: SessionLog) -> Result<Self, ControlError> {
        let store: SharedStore = Rc::new(RefCell::new(BufferStore::new()));
        let mut dispatcher = Dispatcher::with_log(log);

        dispatcher.register("shell", Box::new(ShellJob::new(Rc::clone(&store))))?;
        dispatcher.register("ed", Box::new(LineEditorJob::new(Rc::clone(&store))))?;
        dispatcher.register("edsel", Box::new(DisplayEditorJob::new(Rc::clone(&store))))?;

        Ok(Self { dispatcher, store })
    }

    /// Starts the session: the interpreter takes the foreground
    pub fn start(&mut self) -> Feed {
        self.dispatcher.start()
    }

    /// Pumps one line of operator input
    pub fn feed_line(&mut self, line: &str) -> Feed {
        self.dispatcher.feed_line(line)
    }

    pub fn prompt(&self) -> String {
        self.dispatcher.prompt()
    }

    pub fn ended(&self) -> bool {
        self.dispatcher.ended()
    }

    pub fn registry(&self) -> &JobRegistry {
        self.dispatcher.registry()
    }

    pub fn log(&self) -> &SessionLog {
        self.dispatcher.log()
    }

    pub fn store(&self) -> SharedStore {
        Rc::clone(&self.store)
    }
}
