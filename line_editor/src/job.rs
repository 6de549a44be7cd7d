//! LineEditor job variant: control glue around the engine

use crate::engine::{EdCore, EdOutcome, SharedStore};
use job_control::{JobContext, JobProgram, JobStep};
use session_types::{keys, Signal};

/// The line editor as a registered job
///
/// The engine carries all editing state; this wrapper only recognizes the
/// designated control inputs and maps engine outcomes onto job steps.
pub struct LineEditorJob {
    core: EdCore,
}

impl LineEditorJob {
    pub fn new(store: SharedStore) -> Self {
        Self {
            core: EdCore::new(store),
        }
    }

    pub fn core(&self) -> &EdCore {
        &self.core
    }
}

impl JobProgram for LineEditorJob {
    fn startup(&mut self, arg: Option<&str>, ctx: &mut JobContext<'_>) {
        if let Some(name) = arg {
            self.core.open(name);
            ctx.emit(format!("{}, {} lines", name, self.core.last()));
        }
    }

    fn handle_line(&mut self, line: &str, ctx: &mut JobContext<'_>) -> JobStep {
        // the suspend key is recognized even while collecting input text
        if keys::is_suspend(line) {
            return JobStep::Signal(Signal::Suspend);
        }
        if self.core.in_input_mode() {
            let mut out = Vec::new();
            // input mode never fails; the line is content or the terminator
            let _ = self.core.execute(line, &mut out);
            ctx.emit_all(out);
            return JobStep::Continue;
        }
        if keys::is_end_of_input(line) {
            return JobStep::Signal(Signal::Quit);
        }
        if let Some(expr) = line.strip_prefix('!') {
            return JobStep::Passthrough(expr.into());
        }

        let mut out = Vec::new();
        match self.core.execute(line, &mut out) {
            Ok(EdOutcome::Continue) => {
                ctx.emit_all(out);
                JobStep::Continue
            }
            Ok(EdOutcome::Quit) => {
                ctx.emit_all(out);
                JobStep::Signal(Signal::Quit)
            }
            Err(e) => {
                ctx.emit(format!("? {}", e));
                JobStep::Continue
            }
        }
    }
}
