//! DisplayEditor job variant

use crate::frame::{Frame, DEFAULT_HEIGHT};
use job_control::{JobContext, JobProgram, JobStep};
use line_editor::{EdCore, EdOutcome, SharedStore};
use session_types::{keys, Signal};

/// The display editor as a registered job
///
/// Wraps its own `EdCore` over the session's shared store, so edits and dot
/// motion are coherent with the line editor, and re-renders the frame after
/// every handled line.
pub struct DisplayEditorJob {
    core: EdCore,
    frame: Frame,
}

impl DisplayEditorJob {
    pub fn new(store: SharedStore) -> Self {
        Self::with_height(store, DEFAULT_HEIGHT)
    }

    pub fn with_height(store: SharedStore, height: usize) -> Self {
        Self {
            core: EdCore::new(store),
            frame: Frame::new(height),
        }
    }

    pub fn core(&self) -> &EdCore {
        &self.core
    }

    fn emit_frame(&mut self, ctx: &mut JobContext<'_>) {
        let handle = self.core.buffer();
        ctx.emit_all(self.frame.render(&handle.borrow()));
    }

    /// Window manager commands; a single window is all there is
    fn window_command(&mut self, params: &str, ctx: &mut JobContext<'_>) {
        match params {
            "" | "1" => ctx.emit("one window"),
            _ => ctx.emit(format!("? integer 1 expected at {}", params)),
        }
    }
}

impl JobProgram for DisplayEditorJob {
    fn startup(&mut self, arg: Option<&str>, ctx: &mut JobContext<'_>) {
        if let Some(name) = arg {
            self.core.open(name);
        }
        self.emit_frame(ctx);
    }

    fn resume(&mut self, ctx: &mut JobContext<'_>) {
        // buffers may have moved underneath while suspended; redraw
        self.emit_frame(ctx);
    }

    fn handle_line(&mut self, line: &str, ctx: &mut JobContext<'_>) -> JobStep {
        if keys::is_suspend(line) {
            return JobStep::Signal(Signal::Suspend);
        }
        if self.core.in_input_mode() {
            let mut out = Vec::new();
            let _ = self.core.execute(line, &mut out);
            ctx.emit_all(out);
            self.emit_frame(ctx);
            return JobStep::Continue;
        }
        if keys::is_end_of_input(line) {
            return JobStep::Signal(Signal::Quit);
        }
        if let Some(expr) = line.strip_prefix('!') {
            return JobStep::Passthrough(expr.into());
        }

        // frame-only commands, intercepted before the shared engine
        let trimmed = line.trim();
        if trimmed == "L" {
            self.emit_frame(ctx);
            return JobStep::Continue;
        }
        if let Some(params) = trimmed.strip_prefix('o') {
            self.window_command(params.trim(), ctx);
            return JobStep::Continue;
        }

        let mut out = Vec::new();
        match self.core.execute(line, &mut out) {
            Ok(EdOutcome::Continue) => {
                ctx.emit_all(out);
                self.emit_frame(ctx);
                JobStep::Continue
            }
            Ok(EdOutcome::Quit) => JobStep::Signal(Signal::Quit),
            Err(e) => {
                ctx.emit(format!("? {}", e));
                self.emit_frame(ctx);
                JobStep::Continue
            }
        }
    }
}
