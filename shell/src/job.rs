//! Interpreter job: control calls and builtins

use buffer_store::BufferStore;
use job_control::{ControlRequest, JobContext, JobProgram, JobStep, TOP_LEVEL_PROMPT};
use session_types::{keys, Signal};
use std::cell::RefCell;
use std::rc::Rc;

const HELP: &[&str] = &[
    "control:  <job>()  <job>('arg')  jobs()  fg()  exit()",
    "builtins: echo <text>  buffers  print <name>  help",
    "keys:     ^Z suspends the foreground job, ^D quits it",
];

/// The command-interpreter job, registered first and so the session root
pub struct ShellJob {
    store: Rc<RefCell<BufferStore>>,
}

impl ShellJob {
    pub fn new(store: Rc<RefCell<BufferStore>>) -> Self {
        Self { store }
    }

    fn builtin(&self, line: &str, ctx: &mut JobContext<'_>) -> bool {
        if let Some(rest) = line.strip_prefix("echo") {
            if rest.is_empty() || rest.starts_with(' ') {
                ctx.emit(rest.trim_start().to_string());
                return true;
            }
        }
        match line {
            "help" => {
                ctx.emit_all(HELP.iter().copied());
                true
            }
            "buffers" => {
                let store = self.store.borrow();
                if store.is_empty() {
                    ctx.emit("no buffers");
                } else {
                    for name in store.names() {
                        ctx.emit(name);
                    }
                }
                true
            }
            _ => {
                if let Some(name) = line.strip_prefix("print ") {
                    match self.store.borrow().get(name.trim()) {
                        Some(snap) => {
                            for text in snap.content.lines() {
                                ctx.emit(text);
                            }
                        }
                        None => ctx.emit(format!("? no buffer named {}", name.trim())),
                    }
                    return true;
                }
                false
            }
        }
    }
}

impl JobProgram for ShellJob {
    fn handle_line(&mut self, line: &str, ctx: &mut JobContext<'_>) -> JobStep {
        if keys::is_suspend(line) {
            return JobStep::Signal(Signal::Suspend);
        }
        if keys::is_end_of_input(line) {
            return JobStep::Signal(Signal::Quit);
        }

        let line = line.trim();
        if line.is_empty() {
            return JobStep::Continue;
        }
        if self.builtin(line, ctx) {
            return JobStep::Continue;
        }

        match ControlRequest::parse(line) {
            // quitting the interpreter is quitting the session root
            Ok(ControlRequest::Exit) => JobStep::Signal(Signal::Quit),
            Ok(req) => JobStep::Control(req),
            Err(e) => {
                ctx.emit(format!("? {}", e));
                JobStep::Continue
            }
        }
    }

    fn prompt(&self) -> String {
        TOP_LEVEL_PROMPT.into()
    }
}
