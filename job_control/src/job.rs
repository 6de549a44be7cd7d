//! The job capability: variant-polymorphic run behavior

use crate::commands::ControlRequest;
use session_log::SessionLog;
use session_types::Signal;

/// What a job's run behavior asks for after handling one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStep {
    /// Keep the foreground; wait for the next line
    Continue,
    /// Yield control with one of the two designated signals
    Signal(Signal),
    /// Delegate a control request back to the dispatcher
    Control(ControlRequest),
    /// Evaluate an expression against the interpreter's control surface
    /// without leaving this job (`!expr`)
    Passthrough(String),
}

/// Context handed to a job while it holds terminal control
///
/// Output is collected per pump and flushed by the driver; jobs never write
/// to the terminal directly.
pub struct JobContext<'a> {
    output: &'a mut Vec<String>,
    pub log: &'a mut SessionLog,
}

impl<'a> JobContext<'a> {
    pub fn new(output: &'a mut Vec<String>, log: &'a mut SessionLog) -> Self {
        Self { output, log }
    }

    /// Emits one line of output to the operator
    pub fn emit(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    /// Emits several lines of output
    pub fn emit_all<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.output.push(line.into());
        }
    }
}

/// A named unit of interactive behavior
///
/// The dispatcher is agnostic to which variant it runs; this is the entire
/// boundary. Errors inside a job's own domain logic must be reported through
/// `ctx.emit` and answered with `JobStep::Continue` — they are never signals.
pub trait JobProgram {
    /// Runs when the job is invoked (fresh control transfer). `arg` carries
    /// an optional invocation argument, e.g. a file name for an editor.
    fn startup(&mut self, _arg: Option<&str>, _ctx: &mut JobContext<'_>) {}

    /// Runs when the job regains control without a fresh invocation
    /// (resumed via `fg()` or a nested job quitting back to it).
    /// Internal state must be exactly as it was left.
    fn resume(&mut self, _ctx: &mut JobContext<'_>) {}

    /// Runs when the job quits out of the foreground
    fn cleanup(&mut self, _ctx: &mut JobContext<'_>) {}

    /// Handles one line of operator input while foreground
    fn handle_line(&mut self, line: &str, ctx: &mut JobContext<'_>) -> JobStep;

    /// Prompt shown while this job is foreground
    fn prompt(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoJob;

    impl JobProgram for EchoJob {
        fn handle_line(&mut self, line: &str, ctx: &mut JobContext<'_>) -> JobStep {
            ctx.emit(format!("echo: {}", line));
            JobStep::Continue
        }
    }

    #[test]
    fn test_context_collects_output() {
        let mut out = Vec::new();
        let mut log = SessionLog::new();
        let mut ctx = JobContext::new(&mut out, &mut log);

        let step = EchoJob.handle_line("hello", &mut ctx);
        assert_eq!(step, JobStep::Continue);
        assert_eq!(out, vec!["echo: hello".to_string()]);
    }

    #[test]
    fn test_default_hooks_are_no_ops() {
        let mut out = Vec::new();
        let mut log = SessionLog::new();
        let mut ctx = JobContext::new(&mut out, &mut log);

        let mut job = EchoJob;
        job.startup(None, &mut ctx);
        job.resume(&mut ctx);
        job.cleanup(&mut ctx);
        assert!(out.is_empty());
        assert_eq!(job.prompt(), "");
    }
}
