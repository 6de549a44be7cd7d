//! Dispatcher: routes input to the foreground job and applies control steps
//!
//! The dispatcher is pumped one input line at a time by the driver. While a
//! job is foreground the line goes to that job's run behavior; while idle the
//! line is parsed as a top-level control expression. Control transfer is
//! tracked with an explicit invocation stack, so quit returns to the caller
//! and suspend clears the stack back to the top level.

use crate::commands::{ControlParseError, ControlRequest};
use crate::job::{JobContext, JobProgram, JobStep};
use crate::registry::{ControlError, JobRegistry};
use session_log::{LogEntry, LogLevel, SessionLog};
use session_types::{keys, JobId, Signal};

/// Prompt shown while no job is foreground
pub const TOP_LEVEL_PROMPT: &str = ">> ";

/// Result of pumping one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    /// Output lines produced while handling the input
    pub output: Vec<String>,
    /// True once the session has ended; further input is ignored
    pub ended: bool,
}

/// The top-level driver of the job-control state machine
///
/// Owns the registry, one run program per job, and the invocation stack.
/// The first registered job is the root interpreter: the session starts in
/// it, and quitting it at the bottom of the stack ends the session.
pub struct Dispatcher {
    registry: JobRegistry,
    programs: Vec<(JobId, Box<dyn JobProgram>)>,
    invocation_stack: Vec<JobId>,
    root: Option<JobId>,
    log: SessionLog,
    ended: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_log(SessionLog::new())
    }

    pub fn with_log(log: SessionLog) -> Self {
        Self {
            registry: JobRegistry::new(),
            programs: Vec::new(),
            invocation_stack: Vec::new(),
            root: None,
            log,
            ended: false,
        }
    }

    /// Registers a job; the first one registered becomes the root interpreter
    pub fn register(
        &mut self,
        name: &str,
        program: Box<dyn JobProgram>,
    ) -> Result<JobId, ControlError> {
        let id = self.registry.register(name)?;
        self.programs.push((id, program));
        if self.root.is_none() {
            self.root = Some(id);
        }
        Ok(id)
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn root(&self) -> Option<JobId> {
        self.root
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Depth of the invocation stack (callers awaiting a quit)
    pub fn invocation_depth(&self) -> usize {
        self.invocation_stack.len()
    }

    /// Prompt for the current control holder
    pub fn prompt(&self) -> String {
        match self.registry.foreground() {
            Some(id) => match self.program_index(id) {
                Some(idx) => self.programs[idx].1.prompt(),
                None => TOP_LEVEL_PROMPT.into(),
            },
            None => TOP_LEVEL_PROMPT.into(),
        }
    }

    /// Starts the session by invoking the root interpreter
    pub fn start(&mut self) -> Feed {
        let mut out = Vec::new();
        match self.root.and_then(|id| self.registry.name_of(id).map(String::from)) {
            Some(name) => self.invoke(&name, None, &mut out),
            None => out.push("? no jobs registered".into()),
        }
        Feed {
            output: out,
            ended: self.ended,
        }
    }

    /// Pumps one line of operator input through the session
    pub fn feed_line(&mut self, line: &str) -> Feed {
        let mut out = Vec::new();
        if self.ended {
            return Feed {
                output: out,
                ended: true,
            };
        }

        match self.registry.foreground() {
            Some(id) => {
                let step = self.run_handle_line(id, line, &mut out);
                self.apply_step(id, step, &mut out);
            }
            None => self.handle_idle_line(line, &mut out),
        }

        Feed {
            output: out,
            ended: self.ended,
        }
    }

    /// One `jobs()` listing line per job, in declaration order
    pub fn list_lines(&self) -> Vec<String> {
        self.registry
            .list()
            .into_iter()
            .map(|j| format!("{}  {:<8} {}", j.id.short(), j.name, j.state))
            .collect()
    }

    // --- step application ---

    fn apply_step(&mut self, id: JobId, step: JobStep, out: &mut Vec<String>) {
        match step {
            JobStep::Continue => {}
            JobStep::Signal(Signal::Quit) => self.handle_quit(id, out),
            JobStep::Signal(Signal::Suspend) => self.handle_suspend(id, out),
            JobStep::Control(req) => self.apply_control(req, out),
            JobStep::Passthrough(expr) => self.handle_passthrough(id, &expr, out),
        }
    }

    /// Quit returns control to whoever invoked the job; quitting the root
    /// interpreter with no caller left ends the session.
    fn handle_quit(&mut self, id: JobId, out: &mut Vec<String>) {
        self.run_cleanup(id, out);
        if let Err(e) = self.registry.mark_background(id) {
            out.push(format!("? {}", e));
            return;
        }
        self.log_transition(id, "quit");

        if let Some(caller) = self.invocation_stack.pop() {
            if let Err(e) = self.registry.mark_foreground(caller) {
                out.push(format!("? {}", e));
                return;
            }
            self.run_resume(caller, out);
        } else if self.root == Some(id) {
            self.ended = true;
            self.log.info("session ended: interpreter quit");
        }
    }

    /// Suspend returns control unconditionally to the top level; any
    /// intermediate callers stay Background.
    fn handle_suspend(&mut self, id: JobId, out: &mut Vec<String>) {
        if let Err(e) = self.registry.mark_suspended(id) {
            out.push(format!("? {}", e));
            return;
        }
        self.invocation_stack.clear();
        self.log_transition(id, "suspend");
    }

    fn apply_control(&mut self, req: ControlRequest, out: &mut Vec<String>) {
        match req {
            ControlRequest::Jobs => out.extend(self.list_lines()),
            ControlRequest::ResumeLast => self.resume_last(out),
            ControlRequest::Invoke { name, arg } => self.invoke(&name, arg.as_deref(), out),
            ControlRequest::Exit => {
                self.ended = true;
                self.log.info("session ended: exit() at top level");
            }
        }
    }

    /// Transfers control to the named job; the current foreground (if any)
    /// becomes the caller awaiting its quit.
    fn invoke(&mut self, name: &str, arg: Option<&str>, out: &mut Vec<String>) {
        let id = match self.registry.lookup(name) {
            Ok(id) => id,
            Err(e) => {
                out.push(format!("? {}", e));
                return;
            }
        };

        if self.registry.foreground() == Some(id) {
            // idempotent: invoking the foreground job changes nothing
            return;
        }

        let caller = self.registry.foreground();
        if let Err(e) = self.registry.mark_foreground(id) {
            out.push(format!("? {}", e));
            return;
        }
        if let Some(c) = caller {
            self.invocation_stack.push(c);
        }
        self.log_transition(id, "invoke");
        self.run_startup(id, arg, out);
    }

    /// Resumes the most recently suspended job, `invoke`-style but without a
    /// name lookup and without re-running startup.
    fn resume_last(&mut self, out: &mut Vec<String>) {
        let id = match self.registry.pop_most_recently_suspended() {
            Ok(id) => id,
            Err(e) => {
                out.push(format!("? {}", e));
                return;
            }
        };

        let caller = self.registry.foreground();
        if let Err(e) = self.registry.mark_foreground(id) {
            out.push(format!("? {}", e));
            return;
        }
        if let Some(c) = caller {
            self.invocation_stack.push(c);
        }
        self.log_transition(id, "resume");
        self.run_resume(id, out);
    }

    /// `!expr`: evaluates against the interpreter without a control transfer
    fn handle_passthrough(&mut self, from: JobId, expr: &str, out: &mut Vec<String>) {
        let root = match self.root {
            Some(r) => r,
            None => {
                out.push("? no interpreter registered".into());
                return;
            }
        };
        if root == from {
            out.push("? already in the interpreter".into());
            return;
        }

        let step = self.run_handle_line(root, expr, out);
        match step {
            JobStep::Continue => {}
            JobStep::Control(ControlRequest::Jobs) => out.extend(self.list_lines()),
            _ => out.push("? control transfer not allowed in passthrough".into()),
        }
    }

    /// Top-level control surface while no job is foreground
    fn handle_idle_line(&mut self, line: &str, out: &mut Vec<String>) {
        if keys::is_suspend(line) {
            out.push("? no foreground job".into());
            return;
        }
        if keys::is_end_of_input(line) {
            self.ended = true;
            self.log.info("session ended: end of input at top level");
            return;
        }
        match ControlRequest::parse(line) {
            Ok(req) => self.apply_control(req, out),
            Err(ControlParseError::Empty) => {}
            Err(e) => out.push(format!("? {}", e)),
        }
    }

    // --- program hooks ---

    fn program_index(&self, id: JobId) -> Option<usize> {
        self.programs.iter().position(|(pid, _)| *pid == id)
    }

    fn run_handle_line(&mut self, id: JobId, line: &str, out: &mut Vec<String>) -> JobStep {
        match self.program_index(id) {
            Some(idx) => {
                let (_, prog) = &mut self.programs[idx];
                let mut ctx = JobContext::new(out, &mut self.log);
                prog.handle_line(line, &mut ctx)
            }
            None => JobStep::Continue,
        }
    }

    fn run_startup(&mut self, id: JobId, arg: Option<&str>, out: &mut Vec<String>) {
        if let Some(idx) = self.program_index(id) {
            let (_, prog) = &mut self.programs[idx];
            let mut ctx = JobContext::new(out, &mut self.log);
            prog.startup(arg, &mut ctx);
        }
    }

    fn run_resume(&mut self, id: JobId, out: &mut Vec<String>) {
        if let Some(idx) = self.program_index(id) {
            let (_, prog) = &mut self.programs[idx];
            let mut ctx = JobContext::new(out, &mut self.log);
            prog.resume(&mut ctx);
        }
    }

    fn run_cleanup(&mut self, id: JobId, out: &mut Vec<String>) {
        if let Some(idx) = self.program_index(id) {
            let (_, prog) = &mut self.programs[idx];
            let mut ctx = JobContext::new(out, &mut self.log);
            prog.cleanup(&mut ctx);
        }
    }

    fn log_transition(&mut self, id: JobId, action: &str) {
        let name = self
            .registry
            .name_of(id)
            .map(String::from)
            .unwrap_or_default();
        self.log.record(
            LogEntry::new(LogLevel::Info, format!("control: {}", action))
                .with_source(id)
                .with_field("job", name),
        );
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_types::JobState;

    /// Minimal interpreter: delegates control calls, quits on `q`/exit()
    struct StubShell;

    impl JobProgram for StubShell {
        fn handle_line(&mut self, line: &str, ctx: &mut JobContext<'_>) -> JobStep {
            if keys::is_suspend(line) {
                return JobStep::Signal(Signal::Suspend);
            }
            match ControlRequest::parse(line) {
                Ok(ControlRequest::Exit) => JobStep::Signal(Signal::Quit),
                Ok(req) => JobStep::Control(req),
                Err(_) => {
                    ctx.emit(format!("shell: {}", line));
                    JobStep::Continue
                }
            }
        }

        fn prompt(&self) -> String {
            ">> ".into()
        }
    }

    /// Minimal editor-shaped job: records lines, quits on `q`, suspends on
    /// ^Z, passes `!expr` through
    struct StubEditor {
        seen: Vec<String>,
    }

    impl StubEditor {
        fn new() -> Self {
            Self { seen: Vec::new() }
        }
    }

    impl JobProgram for StubEditor {
        fn handle_line(&mut self, line: &str, ctx: &mut JobContext<'_>) -> JobStep {
            if keys::is_suspend(line) {
                return JobStep::Signal(Signal::Suspend);
            }
            if line == "q" {
                return JobStep::Signal(Signal::Quit);
            }
            if let Some(expr) = line.strip_prefix('!') {
                return JobStep::Passthrough(expr.into());
            }
            if let Some(inner) = line.strip_prefix("call ") {
                return JobStep::Control(ControlRequest::Invoke {
                    name: inner.into(),
                    arg: None,
                });
            }
            self.seen.push(line.into());
            ctx.emit(format!("editor got: {}", line));
            JobStep::Continue
        }
    }

    fn session() -> (Dispatcher, JobId, JobId, JobId) {
        let mut d = Dispatcher::new();
        let shell = d.register("shell", Box::new(StubShell)).unwrap();
        let ed = d.register("ed", Box::new(StubEditor::new())).unwrap();
        let edsel = d.register("edsel", Box::new(StubEditor::new())).unwrap();
        d.start();
        (d, shell, ed, edsel)
    }

    fn state(d: &Dispatcher, id: JobId) -> JobState {
        d.registry().state_of(id).unwrap()
    }

    #[test]
    fn test_start_foregrounds_root() {
        let (d, shell, ed, _) = session();
        assert_eq!(d.registry().foreground(), Some(shell));
        assert_eq!(state(&d, ed), JobState::Loaded);
        assert!(!d.ended());
    }

    #[test]
    fn test_invoke_by_name_transfers_control() {
        let (mut d, shell, ed, _) = session();
        let feed = d.feed_line("ed()");
        assert!(feed.output.is_empty());
        assert_eq!(d.registry().foreground(), Some(ed));
        assert_eq!(state(&d, shell), JobState::Background);
        assert_eq!(d.invocation_depth(), 1);
    }

    #[test]
    fn test_unknown_job_reported_without_state_change() {
        let (mut d, shell, _, _) = session();
        let feed = d.feed_line("vi()");
        assert_eq!(feed.output, vec!["? unknown job: vi".to_string()]);
        assert_eq!(d.registry().foreground(), Some(shell));
        assert_eq!(d.invocation_depth(), 0);
    }

    #[test]
    fn test_quit_returns_to_caller() {
        let (mut d, shell, ed, _) = session();
        d.feed_line("ed()");
        let feed = d.feed_line("q");
        assert!(!feed.ended);
        assert_eq!(d.registry().foreground(), Some(shell));
        assert_eq!(state(&d, ed), JobState::Background);
        assert_eq!(d.invocation_depth(), 0);
    }

    #[test]
    fn test_nested_quit_unwinds_one_level() {
        let (mut d, shell, ed, edsel) = session();
        d.feed_line("ed()");
        d.feed_line("call edsel");
        assert_eq!(d.registry().foreground(), Some(edsel));
        assert_eq!(d.invocation_depth(), 2);

        d.feed_line("q");
        assert_eq!(d.registry().foreground(), Some(ed));
        assert_eq!(state(&d, edsel), JobState::Background);
        assert_eq!(d.invocation_depth(), 1);

        d.feed_line("q");
        assert_eq!(d.registry().foreground(), Some(shell));
    }

    #[test]
    fn test_suspend_returns_to_top_level() {
        let (mut d, shell, ed, edsel) = session();
        d.feed_line("ed()");
        d.feed_line("call edsel");

        d.feed_line("\x1a");
        assert_eq!(d.registry().foreground(), None);
        assert_eq!(state(&d, edsel), JobState::Suspended);
        // the intermediate caller stays Background, not Foreground
        assert_eq!(state(&d, ed), JobState::Background);
        assert_eq!(state(&d, shell), JobState::Background);
        assert_eq!(d.invocation_depth(), 0);
        assert_eq!(d.prompt(), TOP_LEVEL_PROMPT);
    }

    #[test]
    fn test_idle_accepts_control_expressions() {
        let (mut d, _, ed, _) = session();
        d.feed_line("ed()");
        d.feed_line("\x1a");
        assert_eq!(d.registry().foreground(), None);

        d.feed_line("edsel()");
        let edsel = d.registry().lookup("edsel").unwrap();
        assert_eq!(d.registry().foreground(), Some(edsel));
        assert_eq!(state(&d, ed), JobState::Suspended);
    }

    #[test]
    fn test_fg_resumes_most_recent() {
        let (mut d, _, ed, edsel) = session();
        d.feed_line("ed()");
        d.feed_line("\x1a");
        d.feed_line("edsel()");
        d.feed_line("\x1a");

        d.feed_line("fg()");
        assert_eq!(d.registry().foreground(), Some(edsel));
        d.feed_line("\x1a");
        d.feed_line("fg()");
        assert_eq!(d.registry().foreground(), Some(ed));
    }

    #[test]
    fn test_fg_with_nothing_suspended() {
        let (mut d, shell, _, _) = session();
        let feed = d.feed_line("fg()");
        assert_eq!(feed.output, vec!["? no suspended job".to_string()]);
        assert_eq!(d.registry().foreground(), Some(shell));
    }

    #[test]
    fn test_editor_state_survives_suspend_resume() {
        let (mut d, _, ed, _) = session();
        d.feed_line("ed()");
        d.feed_line("remember this");
        d.feed_line("\x1a");
        d.feed_line("edsel()");
        d.feed_line("q");
        d.feed_line("fg()");

        assert_eq!(d.registry().foreground(), Some(ed));
        let feed = d.feed_line("and this");
        assert_eq!(feed.output, vec!["editor got: and this".to_string()]);
    }

    #[test]
    fn test_quit_root_ends_session() {
        let (mut d, _, _, _) = session();
        let feed = d.feed_line("exit()");
        assert!(feed.ended);
        assert!(d.ended());

        // further input is ignored
        let feed = d.feed_line("jobs()");
        assert!(feed.output.is_empty());
    }

    #[test]
    fn test_quit_non_root_at_stack_bottom_goes_idle() {
        let (mut d, shell, ed, _) = session();
        d.feed_line("ed()");
        d.feed_line("\x1a");
        // shell is Background; resume ed from idle, then quit it
        d.feed_line("fg()");
        let feed = d.feed_line("q");
        assert!(!feed.ended);
        assert_eq!(d.registry().foreground(), None);
        assert_eq!(state(&d, ed), JobState::Background);
        assert_eq!(state(&d, shell), JobState::Background);
    }

    #[test]
    fn test_jobs_listing_in_declaration_order() {
        let (mut d, _, _, _) = session();
        d.feed_line("ed()");
        let feed = d.feed_line("!jobs()");
        assert_eq!(feed.output.len(), 3);
        assert!(feed.output[0].contains("shell"));
        assert!(feed.output[0].contains("Background"));
        assert!(feed.output[1].contains("ed"));
        assert!(feed.output[1].contains("Foreground"));
        assert!(feed.output[2].contains("edsel"));
        assert!(feed.output[2].contains("Loaded"));
    }

    #[test]
    fn test_passthrough_rejects_control_transfer() {
        let (mut d, _, ed, _) = session();
        d.feed_line("ed()");
        let feed = d.feed_line("!fg()");
        assert_eq!(
            feed.output,
            vec!["? control transfer not allowed in passthrough".to_string()]
        );
        assert_eq!(d.registry().foreground(), Some(ed));
    }

    #[test]
    fn test_passthrough_reaches_interpreter() {
        let (mut d, _, ed, _) = session();
        d.feed_line("ed()");
        let feed = d.feed_line("!hello there");
        assert_eq!(feed.output, vec!["shell: hello there".to_string()]);
        assert_eq!(d.registry().foreground(), Some(ed));
    }

    #[test]
    fn test_invoke_suspended_job_by_name() {
        let (mut d, _, ed, _) = session();
        d.feed_line("ed()");
        d.feed_line("\x1a");
        d.feed_line("ed()");
        assert_eq!(d.registry().foreground(), Some(ed));
        assert!(d.registry().suspended_stack().is_empty());
    }

    #[test]
    fn test_suspend_at_idle_reported() {
        let (mut d, _, _, _) = session();
        d.feed_line("\x1a"); // suspend the shell
        let feed = d.feed_line("\x1a");
        assert_eq!(feed.output, vec!["? no foreground job".to_string()]);
    }

    #[test]
    fn test_single_foreground_invariant_over_session() {
        let (mut d, _, _, _) = session();
        let script = [
            "ed()", "\x1a", "edsel()", "call ed", "q", "\x1a", "fg()", "q", "jobs()",
        ];
        for line in script {
            d.feed_line(line);
            let fg_count = d
                .registry()
                .list()
                .iter()
                .filter(|j| j.state == JobState::Foreground)
                .count();
            assert!(fg_count <= 1);
        }
    }
}
