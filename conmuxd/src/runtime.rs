//! The driver loop: scripted or interactive

use crate::script::{InputScript, ScriptError};
use crate::session::Session;
use job_control::ControlError;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Runtime error types
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    #[error("session error: {0}")]
    Session(#[from] ControlError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Runtime configuration
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Script text to replay instead of reading stdin
    pub script: Option<String>,
    /// Maximum script lines to feed (0 = unlimited)
    pub max_steps: usize,
    /// Echo each scripted input with its prompt
    pub echo: bool,
    /// Dump the session log after the session ends
    pub dump_log: bool,
}

/// Drives one session to completion
pub struct Runtime {
    config: RuntimeConfig,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let mut session = Session::new()?;
        let stdout = io::stdout();

        for line in session.start().output {
            writeln!(stdout.lock(), "{}", line)?;
        }

        match self.config.script.take() {
            Some(text) => self.run_script(&mut session, &text)?,
            None => self.run_interactive(&mut session)?,
        }

        if self.config.dump_log {
            let mut out = stdout.lock();
            for line in session.log().render_lines() {
                writeln!(out, "{}", line)?;
            }
        }
        Ok(())
    }

    fn run_script(&self, session: &mut Session, text: &str) -> Result<(), RuntimeError> {
        let mut script = InputScript::from_text(text)?;
        let mut steps = 0;
        let stdout = io::stdout();
        let mut out = stdout.lock();

        while let Some(line) = script.next_line() {
            if self.config.max_steps != 0 && steps >= self.config.max_steps {
                break;
            }
            steps += 1;

            if self.config.echo {
                writeln!(out, "{}{}", session.prompt(), printable(&line))?;
            }
            let feed = session.feed_line(&line);
            for text in feed.output {
                writeln!(out, "{}", text)?;
            }
            if feed.ended {
                break;
            }
        }
        Ok(())
    }

    fn run_interactive(&self, session: &mut Session) -> Result<(), RuntimeError> {
        let stdin = io::stdin();
        let stdout = io::stdout();

        loop {
            {
                let mut out = stdout.lock();
                write!(out, "{}", session.prompt())?;
                out.flush()?;
            }

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // stdin closed; treat as end of input at whatever level
                let feed = session.feed_line(&session_types::keys::END_OF_INPUT.to_string());
                let mut out = stdout.lock();
                for text in feed.output {
                    writeln!(out, "{}", text)?;
                }
                if !feed.ended {
                    continue;
                }
                return Ok(());
            }
            let line = line.trim_end_matches(['\n', '\r']);

            let feed = session.feed_line(line);
            let mut out = stdout.lock();
            for text in feed.output {
                writeln!(out, "{}", text)?;
            }
            if feed.ended {
                return Ok(());
            }
        }
    }
}

/// Control characters echoed back as their caret names
fn printable(line: &str) -> String {
    if session_types::keys::is_suspend(line) {
        "^Z".into()
    } else if session_types::keys::is_end_of_input(line) {
        "^D".into()
    } else {
        line.into()
    }
}
