//! # Session Log
//!
//! Structured logging for the session host.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not printf-style. The log is an
//! in-process sink owned by the session and threaded to whoever needs it;
//! there is no global logger.

use session_types::JobId;
use std::fmt;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Source job (if known)
    pub source: Option<JobId>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Sets the source job
    pub fn with_source(mut self, source: JobId) -> Self {
        self.source = Some(source);
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Renders the entry as a single text line
    pub fn render(&self) -> String {
        let mut line = format!("{:5} {}", self.level, self.message);
        if let Some(source) = self.source {
            line.push_str(&format!(" [{}]", source.short()));
        }
        for (key, value) in &self.fields {
            line.push_str(&format!(" {}={}", key, value));
        }
        line
    }
}

/// Collecting log sink with level filtering
#[derive(Debug)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
    min_level: LogLevel,
}

impl SessionLog {
    /// Creates a log that keeps entries at `Info` and above
    pub fn new() -> Self {
        Self::with_min_level(LogLevel::Info)
    }

    /// Creates a log that keeps entries at `min_level` and above
    pub fn with_min_level(min_level: LogLevel) -> Self {
        Self {
            entries: Vec::new(),
            min_level,
        }
    }

    /// Records an entry, dropping it if below the minimum level
    pub fn record(&mut self, entry: LogEntry) {
        if entry.level >= self.min_level {
            self.entries.push(entry);
        }
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.record(LogEntry::new(LogLevel::Debug, message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(LogEntry::new(LogLevel::Info, message));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.record(LogEntry::new(LogLevel::Warn, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.record(LogEntry::new(LogLevel::Error, message));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn entries_at_or_above(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level >= level).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the whole log as text lines
    pub fn render_lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.render()).collect()
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}
