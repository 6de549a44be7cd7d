//! Control-expression parsing
//!
//! The control surface is a set of callable operations: `jobs()`, `fg()`,
//! `exit()`, and `<jobname>()` with an optional quoted argument, e.g.
//! `ed('notes.txt')`. The same parser serves the interpreter job and the
//! top-level prompt, so both surfaces stay identical.

use thiserror::Error;

/// Control parse error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlParseError {
    #[error("empty input")]
    Empty,

    #[error("not a control call: {0}")]
    NotACall(String),

    #[error("malformed argument in: {0}")]
    BadArgument(String),
}

/// A parsed control request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlRequest {
    /// `<jobname>()` or `<jobname>('arg')`
    Invoke { name: String, arg: Option<String> },
    /// `jobs()` — list all jobs in declaration order
    Jobs,
    /// `fg()` — resume the most recently suspended job
    ResumeLast,
    /// `exit()` — end the session (top level) or quit the interpreter
    Exit,
}

impl ControlRequest {
    /// Parses one input line as a control call
    pub fn parse(input: &str) -> Result<Self, ControlParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ControlParseError::Empty);
        }

        let open = match input.find('(') {
            Some(i) if input.ends_with(')') => i,
            _ => return Err(ControlParseError::NotACall(input.into())),
        };

        let name = &input[..open];
        if name.is_empty() || !is_identifier(name) {
            return Err(ControlParseError::NotACall(input.into()));
        }

        let inner = input[open + 1..input.len() - 1].trim();

        match name {
            "jobs" | "fg" | "exit" => {
                if !inner.is_empty() {
                    return Err(ControlParseError::BadArgument(input.into()));
                }
                Ok(match name {
                    "jobs" => ControlRequest::Jobs,
                    "fg" => ControlRequest::ResumeLast,
                    _ => ControlRequest::Exit,
                })
            }
            _ => {
                let arg = parse_argument(inner)
                    .map_err(|_| ControlParseError::BadArgument(input.into()))?;
                Ok(ControlRequest::Invoke {
                    name: name.into(),
                    arg,
                })
            }
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses the call argument: empty, or a single- or double-quoted string
fn parse_argument(inner: &str) -> Result<Option<String>, ()> {
    if inner.is_empty() {
        return Ok(None);
    }
    for quote in ['\'', '"'] {
        if inner.len() >= 2 && inner.starts_with(quote) && inner.ends_with(quote) {
            let body = &inner[1..inner.len() - 1];
            if !body.contains(quote) {
                return Ok(Some(body.into()));
            }
        }
    }
    Err(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jobs() {
        assert_eq!(ControlRequest::parse("jobs()"), Ok(ControlRequest::Jobs));
        assert_eq!(ControlRequest::parse("  jobs()  "), Ok(ControlRequest::Jobs));
    }

    #[test]
    fn test_parse_fg_and_exit() {
        assert_eq!(ControlRequest::parse("fg()"), Ok(ControlRequest::ResumeLast));
        assert_eq!(ControlRequest::parse("exit()"), Ok(ControlRequest::Exit));
    }

    #[test]
    fn test_parse_invoke_no_arg() {
        assert_eq!(
            ControlRequest::parse("ed()"),
            Ok(ControlRequest::Invoke {
                name: "ed".into(),
                arg: None,
            })
        );
    }

    #[test]
    fn test_parse_invoke_with_arg() {
        assert_eq!(
            ControlRequest::parse("ed('notes.txt')"),
            Ok(ControlRequest::Invoke {
                name: "ed".into(),
                arg: Some("notes.txt".into()),
            })
        );
        assert_eq!(
            ControlRequest::parse("edsel(\"doc.md\")"),
            Ok(ControlRequest::Invoke {
                name: "edsel".into(),
                arg: Some("doc.md".into()),
            })
        );
    }

    #[test]
    fn test_builtins_take_no_arguments() {
        assert_eq!(
            ControlRequest::parse("fg('x')"),
            Err(ControlParseError::BadArgument("fg('x')".into()))
        );
    }

    #[test]
    fn test_not_a_call() {
        assert_eq!(
            ControlRequest::parse("hello world"),
            Err(ControlParseError::NotACall("hello world".into()))
        );
        assert_eq!(
            ControlRequest::parse("()"),
            Err(ControlParseError::NotACall("()".into()))
        );
        assert_eq!(
            ControlRequest::parse("3ed()"),
            Err(ControlParseError::NotACall("3ed()".into()))
        );
        assert_eq!(ControlRequest::parse("   "), Err(ControlParseError::Empty));
    }

    #[test]
    fn test_malformed_argument() {
        assert_eq!(
            ControlRequest::parse("ed(notes.txt)"),
            Err(ControlParseError::BadArgument("ed(notes.txt)".into()))
        );
        assert_eq!(
            ControlRequest::parse("ed('unterminated)"),
            Err(ControlParseError::BadArgument("ed('unterminated)".into()))
        );
    }
}
