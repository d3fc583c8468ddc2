/// Severity levels mirror the usual editor diagnostic tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// A positioned message for the host editor. `start`/`end` are byte columns
/// within `line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn error(line: usize, start: usize, end: usize, message: impl Into<String>) -> Self {
        Self::new(line, start, end, Severity::Error, message)
    }

    pub fn warning(line: usize, start: usize, end: usize, message: impl Into<String>) -> Self {
        Self::new(line, start, end, Severity::Warning, message)
    }

    pub fn info(line: usize, start: usize, end: usize, message: impl Into<String>) -> Self {
        Self::new(line, start, end, Severity::Information, message)
    }

    pub fn hint(line: usize, start: usize, end: usize, message: impl Into<String>) -> Self {
        Self::new(line, start, end, Severity::Hint, message)
    }

    fn new(
        line: usize,
        start: usize,
        end: usize,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            start,
            end,
            severity,
            message: message.into(),
        }
    }
}
