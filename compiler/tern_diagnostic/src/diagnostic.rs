use std::fmt;

use tern_ir::Span;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A reported problem at a source location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub span: Span,
    /// Values for the `{n}` placeholders of the code's template.
    pub args: Vec<String>,
}

impl Diagnostic {
    /// An error with no template arguments.
    pub fn error(code: ErrorCode, span: Span) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            span,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The rendered message.
    pub fn message(&self) -> String {
        let mut message = self.code.template().to_owned();
        for (i, arg) in self.args.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), arg);
        }
        message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] at {}: {}",
            self.severity,
            self.code,
            self.span,
            self.message()
        )
    }
}
