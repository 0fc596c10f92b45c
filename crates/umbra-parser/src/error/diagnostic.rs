//! The core diagnostic type for notation errors.

use std::fmt;

use crate::{error::ErrorCode, span::Span};

/// A single notation error with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    span: Span,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic with an empty span at offset zero.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            span: Span::default(),
            help: None,
        }
    }

    /// Set the span the diagnostic points at.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Move the span forward, used when a line is parsed out of a larger text.
    pub fn shifted(mut self, offset: usize) -> Self {
        self.span = self.span.shift(offset);
        self
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the span.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label text for the span.
    pub fn label(&self) -> &'static str {
        self.code.description()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}
