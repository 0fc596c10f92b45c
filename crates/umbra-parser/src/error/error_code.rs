//! Error codes for member notation diagnostics.
//!
//! - `E0xx` - Syntax errors
//! - `E1xx` - Model validation errors

use std::fmt;

/// Error codes for categorizing notation diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Missing or unknown visibility marker.
    ///
    /// Members start with `+`, `-`, `#` or one of the keywords `public`,
    /// `private`, `protected`.
    E001,

    /// Missing or malformed member name.
    E002,

    /// Unclosed parameter list.
    ///
    /// Operations are written with an empty parameter list `()`.
    E003,

    /// Missing `:` between the name and the type.
    E004,

    /// Missing type after `:`.
    E005,

    /// Unexpected input after a complete member.
    E006,

    /// The declaration is well-formed but the model rejected it.
    E100,
}

impl ErrorCode {
    /// Short label text shown under the offending span.
    pub fn description(self) -> &'static str {
        match self {
            Self::E001 => "missing visibility",
            Self::E002 => "missing name",
            Self::E003 => "unclosed parameter list",
            Self::E004 => "missing type separator",
            Self::E005 => "missing type",
            Self::E006 => "unexpected input",
            Self::E100 => "rejected member",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
