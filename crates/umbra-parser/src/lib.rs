//! # Umbra Parser
//!
//! Parser for the UML member notation used in Umbra project files and text
//! entry fields:
//!
//! ```text
//! + name: String
//! - speak(): void
//! protected items: List<Item>
//! ```
//!
//! ## Usage
//!
//! ```
//! # use umbra_parser::{parse_member, ParseError};
//! # use umbra_core::semantic::Visibility;
//! fn main() -> Result<(), ParseError> {
//!     let member = parse_member("+ speak(): void")?;
//!     assert!(member.is_operation());
//!     assert_eq!(member.visibility(), Visibility::Public);
//!     Ok(())
//! }
//! ```

pub mod error;

mod notation;
mod span;

pub use error::ParseError;
pub use span::Span;

use log::trace;

use umbra_core::semantic::Member;

/// Parse a single member declaration.
///
/// # Errors
///
/// Returns a [`ParseError`] with one diagnostic whose span points into
/// `source` when the declaration is malformed.
pub fn parse_member(source: &str) -> Result<Member, ParseError> {
    notation::parse_member(source)
}

/// Parse a block of member declarations, one per line.
///
/// Blank lines and lines starting with `//` are skipped. Every malformed
/// line contributes a diagnostic; spans are offsets into the whole block.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the diagnostics of all failing lines.
///
/// # Examples
///
/// ```
/// # use umbra_parser::parse_members;
/// let members = parse_members("+ name: String\n\n// behavior\n+ speak(): void").unwrap();
/// assert_eq!(members.len(), 2);
///
/// let err = parse_members("+ ok: int\nbroken\n- also broken").unwrap_err();
/// assert_eq!(err.diagnostics().len(), 2);
/// ```
pub fn parse_members(source: &str) -> Result<Vec<Member>, ParseError> {
    let mut members = Vec::new();
    let mut diagnostics = Vec::new();
    let mut line_start = 0;

    for raw_line in source.split('\n') {
        let offset = line_start;
        line_start += raw_line.len() + 1;

        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        match notation::parse_member(line) {
            Ok(member) => members.push(member),
            Err(err) => diagnostics.extend(err.shifted(offset).diagnostics().iter().cloned()),
        }
    }

    trace!(members = members.len(), errors = diagnostics.len(); "Parsed member block");

    if diagnostics.is_empty() {
        Ok(members)
    } else {
        Err(ParseError::new(diagnostics))
    }
}
