//! Diagnostics for member notation errors.
//!
//! A [`Diagnostic`] describes one problem with an error code, a primary
//! span and optional help text. [`ParseError`] carries every diagnostic a
//! parse produced, so a multi-line member list reports all bad lines at once.
//!
//! # Example
//!
//! ```
//! # use umbra_parser::error::{Diagnostic, ErrorCode};
//! # use umbra_parser::Span;
//! let diag = Diagnostic::error(ErrorCode::E004, "expected `:` before the type")
//!     .with_span(Span::new(6..7))
//!     .with_help("write members as `+ name: Type`");
//!
//! assert_eq!(diag.to_string(), "error[E004]: expected `:` before the type");
//! ```

mod diagnostic;
mod error_code;
mod parse_error;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
