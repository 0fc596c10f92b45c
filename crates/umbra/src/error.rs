//! Error types for Umbra operations.
//!
//! This module provides the main error type [`UmbraError`] which wraps
//! the error conditions of every stage: model mutation, member notation
//! parsing, routing, project loading and I/O.

use std::io;

use thiserror::Error;

use umbra_core::error::ModelError;
use umbra_parser::error::ParseError;

use crate::route::RouteError;

/// The main error type for Umbra operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the member notation that failed together with
/// the span-carrying diagnostics, so callers can render source snippets.
#[derive(Debug, Error)]
pub enum UmbraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Project error: {0}")]
    Project(String),
}

impl UmbraError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
