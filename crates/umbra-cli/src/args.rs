//! Command-line argument definitions for the Umbra CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the project file, the generated text
//! and preview destinations, configuration file selection, and logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the Umbra class diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input project file (TOML)
    #[arg(help = "Path to the input project file")]
    pub input: String,

    /// Path to the generated declarations; printed to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to an SVG preview of the diagram
    #[arg(long)]
    pub svg: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
