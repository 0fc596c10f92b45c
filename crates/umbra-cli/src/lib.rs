//! CLI logic for the Umbra class diagram tool.
//!
//! This module contains the core CLI logic: load a project file, generate
//! its declarations and optionally render an SVG preview.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use umbra::{ProjectBuilder, UmbraError};

/// Run the Umbra CLI application
///
/// This function replays the input project, writes the generated
/// declarations to the output file (or stdout) and, when requested, writes
/// an SVG preview.
///
/// # Errors
///
/// Returns `UmbraError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Project and member notation errors
/// - Routing errors while rendering the preview
pub fn run(args: &Args) -> Result<(), UmbraError> {
    info!(input_path = args.input; "Processing project");

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = ProjectBuilder::new(app_config);
    let project = builder.parse(&source)?;
    let text = builder.generate(project.model());

    match &args.output {
        Some(output) => {
            fs::write(output, format!("{text}\n"))?;
            info!(output_file = output; "Declarations written");
        }
        None => println!("{text}"),
    }

    if let Some(svg_path) = &args.svg {
        let svg = builder.render_svg(&project)?;
        fs::write(svg_path, svg)?;
        info!(svg_file = svg_path; "SVG preview exported successfully");
    }

    Ok(())
}
