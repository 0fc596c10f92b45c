//! Configuration types for code generation and routing.
//!
//! All types implement [`serde::Deserialize`]; every field has a default, so
//! a configuration file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining both sections.
//! - [`CodegenConfig`] - Indentation and relationship trace comments.
//! - [`RouterConfig`] - Parallel-edge stride, label offset and marker size.
//!
//! # Example
//!
//! ```
//! # use umbra::config::AppConfig;
//! let config: AppConfig = toml::from_str("[router]\nstride = 24.0").unwrap();
//! assert_eq!(config.router().stride(), 24.0);
//! assert_eq!(config.codegen().indent(), "  ");
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Code generation section.
    #[serde(default)]
    codegen: CodegenConfig,

    /// Relationship routing section.
    #[serde(default)]
    router: RouterConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(codegen: CodegenConfig, router: RouterConfig) -> Self {
        Self { codegen, router }
    }

    /// Returns the code generation configuration.
    pub fn codegen(&self) -> &CodegenConfig {
        &self.codegen
    }

    /// Returns the routing configuration.
    pub fn router(&self) -> &RouterConfig {
        &self.router
    }
}

/// Settings for generated declarations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Indentation unit for member lines and nested blocks.
    indent: String,

    /// Emit `// Kind: Source -> Target` lines after each declaration.
    trace_relationships: bool,
}

impl CodegenConfig {
    /// Creates a new [`CodegenConfig`].
    pub fn new(indent: impl Into<String>, trace_relationships: bool) -> Self {
        Self {
            indent: indent.into(),
            trace_relationships,
        }
    }

    /// Returns the indentation unit.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Returns whether relationship trace comments are emitted.
    pub fn trace_relationships(&self) -> bool {
        self.trace_relationships
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            trace_relationships: true,
        }
    }
}

/// Settings for the relationship router, in geometry units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Perpendicular distance between parallel relationships of one pair.
    stride: f32,

    /// Distance between a connector segment and its text.
    label_offset: f32,

    /// Marker extent along the connector.
    marker_length: f32,

    /// Marker extent across the connector.
    marker_width: f32,
}

impl RouterConfig {
    /// Creates a new [`RouterConfig`].
    pub fn new(stride: f32, label_offset: f32, marker_length: f32, marker_width: f32) -> Self {
        Self {
            stride,
            label_offset,
            marker_length,
            marker_width,
        }
    }

    pub fn stride(&self) -> f32 {
        self.stride
    }

    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }

    pub fn marker_length(&self) -> f32 {
        self.marker_length
    }

    pub fn marker_width(&self) -> f32 {
        self.marker_width
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            stride: 40.0,
            label_offset: 6.0,
            marker_length: 12.0,
            marker_width: 10.0,
        }
    }
}
