//! Umbra - A UML class diagram model with code generation.
//!
//! The model holds classes, interfaces and packages with typed members and
//! directed relationships. From it Umbra generates declaration text, routes
//! orthogonal connectors between shapes and renders an SVG preview. Project
//! files describe a model in TOML.
//!
//! All mutation goes through [`ModelGraph`]; every other component only
//! reads it.

pub mod codegen;
pub mod config;
pub mod export;
pub mod interaction;
pub mod project;
pub mod route;

mod error;
mod structure;

pub use umbra_core::{geometry, identifier, semantic};

pub use error::UmbraError;
pub use structure::{Entity, EntityStore, MemberEntry, ModelGraph, Relationship, RelationshipGraph};

use indexmap::IndexMap;
use log::{debug, info};

use codegen::{CodeGenerator, DeclarationGenerator};
use config::AppConfig;
use identifier::RelationshipId;
use project::{LoadedProject, Project};
use route::{OrthogonalRouter, RelationshipRouter, Route};

/// Builder for loading, generating and rendering Umbra projects.
///
/// This provides an API for processing a project file through replay,
/// code generation, routing and preview rendering.
///
/// # Examples
///
/// ```rust
/// use umbra::{ProjectBuilder, config::AppConfig};
///
/// let source = r#"
/// name = "zoo"
///
/// [[entities]]
/// key = "animal"
/// kind = "class"
/// title = "Animal"
/// members = ["+ name: String", "+ speak(): void"]
/// "#;
///
/// let builder = ProjectBuilder::new(AppConfig::default());
/// let project = builder.parse(source).expect("Failed to parse");
///
/// let text = builder.generate(project.model());
/// assert_eq!(text, "class Animal {\n  public String name;\n  public void speak { }\n}");
/// ```
#[derive(Debug, Default)]
pub struct ProjectBuilder {
    config: AppConfig,
}

impl ProjectBuilder {
    /// Create a new project builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a TOML project file and replay it into a model.
    ///
    /// # Errors
    ///
    /// Returns `UmbraError` for malformed TOML, unknown keys, member
    /// notation errors, or values the model rejects.
    pub fn parse(&self, source: &str) -> Result<LoadedProject, UmbraError> {
        info!("Parsing project");

        let project = Project::from_toml(source)?;
        debug!(
            project = project.name,
            entities = project.entities.len(),
            relationships = project.relationships.len();
            "Project file read"
        );

        LoadedProject::replay(&project)
    }

    /// Generate declaration text for every top-level entity.
    pub fn generate(&self, model: &ModelGraph) -> String {
        DeclarationGenerator::new(self.config.codegen().clone()).generate_all(model)
    }

    /// Route every relationship of a loaded project.
    ///
    /// # Errors
    ///
    /// Returns `UmbraError::Route` when a connected entity has no bounds or
    /// degenerate bounds.
    pub fn route(
        &self,
        project: &LoadedProject,
    ) -> Result<IndexMap<RelationshipId, Route>, UmbraError> {
        let router = OrthogonalRouter::new(*self.config.router());
        let routes = router.recompute(project.model(), project.geometry())?;
        debug!(routes = routes.len(); "Relationships routed");
        Ok(routes)
    }

    /// Render a loaded project as an SVG preview.
    ///
    /// # Errors
    ///
    /// Returns `UmbraError::Route` when an entity has no bounds or a
    /// connected shape is degenerate.
    pub fn render_svg(&self, project: &LoadedProject) -> Result<String, UmbraError> {
        let routes = self.route(project)?;
        let svg = export::svg::render_preview(project.model(), project.geometry(), &routes)?;

        info!("SVG rendered successfully");
        Ok(svg)
    }
}
