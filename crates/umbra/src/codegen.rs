//! Declaration text generated from the model.
//!
//! The [`CodeGenerator`] trait maps one entity (or the whole model) to
//! UML-style source text. [`DeclarationGenerator`] is the built-in
//! implementation:
//!
//! ```text
//! class Dog extends Animal {
//!   public String name;
//!   public void speak { }
//! }
//! // Association: Dog -> Owner
//! ```
//!
//! Generation is pure: it reads the model and never changes it, and the same
//! model always yields the same text.

use log::info;

use umbra_core::{
    error::ModelError,
    identifier::EntityId,
    semantic::{EntityKind, Member, RelationshipKind},
};

use crate::{
    config::CodegenConfig,
    structure::{Entity, ModelGraph},
};

/// Renders model entities as text.
pub trait CodeGenerator {
    /// Generates the declaration of one entity.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when `entity` is not in the model.
    fn generate(&self, model: &ModelGraph, entity: EntityId) -> Result<String, ModelError>;

    /// Generates every top-level entity in creation order, separated by a
    /// blank line. Nested entities appear inside their package.
    fn generate_all(&self, model: &ModelGraph) -> String;
}

/// The default [`CodeGenerator`].
///
/// # Examples
///
/// ```
/// use umbra::{ModelGraph, codegen::{CodeGenerator, DeclarationGenerator}};
/// use umbra::semantic::EntityKind;
///
/// let mut model = ModelGraph::new();
/// let animal = model.create_entity(EntityKind::Class, "Animal").unwrap();
/// model.add_attribute(animal, "public", "name", "String").unwrap();
/// model.add_operation(animal, "public", "speak", "void").unwrap();
///
/// let text = DeclarationGenerator::default().generate(&model, animal).unwrap();
/// assert_eq!(text, "class Animal {\n  public String name;\n  public void speak { }\n}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeclarationGenerator {
    config: CodegenConfig,
}

impl DeclarationGenerator {
    pub fn new(config: CodegenConfig) -> Self {
        Self { config }
    }

    fn entity_lines(&self, model: &ModelGraph, entity: &Entity) -> Vec<String> {
        let mut lines = vec![self.header(model, entity)];
        let indent = self.config.indent();

        match entity.kind() {
            EntityKind::Package => {
                let children = model.entity_store().children(entity.id());
                for (index, child) in children.enumerate() {
                    if index > 0 {
                        lines.push(String::new());
                    }
                    lines.extend(
                        self.entity_lines(model, child)
                            .into_iter()
                            .map(|line| indent_line(indent, line)),
                    );
                }
            }
            EntityKind::Class | EntityKind::Interface => {
                lines.extend(
                    entity
                        .members()
                        .iter()
                        .map(|entry| format!("{indent}{}", member_line(entry.member()))),
                );
            }
        }

        lines.push("}".to_string());

        if self.config.trace_relationships() {
            lines.extend(trace_lines(model, entity));
        }

        lines
    }

    fn header(&self, model: &ModelGraph, entity: &Entity) -> String {
        let mut header = format!("{} {}", entity.kind().keyword(), entity.title());
        if let Some(parent) = superclass(model, entity.id()) {
            header.push_str(" extends ");
            header.push_str(parent.title());
        }
        header.push_str(" {");
        header
    }
}

impl CodeGenerator for DeclarationGenerator {
    fn generate(&self, model: &ModelGraph, entity: EntityId) -> Result<String, ModelError> {
        let entity = model
            .entity(entity)
            .ok_or(ModelError::not_found(entity))?;
        Ok(self.entity_lines(model, entity).join("\n"))
    }

    fn generate_all(&self, model: &ModelGraph) -> String {
        let blocks: Vec<String> = model
            .entities()
            .filter(|entity| entity.parent().is_none())
            .map(|entity| self.entity_lines(model, entity).join("\n"))
            .collect();

        info!(declarations = blocks.len(); "Generated project declarations");
        blocks.join("\n\n")
    }
}

/// The source of the first inbound inheritance relationship, if any.
fn superclass(model: &ModelGraph, entity: EntityId) -> Option<&Entity> {
    model
        .relationships_touching(entity)
        .into_iter()
        .find(|r| r.kind() == RelationshipKind::Inheritance && r.target() == entity)
        .and_then(|r| model.entity(r.source()))
}

fn member_line(member: &Member) -> String {
    match member {
        Member::Attribute(attribute) => format!(
            "{} {} {};",
            attribute.visibility(),
            attribute.data_type(),
            attribute.name()
        ),
        Member::Operation(operation) => format!(
            "{} {} {} {{ }}",
            operation.visibility(),
            operation.return_type(),
            operation.name()
        ),
    }
}

fn trace_lines(model: &ModelGraph, entity: &Entity) -> Vec<String> {
    model
        .relationships_touching(entity.id())
        .into_iter()
        .filter(|r| r.kind() != RelationshipKind::Inheritance)
        .filter_map(|r| {
            let source = model.entity(r.source())?;
            let target = model.entity(r.target())?;
            Some(format!(
                "// {}: {} -> {}",
                r.kind(),
                source.title(),
                target.title()
            ))
        })
        .collect()
}

fn indent_line(indent: &str, line: String) -> String {
    if line.is_empty() {
        line
    } else {
        format!("{indent}{line}")
    }
}
