//! Semantic model values for class diagrams.
//!
//! These are plain values: they validate themselves on construction but know
//! nothing about identity or storage. The `umbra` crate owns the stores that
//! give them ids.
//!
//! - [`EntityKind`] - class, interface or package
//! - [`Member`] - an [`Attribute`] or [`Operation`] with a [`Visibility`]
//! - [`RelationshipKind`] - association, aggregation, composition or inheritance

mod kind;
mod member;

pub use kind::{EntityKind, RelationshipKind};
pub use member::{Attribute, Member, Operation, Visibility};
