//! Diagram structure: entities, relationships and the facade over both.
//!
//! # Architecture
//!
//! - [`EntityStore`]: classes, interfaces and packages with their members
//! - [`RelationshipGraph`]: directed edges between live entities, indexed
//!   by source and by target
//! - [`ModelGraph`]: the single mutation and query API; keeps the two
//!   stores consistent, including cascade removal
//!
//! Both stores only expose read access outside this module. Every change
//! goes through [`ModelGraph`].

mod entity_store;
mod model_graph;
mod relationship_graph;

pub use entity_store::{Entity, EntityStore, MemberEntry};
pub use model_graph::ModelGraph;
pub use relationship_graph::{Relationship, RelationshipGraph};
