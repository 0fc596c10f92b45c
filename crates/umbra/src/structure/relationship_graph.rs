//! Directed relationship edges between entities.
//!
//! The graph stores relationships in insertion order and keeps two
//! per-entity indices, outgoing and incoming, so that removal cascades and
//! touching queries never scan the whole edge set.
//!
//! Self-relationships and several relationships between the same pair are
//! both allowed; the router separates parallel edges by their position in
//! [`RelationshipGraph::between`].

use std::collections::HashMap;

use indexmap::IndexMap;

use umbra_core::{
    error::ModelError,
    identifier::{EntityId, RelationshipId, Sequence},
    semantic::RelationshipKind,
};

use super::EntityStore;

/// A directed relationship between two entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    id: RelationshipId,
    source: EntityId,
    target: EntityId,
    kind: RelationshipKind,
    source_multiplicity: String,
    target_multiplicity: String,
    label: String,
}

impl Relationship {
    pub fn id(&self) -> RelationshipId {
        self.id
    }

    pub fn source(&self) -> EntityId {
        self.source
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn source_multiplicity(&self) -> &str {
        &self.source_multiplicity
    }

    pub fn target_multiplicity(&self) -> &str {
        &self.target_multiplicity
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Checks whether `entity` is the source or the target.
    pub fn touches(&self, entity: EntityId) -> bool {
        self.source == entity || self.target == entity
    }

    pub(crate) fn set_kind(&mut self, kind: RelationshipKind) {
        self.kind = kind;
    }

    pub(crate) fn set_label(&mut self, label: &str) {
        self.label = label.trim().to_string();
    }

    pub(crate) fn set_multiplicities(&mut self, source: &str, target: &str) {
        self.source_multiplicity = source.trim().to_string();
        self.target_multiplicity = target.trim().to_string();
    }
}

/// Owns the relationships of one model.
#[derive(Debug, Default)]
pub struct RelationshipGraph {
    relationships: IndexMap<RelationshipId, Relationship>,
    outgoing: HashMap<EntityId, Vec<RelationshipId>>,
    incoming: HashMap<EntityId, Vec<RelationshipId>>,
    ids: Sequence,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the relationship with the given id, if it exists.
    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.get(&id)
    }

    /// Returns all relationships in insertion order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Returns every relationship whose source or target is `entity`, in
    /// insertion order. A self-relationship appears once.
    pub fn touching(&self, entity: EntityId) -> Vec<&Relationship> {
        let mut ids: Vec<RelationshipId> = self
            .outgoing
            .get(&entity)
            .into_iter()
            .chain(self.incoming.get(&entity))
            .flatten()
            .copied()
            .collect();
        // Ids are allocated monotonically, so sorting restores insertion order
        ids.sort_unstable();
        ids.dedup();

        ids.into_iter()
            .filter_map(|id| self.relationships.get(&id))
            .collect()
    }

    /// Returns the relationships from `source` to `target`, in insertion order.
    pub fn between(&self, source: EntityId, target: EntityId) -> Vec<&Relationship> {
        self.outgoing
            .get(&source)
            .into_iter()
            .flatten()
            .filter_map(|id| self.relationships.get(id))
            .filter(|relationship| relationship.target == target)
            .collect()
    }

    /// Adds a relationship between two live entities of `entities`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn add(
        &mut self,
        entities: &EntityStore,
        source: EntityId,
        target: EntityId,
        kind: RelationshipKind,
        source_multiplicity: &str,
        target_multiplicity: &str,
        label: &str,
    ) -> Result<RelationshipId, ModelError> {
        entities.require(source)?;
        entities.require(target)?;

        let id = self.ids.next_relationship();
        self.relationships.insert(
            id,
            Relationship {
                id,
                source,
                target,
                kind,
                source_multiplicity: source_multiplicity.trim().to_string(),
                target_multiplicity: target_multiplicity.trim().to_string(),
                label: label.trim().to_string(),
            },
        );
        self.outgoing.entry(source).or_default().push(id);
        self.incoming.entry(target).or_default().push(id);
        Ok(id)
    }

    pub(crate) fn relationship_mut(
        &mut self,
        id: RelationshipId,
    ) -> Result<&mut Relationship, ModelError> {
        self.relationships
            .get_mut(&id)
            .ok_or(ModelError::not_found(id))
    }

    /// Removes one relationship. Returns `false` when it did not exist.
    pub(crate) fn remove(&mut self, id: RelationshipId) -> bool {
        let Some(relationship) = self.relationships.shift_remove(&id) else {
            return false;
        };

        Self::unindex(&mut self.outgoing, relationship.source, id);
        Self::unindex(&mut self.incoming, relationship.target, id);
        true
    }

    /// Removes every relationship touching `entity` and returns how many
    /// were removed.
    pub(crate) fn cascade_remove(&mut self, entity: EntityId) -> usize {
        let doomed: Vec<RelationshipId> = self
            .touching(entity)
            .into_iter()
            .map(Relationship::id)
            .collect();

        doomed.into_iter().filter(|id| self.remove(*id)).count()
    }

    fn unindex(
        index: &mut HashMap<EntityId, Vec<RelationshipId>>,
        entity: EntityId,
        id: RelationshipId,
    ) {
        if let Some(ids) = index.get_mut(&entity) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                index.remove(&entity);
            }
        }
    }
}
