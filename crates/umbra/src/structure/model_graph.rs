//! The model facade.
//!
//! [`ModelGraph`] composes an [`EntityStore`] and a [`RelationshipGraph`]
//! and is the only way to change either. Each method either applies its
//! whole change or returns an error with the state untouched; entity
//! removal and its relationship cascade happen inside one `&mut self` call,
//! so a dangling relationship is never observable.

use log::debug;

use umbra_core::{
    error::{ElementRef, ModelError},
    identifier::{EntityId, MemberId, RelationshipId},
    semantic::{EntityKind, Member, RelationshipKind, Visibility},
};

use super::{Entity, EntityStore, MemberEntry, Relationship, RelationshipGraph};

/// A class diagram: entities, their members, nesting and relationships.
///
/// # Examples
///
/// ```
/// use umbra::{ModelGraph, semantic::{EntityKind, RelationshipKind}};
///
/// let mut model = ModelGraph::new();
/// let a = model.create_entity(EntityKind::Class, "A").unwrap();
/// let b = model.create_entity(EntityKind::Class, "B").unwrap();
/// model
///     .add_relationship(a, b, RelationshipKind::Association, "1", "*", "")
///     .unwrap();
///
/// model.remove_entity(a);
/// assert_eq!(model.relationship_count(), 0);
/// assert!(model.relationships_touching(b).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ModelGraph {
    entities: EntityStore,
    relationships: RelationshipGraph,
}

impl ModelGraph {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the read-only entity store.
    pub fn entity_store(&self) -> &EntityStore {
        &self.entities
    }

    /// Returns the read-only relationship graph.
    pub fn relationship_graph(&self) -> &RelationshipGraph {
        &self.relationships
    }

    // -------------------------------------------------------------------------
    // Entities
    // -------------------------------------------------------------------------

    /// Creates an entity with an empty member list.
    ///
    /// # Errors
    ///
    /// Returns a validation error on [`Field::Title`] when the title is blank.
    ///
    /// [`Field::Title`]: umbra_core::error::Field::Title
    pub fn create_entity(
        &mut self,
        kind: EntityKind,
        title: &str,
    ) -> Result<EntityId, ModelError> {
        let id = self.entities.create(kind, title)?;
        debug!(id:% = id, kind:% = kind, title = title.trim(); "Created entity");
        Ok(id)
    }

    /// Renames an entity, with the same validation as creation.
    pub fn rename_entity(&mut self, id: EntityId, title: &str) -> Result<(), ModelError> {
        self.entities.rename(id, title)?;
        debug!(id:% = id, title = title.trim(); "Renamed entity");
        Ok(())
    }

    /// Removes an entity and every relationship touching it.
    ///
    /// Removing a package also removes the entities nested in it. Removing
    /// an unknown or already removed entity does nothing.
    pub fn remove_entity(&mut self, id: EntityId) {
        let removed = self.entities.remove(id);
        if removed.is_empty() {
            return;
        }

        let cascaded: usize = removed
            .iter()
            .map(|entity| self.relationships.cascade_remove(*entity))
            .sum();

        debug!(
            id:% = id,
            entities = removed.len(),
            relationships = cascaded;
            "Removed entity"
        );
    }

    /// Returns the entity with the given id, if it exists.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.entity(id)
    }

    /// Returns all entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.entities()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // -------------------------------------------------------------------------
    // Members
    // -------------------------------------------------------------------------

    /// Appends a member to a class or interface.
    ///
    /// # Errors
    ///
    /// - Not found when the entity does not exist.
    /// - A validation error on the `kind` field for packages.
    pub fn add_member(
        &mut self,
        entity: EntityId,
        member: Member,
    ) -> Result<MemberId, ModelError> {
        let description = member.to_string();
        let id = self.entities.add_member(entity, member)?;
        debug!(entity:% = entity, member:% = id, notation = description; "Added member");
        Ok(id)
    }

    /// Validates raw field values and appends an attribute.
    ///
    /// `visibility` must be one of `public`, `private` or `protected`.
    pub fn add_attribute(
        &mut self,
        entity: EntityId,
        visibility: &str,
        name: &str,
        data_type: &str,
    ) -> Result<MemberId, ModelError> {
        self.entities.require(entity)?;
        let visibility: Visibility = visibility
            .parse()
            .map_err(|err: ModelError| err.with_subject(entity))?;
        let member = Member::attribute(visibility, name, data_type)
            .map_err(|err| err.with_subject(entity))?;
        self.add_member(entity, member)
    }

    /// Validates raw field values and appends an operation.
    pub fn add_operation(
        &mut self,
        entity: EntityId,
        visibility: &str,
        name: &str,
        return_type: &str,
    ) -> Result<MemberId, ModelError> {
        self.entities.require(entity)?;
        let visibility: Visibility = visibility
            .parse()
            .map_err(|err: ModelError| err.with_subject(entity))?;
        let member = Member::operation(visibility, name, return_type)
            .map_err(|err| err.with_subject(entity))?;
        self.add_member(entity, member)
    }

    /// Removes a member. Removing a member that does not exist is a no-op.
    ///
    /// # Errors
    ///
    /// Returns not found only when the entity does not exist.
    pub fn remove_member(
        &mut self,
        entity: EntityId,
        member: MemberId,
    ) -> Result<(), ModelError> {
        if self.entities.remove_member(entity, member)? {
            debug!(entity:% = entity, member:% = member; "Removed member");
        }
        Ok(())
    }

    /// Returns the members of an entity in declared order.
    pub fn members(&self, entity: EntityId) -> Result<&[MemberEntry], ModelError> {
        Ok(self.entities.require(entity)?.members())
    }

    /// Returns one member of an entity.
    pub fn member(&self, entity: EntityId, member: MemberId) -> Result<&Member, ModelError> {
        self.entities
            .require(entity)?
            .member(member)
            .ok_or(ModelError::not_found(ElementRef::Member { entity, member }))
    }

    /// Returns the visibility of one member.
    pub fn member_visibility(
        &self,
        entity: EntityId,
        member: MemberId,
    ) -> Result<Visibility, ModelError> {
        Ok(self.member(entity, member)?.visibility())
    }

    /// Sets a member's visibility from its keyword form.
    ///
    /// Any string other than `public`, `private` or `protected` is rejected
    /// and the previous visibility is kept.
    pub fn set_member_visibility(
        &mut self,
        entity: EntityId,
        member: MemberId,
        marker: &str,
    ) -> Result<(), ModelError> {
        self.entities
            .edit_member(entity, member, |m| m.set_visibility(marker))?;
        debug!(
            entity:% = entity,
            member:% = member,
            visibility = marker;
            "Changed member visibility"
        );
        Ok(())
    }

    /// Renames a member.
    pub fn rename_member(
        &mut self,
        entity: EntityId,
        member: MemberId,
        name: &str,
    ) -> Result<(), ModelError> {
        self.entities.edit_member(entity, member, |m| m.rename(name))?;
        debug!(entity:% = entity, member:% = member, name = name.trim(); "Renamed member");
        Ok(())
    }

    /// Replaces the data type of an attribute or the return type of an operation.
    pub fn set_member_type(
        &mut self,
        entity: EntityId,
        member: MemberId,
        type_name: &str,
    ) -> Result<(), ModelError> {
        self.entities
            .edit_member(entity, member, |m| m.set_type_name(type_name))?;
        debug!(
            entity:% = entity,
            member:% = member,
            type_name = type_name.trim();
            "Changed member type"
        );
        Ok(())
    }

    /// Moves a member within its entity; `index` is clamped to the end.
    pub fn move_member(
        &mut self,
        entity: EntityId,
        member: MemberId,
        index: usize,
    ) -> Result<(), ModelError> {
        self.entities.move_member(entity, member, index)?;
        debug!(entity:% = entity, member:% = member, index; "Moved member");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Package containment
    // -------------------------------------------------------------------------

    /// Nests a class or interface in a package, moving it out of any
    /// previous package.
    ///
    /// # Errors
    ///
    /// A validation error on the `nesting` field when `child` is a package
    /// or `package` is not one.
    pub fn nest(&mut self, child: EntityId, package: EntityId) -> Result<(), ModelError> {
        self.entities.nest(child, package)?;
        debug!(child:% = child, package:% = package; "Nested entity");
        Ok(())
    }

    /// Moves an entity back to the top level. Idempotent.
    pub fn unnest(&mut self, child: EntityId) -> Result<(), ModelError> {
        self.entities.unnest(child)
    }

    /// Returns the ids nested in a package, in creation order.
    pub fn children(&self, package: EntityId) -> Result<Vec<EntityId>, ModelError> {
        self.entities.require(package)?;
        Ok(self.entities.children(package).map(Entity::id).collect())
    }

    /// Returns the package an entity is nested in.
    pub fn parent(&self, child: EntityId) -> Result<Option<EntityId>, ModelError> {
        Ok(self.entities.require(child)?.parent())
    }

    // -------------------------------------------------------------------------
    // Relationships
    // -------------------------------------------------------------------------

    /// Adds a directed relationship between two live entities.
    ///
    /// Self-relationships and repeated (source, target, kind) triples are
    /// accepted. Multiplicities and label are trimmed and may be empty.
    pub fn add_relationship(
        &mut self,
        source: EntityId,
        target: EntityId,
        kind: RelationshipKind,
        source_multiplicity: &str,
        target_multiplicity: &str,
        label: &str,
    ) -> Result<RelationshipId, ModelError> {
        let id = self.relationships.add(
            &self.entities,
            source,
            target,
            kind,
            source_multiplicity,
            target_multiplicity,
            label,
        )?;
        debug!(
            id:% = id,
            source:% = source,
            target:% = target,
            kind:% = kind;
            "Added relationship"
        );
        Ok(id)
    }

    /// Removes a relationship. Idempotent.
    pub fn remove_relationship(&mut self, id: RelationshipId) {
        if self.relationships.remove(id) {
            debug!(id:% = id; "Removed relationship");
        }
    }

    /// Returns the relationship with the given id, if it exists.
    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.relationship(id)
    }

    /// Returns all relationships in insertion order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.relationships()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Returns the relationships where `entity` is source or target, in
    /// insertion order.
    pub fn relationships_touching(&self, entity: EntityId) -> Vec<&Relationship> {
        self.relationships.touching(entity)
    }

    /// Returns the relationships from `source` to `target`, in insertion order.
    pub fn relationships_between(
        &self,
        source: EntityId,
        target: EntityId,
    ) -> Vec<&Relationship> {
        self.relationships.between(source, target)
    }

    /// Replaces a relationship's label.
    pub fn set_relationship_label(
        &mut self,
        id: RelationshipId,
        label: &str,
    ) -> Result<(), ModelError> {
        self.relationships.relationship_mut(id)?.set_label(label);
        debug!(id:% = id, label = label.trim(); "Changed relationship label");
        Ok(())
    }

    /// Replaces both multiplicities of a relationship.
    pub fn set_multiplicities(
        &mut self,
        id: RelationshipId,
        source: &str,
        target: &str,
    ) -> Result<(), ModelError> {
        self.relationships
            .relationship_mut(id)?
            .set_multiplicities(source, target);
        debug!(
            id:% = id,
            source = source.trim(),
            target = target.trim();
            "Changed multiplicities"
        );
        Ok(())
    }

    /// Changes the kind of a relationship.
    pub fn set_relationship_kind(
        &mut self,
        id: RelationshipId,
        kind: RelationshipKind,
    ) -> Result<(), ModelError> {
        self.relationships.relationship_mut(id)?.set_kind(kind);
        debug!(id:% = id, kind:% = kind; "Changed relationship kind");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use umbra_core::error::Field;

    use super::*;

    fn class(model: &mut ModelGraph, title: &str) -> EntityId {
        model.create_entity(EntityKind::Class, title).unwrap()
    }

    #[test]
    fn test_remove_cascades_relationships() {
        let mut model = ModelGraph::new();
        let a = class(&mut model, "A");
        let b = class(&mut model, "B");
        let c = class(&mut model, "C");
        model
            .add_relationship(a, b, RelationshipKind::Association, "", "", "")
            .unwrap();
        model
            .add_relationship(a, c, RelationshipKind::Composition, "", "", "")
            .unwrap();

        model.remove_entity(a);

        assert_eq!(model.relationship_count(), 0);
        assert!(model.relationships_touching(b).is_empty());
        assert!(model.relationships_touching(c).is_empty());
        assert!(model.entity(a).is_none());

        // Idempotent
        model.remove_entity(a);
        assert_eq!(model.entity_count(), 2);
    }

    #[test]
    fn test_remove_package_cascades_nested_relationships() {
        let mut model = ModelGraph::new();
        let package = model.create_entity(EntityKind::Package, "domain").unwrap();
        let inner = class(&mut model, "Inner");
        let outer = class(&mut model, "Outer");
        model.nest(inner, package).unwrap();
        model
            .add_relationship(outer, inner, RelationshipKind::Aggregation, "", "", "")
            .unwrap();

        model.remove_entity(package);

        assert!(model.entity(inner).is_none());
        assert_eq!(model.relationship_count(), 0);
        assert_eq!(model.entity_count(), 1);
    }

    #[test]
    fn test_add_relationship_to_missing_entity() {
        let mut model = ModelGraph::new();
        let a = class(&mut model, "A");
        let b = class(&mut model, "B");
        model.remove_entity(b);

        let err = model
            .add_relationship(a, b, RelationshipKind::Inheritance, "", "", "")
            .unwrap_err();
        assert_eq!(err, ModelError::not_found(b));
        assert_eq!(model.relationship_count(), 0);
    }

    #[test]
    fn test_add_attribute_validates_raw_fields() {
        let mut model = ModelGraph::new();
        let a = class(&mut model, "A");

        let err = model.add_attribute(a, "friend", "x", "int").unwrap_err();
        assert_eq!(err.field(), Some(Field::Visibility));

        let err = model.add_attribute(a, "public", "x", "  ").unwrap_err();
        assert_eq!(err.field(), Some(Field::DataType));

        let err = model.add_operation(a, "public", "", "void").unwrap_err();
        assert_eq!(err.field(), Some(Field::Name));

        assert!(model.members(a).unwrap().is_empty());

        let err = model
            .add_attribute(EntityId::new(404), "public", "x", "int")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_visibility_round_trip_and_rejection() {
        let mut model = ModelGraph::new();
        let a = class(&mut model, "A");
        let id = model.add_attribute(a, "public", "x", "int").unwrap();

        for marker in ["private", "protected", "public"] {
            model.set_member_visibility(a, id, marker).unwrap();
            assert_eq!(model.member_visibility(a, id).unwrap().as_str(), marker);
        }

        let err = model.set_member_visibility(a, id, "internal").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(model.member_visibility(a, id).unwrap(), Visibility::Public);
    }

    #[test]
    fn test_member_edits_on_missing_member() {
        let mut model = ModelGraph::new();
        let a = class(&mut model, "A");
        let missing = MemberId::new(500);

        assert!(model.rename_member(a, missing, "y").unwrap_err().is_not_found());
        assert!(model.set_member_type(a, missing, "int").unwrap_err().is_not_found());
        assert!(model.move_member(a, missing, 0).unwrap_err().is_not_found());
        assert!(model.member_visibility(a, missing).unwrap_err().is_not_found());
        model.remove_member(a, missing).unwrap();
    }

    #[test]
    fn test_relationship_edits() {
        let mut model = ModelGraph::new();
        let a = class(&mut model, "A");
        let b = class(&mut model, "B");
        let id = model
            .add_relationship(a, b, RelationshipKind::Association, "", "", "")
            .unwrap();

        model.set_relationship_label(id, " uses ").unwrap();
        model.set_multiplicities(id, "1", "0..*").unwrap();
        model
            .set_relationship_kind(id, RelationshipKind::Aggregation)
            .unwrap();

        let relationship = model.relationship(id).unwrap();
        assert_eq!(relationship.label(), "uses");
        assert_eq!(relationship.source_multiplicity(), "1");
        assert_eq!(relationship.target_multiplicity(), "0..*");
        assert_eq!(relationship.kind(), RelationshipKind::Aggregation);

        model.remove_relationship(id);
        model.remove_relationship(id);
        assert!(model.set_relationship_label(id, "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_children_and_parent() {
        let mut model = ModelGraph::new();
        let package = model.create_entity(EntityKind::Package, "shop").unwrap();
        let cart = class(&mut model, "Cart");
        let item = class(&mut model, "Item");
        model.nest(item, package).unwrap();
        model.nest(cart, package).unwrap();

        assert_eq!(model.children(package).unwrap(), vec![cart, item]);
        assert_eq!(model.parent(cart).unwrap(), Some(package));

        model.unnest(cart).unwrap();
        model.unnest(cart).unwrap();
        assert_eq!(model.parent(cart).unwrap(), None);
        assert_eq!(model.children(package).unwrap(), vec![item]);
    }
}
