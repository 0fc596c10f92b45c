//! Storage for diagram entities and their members.
//!
//! Entities are kept in creation order; members keep their declared order
//! inside each entity. Read access is public, mutation is restricted to the
//! crate so that [`ModelGraph`](super::ModelGraph) can pair every removal
//! with the relationship cascade.

use indexmap::IndexMap;

use umbra_core::{
    error::{ElementRef, Field, ModelError, require_text},
    identifier::{EntityId, MemberId, Sequence},
    semantic::{EntityKind, Member},
};

/// A member together with its stable id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    id: MemberId,
    member: Member,
}

impl MemberEntry {
    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn member(&self) -> &Member {
        &self.member
    }
}

/// A class, interface or package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    title: String,
    members: Vec<MemberEntry>,
    parent: Option<EntityId>,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the trimmed title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the members in declared order. Always empty for packages.
    pub fn members(&self) -> &[MemberEntry] {
        &self.members
    }

    /// Looks up a member by id.
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.member)
    }

    /// Returns the package this entity is nested in.
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    fn member_index(&self, id: MemberId) -> Option<usize> {
        self.members.iter().position(|entry| entry.id == id)
    }
}

/// Owns every entity of one model and allocates entity and member ids.
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: IndexMap<EntityId, Entity>,
    ids: Sequence,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entity with the given id, if it exists.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Checks whether an entity with the given id exists.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Returns all entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the entities nested in `package`, in creation order.
    pub fn children(&self, package: EntityId) -> impl Iterator<Item = &Entity> {
        self.entities
            .values()
            .filter(move |entity| entity.parent == Some(package))
    }

    /// Returns the entity or a not-found error.
    pub(crate) fn require(&self, id: EntityId) -> Result<&Entity, ModelError> {
        self.entities.get(&id).ok_or(ModelError::not_found(id))
    }

    fn require_mut(&mut self, id: EntityId) -> Result<&mut Entity, ModelError> {
        self.entities
            .get_mut(&id)
            .ok_or(ModelError::not_found(id))
    }

    pub(crate) fn create(&mut self, kind: EntityKind, title: &str) -> Result<EntityId, ModelError> {
        let title = require_text(Field::Title, title)?;
        let id = self.ids.next_entity();
        self.entities.insert(
            id,
            Entity {
                id,
                kind,
                title,
                members: Vec::new(),
                parent: None,
            },
        );
        Ok(id)
    }

    pub(crate) fn rename(&mut self, id: EntityId, title: &str) -> Result<(), ModelError> {
        let entity = self.require_mut(id)?;
        entity.title = require_text(Field::Title, title).map_err(|err| err.with_subject(id))?;
        Ok(())
    }

    pub(crate) fn add_member(
        &mut self,
        id: EntityId,
        member: Member,
    ) -> Result<MemberId, ModelError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(ModelError::not_found(id))?;
        if !entity.kind.holds_members() {
            return Err(ModelError::validation(
                Field::Kind,
                format!("a {} cannot hold members", entity.kind),
            )
            .with_subject(id));
        }

        let member_id = self.ids.next_member();
        entity.members.push(MemberEntry {
            id: member_id,
            member,
        });
        Ok(member_id)
    }

    /// Removes a member. Returns `false` when the member did not exist.
    pub(crate) fn remove_member(
        &mut self,
        id: EntityId,
        member: MemberId,
    ) -> Result<bool, ModelError> {
        let entity = self.require_mut(id)?;
        let before = entity.members.len();
        entity.members.retain(|entry| entry.id != member);
        Ok(entity.members.len() != before)
    }

    /// Applies `edit` to one member; the edit must leave the member intact on error.
    pub(crate) fn edit_member<F>(
        &mut self,
        id: EntityId,
        member: MemberId,
        edit: F,
    ) -> Result<(), ModelError>
    where
        F: FnOnce(&mut Member) -> Result<(), ModelError>,
    {
        let entity = self.require_mut(id)?;
        let subject = ElementRef::Member { entity: id, member };
        let entry = entity
            .members
            .iter_mut()
            .find(|entry| entry.id == member)
            .ok_or(ModelError::not_found(subject))?;
        edit(&mut entry.member).map_err(|err| err.with_subject(subject))
    }

    /// Moves a member to `index`, clamped to the last position.
    pub(crate) fn move_member(
        &mut self,
        id: EntityId,
        member: MemberId,
        index: usize,
    ) -> Result<(), ModelError> {
        let entity = self.require_mut(id)?;
        let from = entity
            .member_index(member)
            .ok_or(ModelError::not_found(ElementRef::Member { entity: id, member }))?;
        let entry = entity.members.remove(from);
        let to = index.min(entity.members.len());
        entity.members.insert(to, entry);
        Ok(())
    }

    pub(crate) fn nest(&mut self, child: EntityId, package: EntityId) -> Result<(), ModelError> {
        let package_kind = self.require(package)?.kind;
        let child_kind = self.require(child)?.kind;

        if package_kind != EntityKind::Package {
            return Err(ModelError::validation(
                Field::Nesting,
                format!("entities can only be nested in a package, not a {package_kind}"),
            )
            .with_subject(package));
        }
        if child_kind == EntityKind::Package {
            return Err(ModelError::validation(Field::Nesting, "packages cannot be nested")
                .with_subject(child));
        }

        self.require_mut(child)?.parent = Some(package);
        Ok(())
    }

    pub(crate) fn unnest(&mut self, child: EntityId) -> Result<(), ModelError> {
        self.require_mut(child)?.parent = None;
        Ok(())
    }

    /// Removes an entity and, for a package, everything nested in it.
    ///
    /// Returns the removed ids, nested entities first. Unknown ids yield an
    /// empty list.
    pub(crate) fn remove(&mut self, id: EntityId) -> Vec<EntityId> {
        if !self.entities.contains_key(&id) {
            return Vec::new();
        }

        let mut removed: Vec<EntityId> = self.children(id).map(Entity::id).collect();
        removed.push(id);
        for removed_id in &removed {
            self.entities.shift_remove(removed_id);
        }
        removed
    }
}
