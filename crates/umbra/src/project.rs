//! Project snapshots and replay.
//!
//! A [`Project`] is a plain, serde-serializable description of a model:
//! entities keyed by a short string, their members in UML member notation,
//! package nesting, relationships and optional shape geometry. It is the
//! format of project files:
//!
//! ```toml
//! name = "zoo"
//!
//! [[entities]]
//! key = "animal"
//! kind = "class"
//! title = "Animal"
//! members = ["+ name: String", "+ speak(): void"]
//! bounds = { x = 0.0, y = 0.0, width = 160.0, height = 80.0 }
//!
//! [[relationships]]
//! source = "animal"
//! target = "dog"
//! kind = "inheritance"
//! ```
//!
//! Members whose name or type cannot be written in notation, such as a name
//! containing `:`, are stored as tables instead:
//!
//! ```toml
//! members = [{ visibility = "private", name = "key: value", type = "Pair" }]
//! ```
//!
//! [`LoadedProject::replay`] rebuilds a [`ModelGraph`] from a project by
//! calling the same mutation methods a user would, so a project file is
//! validated exactly like interactive input.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use umbra_core::{
    geometry::{Bounds, Point, Size},
    identifier::EntityId,
    semantic::{EntityKind, Member, RelationshipKind, Visibility},
};

use crate::{error::UmbraError, route::ShapeGeometry, structure::ModelGraph};

/// A serializable model snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
}

/// One entity of a [`Project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Project-local name that relationships and nesting refer to.
    pub key: String,
    pub kind: EntityKind,
    pub title: String,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
    /// Key of the enclosing package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<ShapeRecord>,
}

/// One member of an [`EntityRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberRecord {
    /// UML notation, e.g. `+ name: String` or `- speak(): void`.
    Notation(String),
    /// Explicit fields, for members the notation cannot express.
    Fields {
        visibility: Visibility,
        name: String,
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        operation: bool,
    },
}

impl MemberRecord {
    /// Records a member in notation when the notation parses back to the same
    /// member, and as explicit fields otherwise.
    pub fn from_member(member: &Member) -> Self {
        let notation = member.to_string();
        if umbra_parser::parse_member(&notation).is_ok_and(|parsed| &parsed == member) {
            return Self::Notation(notation);
        }
        Self::Fields {
            visibility: member.visibility(),
            name: member.name().to_string(),
            type_name: member.type_name().to_string(),
            operation: member.is_operation(),
        }
    }

    /// Builds the validated member.
    ///
    /// # Errors
    ///
    /// [`UmbraError::Parse`] for notation that does not parse, and
    /// [`UmbraError::Model`] for blank fields.
    pub fn to_member(&self) -> Result<Member, UmbraError> {
        match self {
            Self::Notation(notation) => umbra_parser::parse_member(notation)
                .map_err(|err| UmbraError::new_parse_error(err, notation.as_str())),
            Self::Fields {
                visibility,
                name,
                type_name,
                operation,
            } => {
                let member = if *operation {
                    Member::operation(*visibility, name, type_name)
                } else {
                    Member::attribute(*visibility, name, type_name)
                };
                member.map_err(UmbraError::from)
            }
        }
    }
}

impl From<&str> for MemberRecord {
    fn from(notation: &str) -> Self {
        Self::Notation(notation.to_string())
    }
}

/// Top-left position and size of an entity's shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<Bounds> for ShapeRecord {
    fn from(bounds: Bounds) -> Self {
        Self {
            x: bounds.min_x(),
            y: bounds.min_y(),
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

impl From<ShapeRecord> for Bounds {
    fn from(shape: ShapeRecord) -> Self {
        Bounds::new_from_top_left(
            Point::new(shape.x, shape.y),
            Size::new(shape.width, shape.height),
        )
    }
}

/// One relationship of a [`Project`], referring to entities by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub kind: RelationshipKind,
    #[serde(default)]
    pub source_multiplicity: String,
    #[serde(default)]
    pub target_multiplicity: String,
    #[serde(default)]
    pub label: String,
}

impl Project {
    /// Reads a project from TOML text.
    pub fn from_toml(source: &str) -> Result<Self, UmbraError> {
        toml::from_str(source)
            .map_err(|err| UmbraError::Project(format!("invalid project file: {err}")))
    }

    /// Writes the project as TOML text.
    pub fn to_toml(&self) -> Result<String, UmbraError> {
        toml::to_string(self)
            .map_err(|err| UmbraError::Project(format!("cannot serialize project: {err}")))
    }
}

impl ModelGraph {
    /// Takes a snapshot of the model without geometry.
    ///
    /// Entity keys are the titles; repeated titles get a `-2`, `-3`, ...
    /// suffix in creation order.
    pub fn snapshot(&self, name: &str) -> Project {
        self.snapshot_with_geometry(name, &HashMap::<EntityId, Bounds>::new())
    }

    /// Takes a snapshot of the model, recording the bounds `geometry` knows.
    pub fn snapshot_with_geometry(&self, name: &str, geometry: &dyn ShapeGeometry) -> Project {
        let mut used = HashSet::new();
        let keys: HashMap<EntityId, String> = self
            .entities()
            .map(|entity| (entity.id(), unique_key(&mut used, entity.title())))
            .collect();
        let key_of = |id: EntityId| keys.get(&id).cloned().unwrap_or_default();

        let entities = self
            .entities()
            .map(|entity| EntityRecord {
                key: key_of(entity.id()),
                kind: entity.kind(),
                title: entity.title().to_string(),
                members: entity
                    .members()
                    .iter()
                    .map(|entry| MemberRecord::from_member(entry.member()))
                    .collect(),
                package: entity.parent().map(key_of),
                bounds: geometry.bounds(entity.id()).map(ShapeRecord::from),
            })
            .collect();

        let relationships = self
            .relationships()
            .map(|relationship| RelationshipRecord {
                source: key_of(relationship.source()),
                target: key_of(relationship.target()),
                kind: relationship.kind(),
                source_multiplicity: relationship.source_multiplicity().to_string(),
                target_multiplicity: relationship.target_multiplicity().to_string(),
                label: relationship.label().to_string(),
            })
            .collect();

        Project {
            name: name.to_string(),
            entities,
            relationships,
        }
    }
}

fn unique_key(used: &mut HashSet<String>, title: &str) -> String {
    let mut key = title.to_string();
    let mut suffix = 2;
    while used.contains(&key) {
        key = format!("{title}-{suffix}");
        suffix += 1;
    }
    used.insert(key.clone());
    key
}

/// A model rebuilt from a [`Project`], with its shape geometry.
#[derive(Debug)]
pub struct LoadedProject {
    name: String,
    model: ModelGraph,
    geometry: HashMap<EntityId, Bounds>,
    keys: IndexMap<String, EntityId>,
}

impl LoadedProject {
    /// Replays a project through the [`ModelGraph`] mutation methods.
    ///
    /// Nesting is applied after all entities exist, so a record may name a
    /// package declared further down.
    ///
    /// # Errors
    ///
    /// - [`UmbraError::Project`] for repeated or unknown keys.
    /// - [`UmbraError::Parse`] for member notation that does not parse.
    /// - [`UmbraError::Model`] for values the model rejects.
    pub fn replay(project: &Project) -> Result<Self, UmbraError> {
        let mut model = ModelGraph::new();
        let mut geometry = HashMap::new();
        let mut keys = IndexMap::with_capacity(project.entities.len());

        for record in &project.entities {
            if keys.contains_key(&record.key) {
                return Err(UmbraError::Project(format!(
                    "duplicate entity key `{}`",
                    record.key
                )));
            }

            let id = model.create_entity(record.kind, &record.title)?;
            for member in &record.members {
                model.add_member(id, member.to_member()?)?;
            }
            if let Some(shape) = record.bounds {
                geometry.insert(id, Bounds::from(shape));
            }
            keys.insert(record.key.clone(), id);
        }

        let resolve = |key: &str| {
            keys.get(key)
                .copied()
                .ok_or_else(|| UmbraError::Project(format!("unknown entity key `{key}`")))
        };

        for record in &project.entities {
            if let Some(package) = &record.package {
                model.nest(resolve(&record.key)?, resolve(package)?)?;
            }
        }

        for record in &project.relationships {
            model.add_relationship(
                resolve(&record.source)?,
                resolve(&record.target)?,
                record.kind,
                &record.source_multiplicity,
                &record.target_multiplicity,
                &record.label,
            )?;
        }

        info!(
            project = project.name,
            entities = model.entity_count(),
            relationships = model.relationship_count(),
            shapes = geometry.len();
            "Loaded project"
        );

        Ok(Self {
            name: project.name.clone(),
            model,
            geometry,
            keys,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &ModelGraph {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ModelGraph {
        &mut self.model
    }

    /// Shape bounds per entity, for the entities whose record had bounds.
    pub fn geometry(&self) -> &HashMap<EntityId, Bounds> {
        &self.geometry
    }

    /// Moves or resizes a shape.
    pub fn set_bounds(&mut self, entity: EntityId, bounds: Bounds) {
        self.geometry.insert(entity, bounds);
    }

    /// The entity created for a project key.
    pub fn entity_id(&self, key: &str) -> Option<EntityId> {
        self.keys.get(key).copied()
    }

    /// Snapshots the current state, geometry included.
    pub fn snapshot(&self) -> Project {
        self.model.snapshot_with_geometry(&self.name, &self.geometry)
    }
}

/// Persistence for projects.
pub trait ProjectStore {
    /// Stores a project under its name, replacing any earlier version.
    fn save(&mut self, project: &Project) -> Result<(), UmbraError>;

    /// Returns the project stored under `name`.
    fn load(&self, name: &str) -> Option<Project>;
}

/// A [`ProjectStore`] that keeps projects in memory.
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    projects: HashMap<String, Project>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectStore for MemoryProjectStore {
    fn save(&mut self, project: &Project) -> Result<(), UmbraError> {
        if project.name.trim().is_empty() {
            return Err(UmbraError::Project("project name must not be empty".to_string()));
        }
        debug!(project = project.name; "Saved project");
        self.projects.insert(project.name.clone(), project.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Option<Project> {
        self.projects.get(name).cloned()
    }
}
