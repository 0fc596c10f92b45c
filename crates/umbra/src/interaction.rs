//! Two-click relationship creation.
//!
//! [`ConnectorTool`] holds the connector state between user picks. The
//! first pick selects the source; picking the same entity again cancels,
//! picking another one adds a relationship of the current kind and returns
//! to [`ConnectorState::Idle`], whether or not the add succeeded.

use log::debug;

use umbra_core::{
    error::ModelError,
    identifier::{EntityId, RelationshipId},
    semantic::RelationshipKind,
};

use crate::structure::ModelGraph;

/// Where the tool is between picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectorState {
    #[default]
    Idle,
    SourceSelected(EntityId),
}

/// What a single pick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorOutcome {
    /// The picked entity is now the pending source.
    SourceSelected(EntityId),
    /// The pending source was picked again and the selection was dropped.
    Cancelled,
    /// A relationship was added.
    Created(RelationshipId),
}

/// Connector state machine for creating relationships.
///
/// # Examples
///
/// ```
/// use umbra::{ModelGraph, interaction::{ConnectorOutcome, ConnectorTool}};
/// use umbra::semantic::{EntityKind, RelationshipKind};
///
/// let mut model = ModelGraph::new();
/// let parent = model.create_entity(EntityKind::Class, "Parent").unwrap();
/// let child = model.create_entity(EntityKind::Class, "Child").unwrap();
///
/// let mut tool = ConnectorTool::new(RelationshipKind::Inheritance);
/// tool.select(&mut model, parent).unwrap();
/// let outcome = tool.select(&mut model, child).unwrap();
///
/// assert!(matches!(outcome, ConnectorOutcome::Created(_)));
/// assert_eq!(model.relationship_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConnectorTool {
    state: ConnectorState,
    kind: RelationshipKind,
}

impl ConnectorTool {
    pub fn new(kind: RelationshipKind) -> Self {
        Self {
            state: ConnectorState::Idle,
            kind,
        }
    }

    pub fn state(&self) -> ConnectorState {
        self.state
    }

    /// The kind used for the next relationship.
    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    /// Changes the kind. Allowed in any state; a pending source is kept.
    pub fn set_kind(&mut self, kind: RelationshipKind) {
        self.kind = kind;
    }

    /// Drops a pending source.
    pub fn reset(&mut self) {
        self.state = ConnectorState::Idle;
    }

    /// Feeds one user pick into the state machine.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying relationship add, for example
    /// not-found when the pending source was removed in the meantime. The
    /// tool is back in [`ConnectorState::Idle`] either way.
    pub fn select(
        &mut self,
        model: &mut ModelGraph,
        entity: EntityId,
    ) -> Result<ConnectorOutcome, ModelError> {
        match std::mem::take(&mut self.state) {
            ConnectorState::Idle => {
                self.state = ConnectorState::SourceSelected(entity);
                debug!(source:% = entity; "Connector source selected");
                Ok(ConnectorOutcome::SourceSelected(entity))
            }
            ConnectorState::SourceSelected(source) if source == entity => {
                debug!(source:% = source; "Connector cancelled");
                Ok(ConnectorOutcome::Cancelled)
            }
            ConnectorState::SourceSelected(source) => model
                .add_relationship(source, entity, self.kind, "", "", "")
                .map(ConnectorOutcome::Created),
        }
    }
}
