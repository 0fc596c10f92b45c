//! Relationship routing.
//!
//! A router turns the bounds of two shapes into a drawable connector: an
//! orthogonal single-bend path, the end marker for the relationship kind,
//! and anchor positions for the label and multiplicities.
//!
//! Routing is a pure recomputation. Callers route again whenever a shape
//! moves or is resized, or a relationship is added or removed, through
//! [`RelationshipRouter::recompute`] or
//! [`RelationshipRouter::recompute_touching`].
//!
//! # Coordinates
//!
//! Routes use the same coordinate system as [`umbra_core::geometry`]:
//! origin at the top-left, X to the right, Y downwards. Rotation angles are
//! measured from +X towards +Y.

mod orthogonal;

pub use orthogonal::OrthogonalRouter;

use std::{collections::HashMap, fmt};

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use umbra_core::{
    geometry::{Bounds, Point},
    identifier::{EntityId, RelationshipId},
    semantic::RelationshipKind,
};

use crate::structure::ModelGraph;

/// Errors raised while routing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// A rectangle has a non-positive or non-finite size.
    #[error("{0} shape is degenerate")]
    DegenerateShape(Endpoint),

    /// No geometry was supplied for an entity.
    #[error("no geometry for {0}")]
    MissingGeometry(EntityId),
}

/// Which end of a relationship a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// The dominant direction of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The end-marker drawn for a relationship kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Inheritance.
    OpenTriangle,
    /// Aggregation.
    OpenDiamond,
    /// Composition.
    FilledDiamond,
}

impl MarkerStyle {
    /// Returns the marker for a relationship kind; associations have none.
    pub fn for_kind(kind: RelationshipKind) -> Option<Self> {
        match kind {
            RelationshipKind::Association => None,
            RelationshipKind::Aggregation => Some(Self::OpenDiamond),
            RelationshipKind::Composition => Some(Self::FilledDiamond),
            RelationshipKind::Inheritance => Some(Self::OpenTriangle),
        }
    }

    pub fn is_filled(self) -> bool {
        matches!(self, Self::FilledDiamond)
    }
}

/// A marker placed at the target anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    style: MarkerStyle,
    tip: Point,
    rotation: f32,
    outline: Vec<Point>,
}

impl Marker {
    pub(crate) fn new(style: MarkerStyle, tip: Point, rotation: f32, outline: Vec<Point>) -> Self {
        Self {
            style,
            tip,
            rotation,
            outline,
        }
    }

    pub fn style(&self) -> MarkerStyle {
        self.style
    }

    /// The marker tip, equal to the route's end anchor.
    pub fn tip(&self) -> Point {
        self.tip
    }

    /// Rotation in radians of the final segment direction.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Closed outline in diagram coordinates, starting at the tip.
    pub fn outline(&self) -> &[Point] {
        &self.outline
    }
}

/// Anchor point and rotation of one piece of connector text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPlacement {
    position: Point,
    rotation_degrees: f32,
}

impl TextPlacement {
    pub(crate) fn new(position: Point, rotation_degrees: f32) -> Self {
        Self {
            position,
            rotation_degrees,
        }
    }

    pub fn position(self) -> Point {
        self.position
    }

    /// `0` for horizontal connections, `90` for vertical ones.
    pub fn rotation_degrees(self) -> f32 {
        self.rotation_degrees
    }
}

/// Text placements along the final segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacements {
    source_multiplicity: TextPlacement,
    label: TextPlacement,
    target_multiplicity: TextPlacement,
}

impl LabelPlacements {
    pub(crate) fn new(
        source_multiplicity: TextPlacement,
        label: TextPlacement,
        target_multiplicity: TextPlacement,
    ) -> Self {
        Self {
            source_multiplicity,
            label,
            target_multiplicity,
        }
    }

    /// At a quarter of the final segment.
    pub fn source_multiplicity(&self) -> TextPlacement {
        self.source_multiplicity
    }

    /// At the middle of the final segment.
    pub fn label(&self) -> TextPlacement {
        self.label
    }

    /// At three quarters of the final segment.
    pub fn target_multiplicity(&self) -> TextPlacement {
        self.target_multiplicity
    }
}

/// A routed connector: start anchor, bend, end anchor, marker and text.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    axis: Axis,
    start: Point,
    bend: Point,
    end: Point,
    marker: Option<Marker>,
    labels: LabelPlacements,
}

impl Route {
    pub(crate) fn new(
        axis: Axis,
        [start, bend, end]: [Point; 3],
        marker: Option<Marker>,
        labels: LabelPlacements,
    ) -> Self {
        Self {
            axis,
            start,
            bend,
            end,
            marker,
            labels,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Anchor on the source rectangle.
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn bend(&self) -> Point {
        self.bend
    }

    /// Anchor on the target rectangle.
    pub fn end(&self) -> Point {
        self.end
    }

    /// The polyline `start -> bend -> end`.
    pub fn points(&self) -> [Point; 3] {
        [self.start, self.bend, self.end]
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    pub fn labels(&self) -> &LabelPlacements {
        &self.labels
    }
}

/// Supplies the current bounds of each entity's shape.
pub trait ShapeGeometry {
    fn bounds(&self, entity: EntityId) -> Option<Bounds>;
}

impl ShapeGeometry for HashMap<EntityId, Bounds> {
    fn bounds(&self, entity: EntityId) -> Option<Bounds> {
        self.get(&entity).copied()
    }
}

/// Computes connector geometry between two shapes.
pub trait RelationshipRouter {
    /// Routes one relationship.
    ///
    /// `offset_index` is the relationship's position among the relationships
    /// with the same source and target. Distinct indices give distinct
    /// connectors: they fan out to alternating sides of the edge midpoints,
    /// one stride apart while the shorter facing edge has room.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DegenerateShape`] for rectangles with a
    /// non-positive or non-finite size.
    fn route(
        &self,
        source: Bounds,
        target: Bounds,
        kind: RelationshipKind,
        offset_index: usize,
    ) -> Result<Route, RouteError>;

    /// Routes every relationship of the model, in insertion order.
    fn recompute(
        &self,
        model: &ModelGraph,
        geometry: &dyn ShapeGeometry,
    ) -> Result<IndexMap<RelationshipId, Route>, RouteError> {
        let ids: Vec<RelationshipId> = model.relationships().map(|r| r.id()).collect();
        let routes = route_all(self, model, geometry, &ids)?;
        trace!(routes = routes.len(); "Recomputed all routes");
        Ok(routes)
    }

    /// Routes the relationships touching one entity, after it moved or was
    /// resized.
    fn recompute_touching(
        &self,
        model: &ModelGraph,
        geometry: &dyn ShapeGeometry,
        entity: EntityId,
    ) -> Result<IndexMap<RelationshipId, Route>, RouteError> {
        let ids: Vec<RelationshipId> = model
            .relationships_touching(entity)
            .into_iter()
            .map(|r| r.id())
            .collect();
        let routes = route_all(self, model, geometry, &ids)?;
        trace!(entity:% = entity, routes = routes.len(); "Recomputed touching routes");
        Ok(routes)
    }
}

fn route_all<R>(
    router: &R,
    model: &ModelGraph,
    geometry: &dyn ShapeGeometry,
    ids: &[RelationshipId],
) -> Result<IndexMap<RelationshipId, Route>, RouteError>
where
    R: RelationshipRouter + ?Sized,
{
    let lookup = |entity: EntityId| {
        geometry
            .bounds(entity)
            .ok_or(RouteError::MissingGeometry(entity))
    };

    let mut routes = IndexMap::with_capacity(ids.len());
    for relationship in ids.iter().filter_map(|id| model.relationship(*id)) {
        let source = lookup(relationship.source())?;
        let target = lookup(relationship.target())?;
        let offset_index = model
            .relationships_between(relationship.source(), relationship.target())
            .iter()
            .position(|r| r.id() == relationship.id())
            .unwrap_or_default();

        let route = router.route(source, target, relationship.kind(), offset_index)?;
        trace!(id:% = relationship.id(), offset_index; "Routed relationship");
        routes.insert(relationship.id(), route);
    }
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use umbra_core::{geometry::Size, semantic::EntityKind};

    use super::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
    }

    #[test]
    fn test_marker_style_for_kind() {
        assert_eq!(MarkerStyle::for_kind(RelationshipKind::Association), None);
        assert_eq!(
            MarkerStyle::for_kind(RelationshipKind::Inheritance),
            Some(MarkerStyle::OpenTriangle)
        );
        assert!(
            MarkerStyle::for_kind(RelationshipKind::Composition)
                .unwrap()
                .is_filled()
        );
        assert!(
            !MarkerStyle::for_kind(RelationshipKind::Aggregation)
                .unwrap()
                .is_filled()
        );
    }

    #[test]
    fn test_recompute_assigns_pair_offsets() {
        let mut model = ModelGraph::new();
        let a = model.create_entity(EntityKind::Class, "A").unwrap();
        let b = model.create_entity(EntityKind::Class, "B").unwrap();
        let first = model
            .add_relationship(a, b, RelationshipKind::Association, "", "", "")
            .unwrap();
        let back = model
            .add_relationship(b, a, RelationshipKind::Association, "", "", "")
            .unwrap();
        let second = model
            .add_relationship(a, b, RelationshipKind::Composition, "", "", "")
            .unwrap();

        let geometry = HashMap::from([
            (a, rect(0.0, 0.0, 100.0, 200.0)),
            (b, rect(400.0, 0.0, 100.0, 200.0)),
        ]);
        let router = OrthogonalRouter::default();
        let routes = router.recompute(&model, &geometry).unwrap();

        assert_eq!(routes.keys().copied().collect::<Vec<_>>(), vec![first, back, second]);
        assert_eq!(routes[&first].end().y(), 100.0);
        assert_eq!(routes[&second].end().y(), 140.0);
        // The reverse direction is its own pair and starts at offset zero
        assert_eq!(routes[&back].end().y(), 100.0);
    }

    #[test]
    fn test_recompute_touching_only_routes_neighbors() {
        let mut model = ModelGraph::new();
        let a = model.create_entity(EntityKind::Class, "A").unwrap();
        let b = model.create_entity(EntityKind::Class, "B").unwrap();
        let c = model.create_entity(EntityKind::Class, "C").unwrap();
        let ab = model
            .add_relationship(a, b, RelationshipKind::Association, "", "", "")
            .unwrap();
        model
            .add_relationship(b, c, RelationshipKind::Association, "", "", "")
            .unwrap();

        let geometry = HashMap::from([
            (a, rect(0.0, 0.0, 80.0, 40.0)),
            (b, rect(200.0, 0.0, 80.0, 40.0)),
            (c, rect(400.0, 0.0, 80.0, 40.0)),
        ]);
        let routes = OrthogonalRouter::default()
            .recompute_touching(&model, &geometry, a)
            .unwrap();

        assert_eq!(routes.len(), 1);
        assert!(routes.contains_key(&ab));
    }

    #[test]
    fn test_recompute_reports_missing_geometry() {
        let mut model = ModelGraph::new();
        let a = model.create_entity(EntityKind::Class, "A").unwrap();
        let b = model.create_entity(EntityKind::Class, "B").unwrap();
        model
            .add_relationship(a, b, RelationshipKind::Association, "", "", "")
            .unwrap();

        let geometry = HashMap::from([(a, rect(0.0, 0.0, 80.0, 40.0))]);
        let err = OrthogonalRouter::default()
            .recompute(&model, &geometry)
            .unwrap_err();

        assert_eq!(err, RouteError::MissingGeometry(b));
        assert_eq!(err.to_string(), format!("no geometry for {b}"));
    }
}
