//! SVG preview of a routed model.
//!
//! The preview draws every shape at its supplied bounds, then every routed
//! connector on top. Styling is fixed: black outlines, white fills, one
//! font. The document's view box is the union of all shape bounds plus a
//! margin.

use indexmap::IndexMap;
use log::debug;
use svg::{self, node::element as svg_element};

use umbra_core::{
    geometry::{Bounds, Insets, Point},
    identifier::RelationshipId,
    semantic::EntityKind,
};

use crate::{
    error::UmbraError,
    route::{Axis, Route, RouteError, ShapeGeometry, TextPlacement},
    structure::{Entity, ModelGraph, Relationship},
};

const MARGIN: f32 = 20.0;
const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 16.0;
const TEXT_INSET: f32 = 6.0;

/// Renders the model as an SVG document.
///
/// Packages are drawn before classes and interfaces so nested shapes stay
/// visible. Routes for relationships that no longer exist are skipped.
///
/// # Errors
///
/// Returns [`RouteError::MissingGeometry`] when an entity has no bounds.
pub fn render_preview(
    model: &ModelGraph,
    geometry: &dyn ShapeGeometry,
    routes: &IndexMap<RelationshipId, Route>,
) -> Result<String, UmbraError> {
    let mut shapes = model
        .entities()
        .map(|entity| {
            geometry
                .bounds(entity.id())
                .map(|bounds| (entity, bounds))
                .ok_or(RouteError::MissingGeometry(entity.id()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    shapes.sort_by_key(|(entity, _)| entity.kind() != EntityKind::Package);

    let extent = shapes
        .iter()
        .map(|(_, bounds)| *bounds)
        .reduce(|acc, bounds| acc.merge(&bounds))
        .unwrap_or_default()
        .add_padding(Insets::uniform(MARGIN));

    let mut shape_group = svg_element::Group::new().set("class", "shapes");
    for (entity, bounds) in &shapes {
        shape_group = shape_group.add(render_shape(entity, *bounds));
    }

    let mut connector_group = svg_element::Group::new().set("class", "relationships");
    let mut connectors = 0;
    for (id, route) in routes {
        let Some(relationship) = model.relationship(*id) else {
            continue;
        };
        connector_group = connector_group.add(render_route(relationship, route));
        connectors += 1;
    }

    let doc = svg::Document::new()
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                extent.min_x(),
                extent.min_y(),
                extent.width(),
                extent.height()
            ),
        )
        .set("width", extent.width())
        .set("height", extent.height())
        .add(shape_group)
        .add(connector_group);

    debug!(shapes = shapes.len(), connectors; "Rendered SVG preview");
    Ok(doc.to_string())
}

fn render_shape(entity: &Entity, bounds: Bounds) -> svg_element::Group {
    let fill = match entity.kind() {
        EntityKind::Package => "#f4f4f4",
        EntityKind::Class | EntityKind::Interface => "white",
    };
    let outline = svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", fill)
        .set("stroke", "black");

    let mut group = svg_element::Group::new().add(outline);
    let center_x = bounds.center().x();
    let mut baseline = bounds.min_y() + LINE_HEIGHT;

    if entity.kind() == EntityKind::Interface {
        group = group.add(
            text("«interface»", Point::new(center_x, baseline)).set("text-anchor", "middle"),
        );
        baseline += LINE_HEIGHT;
    }
    group = group.add(
        text(entity.title(), Point::new(center_x, baseline))
            .set("text-anchor", "middle")
            .set("font-weight", "bold"),
    );

    if entity.members().is_empty() {
        return group;
    }

    let separator = baseline + LINE_HEIGHT / 2.0;
    group = group.add(
        svg_element::Line::new()
            .set("x1", bounds.min_x())
            .set("y1", separator)
            .set("x2", bounds.max_x())
            .set("y2", separator)
            .set("stroke", "black"),
    );

    for (index, entry) in entity.members().iter().enumerate() {
        let position = Point::new(
            bounds.min_x() + TEXT_INSET,
            separator + LINE_HEIGHT * (index + 1) as f32,
        );
        group = group.add(text(&entry.member().to_string(), position));
    }
    group
}

fn render_route(relationship: &Relationship, route: &Route) -> svg_element::Group {
    let path = svg_element::Polyline::new()
        .set("points", points_attribute(&route.points()))
        .set("fill", "none")
        .set("stroke", "black");
    let mut group = svg_element::Group::new().add(path);

    if let Some(marker) = route.marker() {
        let fill = if marker.style().is_filled() {
            "black"
        } else {
            "white"
        };
        group = group.add(
            svg_element::Polygon::new()
                .set("points", points_attribute(marker.outline()))
                .set("fill", fill)
                .set("stroke", "black"),
        );
    }

    let labels = route.labels();
    let texts = [
        (relationship.source_multiplicity(), labels.source_multiplicity()),
        (relationship.label(), labels.label()),
        (relationship.target_multiplicity(), labels.target_multiplicity()),
    ];
    for (content, placement) in texts {
        if !content.is_empty() {
            group = group.add(label_text(content, placement, route.axis()));
        }
    }
    group
}

fn label_text(content: &str, placement: TextPlacement, axis: Axis) -> svg_element::Text {
    let position = placement.position();
    let anchor = match axis {
        Axis::Horizontal => "middle",
        Axis::Vertical => "start",
    };
    let mut label = text(content, position).set("text-anchor", anchor);
    if placement.rotation_degrees() != 0.0 {
        label = label.set(
            "transform",
            format!(
                "rotate({} {} {})",
                placement.rotation_degrees(),
                position.x(),
                position.y()
            ),
        );
    }
    label
}

fn text(content: &str, position: Point) -> svg_element::Text {
    svg_element::Text::new(content)
        .set("x", position.x())
        .set("y", position.y())
        .set("font-family", FONT_FAMILY)
        .set("font-size", FONT_SIZE)
}

fn points_attribute(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(" ")
}
