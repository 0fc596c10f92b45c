//! Orthogonal single-bend routing.
//!
//! The center-to-center displacement picks the dominant axis. The connector
//! leaves the source edge facing the target and enters the target edge
//! facing the source; the bend takes its dominant-axis coordinate from the
//! start anchor and its cross-axis coordinate from the end anchor, so the
//! final segment runs along the dominant axis into the target:
//!
//! ```text
//!   horizontal-dominant            vertical-dominant
//!
//!   +-----+                        +-----+
//!   |  S  o                        |  S  |
//!   +-----|                        +--o--+
//!         |                           |
//!         +------>o-----+             +------+
//!                 |  T  |                    v
//!                 +-----+                 +--o--+
//!                                         |  T  |
//!                                         +-----+
//! ```
//!
//! When the shapes overlap along the dominant axis the facing edges pass
//! each other, so the first segment runs back across the source before the
//! final segment enters the target. The route stays orthogonal and its
//! anchors stay on the outlines.
//!
//! Parallel relationships between one pair fan out around the edge
//! midpoints: offset index 0 sits on the midpoint, then 1 above, 2 below,
//! 3 two slots above and so on (left and right for vertical routes). Slot
//! `k` sits `k` steps from the midpoint, where the step is the stride capped
//! at `half / (k + 1)` for the half length of the shorter facing edge, so
//! every slot fits on the edge and no two slots coincide.

use umbra_core::{
    geometry::{Bounds, Point},
    semantic::RelationshipKind,
};

use super::{
    Axis, Endpoint, LabelPlacements, Marker, MarkerStyle, RelationshipRouter, Route, RouteError,
    TextPlacement,
};
use crate::config::RouterConfig;

/// The built-in [`RelationshipRouter`].
///
/// # Examples
///
/// ```
/// use umbra::route::{Axis, OrthogonalRouter, RelationshipRouter};
/// use umbra::geometry::{Bounds, Point, Size};
/// use umbra::semantic::RelationshipKind;
///
/// let source = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
/// let target = Bounds::new_from_top_left(Point::new(300.0, 0.0), Size::new(100.0, 50.0));
///
/// let route = OrthogonalRouter::default()
///     .route(source, target, RelationshipKind::Inheritance, 0)
///     .unwrap();
///
/// assert_eq!(route.axis(), Axis::Horizontal);
/// assert_eq!(route.start(), Point::new(100.0, 25.0));
/// assert_eq!(route.end(), Point::new(300.0, 25.0));
/// assert!(route.marker().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrthogonalRouter {
    config: RouterConfig,
}

impl OrthogonalRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    fn marker(&self, kind: RelationshipKind, tip: Point, rotation: f32) -> Option<Marker> {
        let style = MarkerStyle::for_kind(kind)?;
        let length = self.config.marker_length();
        let half_width = self.config.marker_width() / 2.0;

        // Local outline with the tip at the origin, pointing along +X
        let local = match style {
            MarkerStyle::OpenTriangle => vec![
                Point::new(0.0, 0.0),
                Point::new(-length, -half_width),
                Point::new(-length, half_width),
            ],
            MarkerStyle::OpenDiamond | MarkerStyle::FilledDiamond => vec![
                Point::new(0.0, 0.0),
                Point::new(-length / 2.0, -half_width),
                Point::new(-length, 0.0),
                Point::new(-length / 2.0, half_width),
            ],
        };

        let outline = local
            .into_iter()
            .map(|point| point.rotate(rotation).add_point(tip))
            .collect();
        Some(Marker::new(style, tip, rotation, outline))
    }

    fn labels(&self, axis: Axis, bend: Point, end: Point) -> LabelPlacements {
        let offset = self.config.label_offset();
        let (shift, rotation_degrees) = match axis {
            Axis::Horizontal => (Point::new(0.0, -offset), 0.0),
            Axis::Vertical => (Point::new(offset, 0.0), 90.0),
        };
        let place =
            |t: f32| TextPlacement::new(bend.lerp(end, t).add_point(shift), rotation_degrees);

        LabelPlacements::new(place(0.25), place(0.5), place(0.75))
    }
}

impl RelationshipRouter for OrthogonalRouter {
    fn route(
        &self,
        source: Bounds,
        target: Bounds,
        kind: RelationshipKind,
        offset_index: usize,
    ) -> Result<Route, RouteError> {
        if source.is_degenerate() {
            return Err(RouteError::DegenerateShape(Endpoint::Source));
        }
        if target.is_degenerate() {
            return Err(RouteError::DegenerateShape(Endpoint::Target));
        }

        let delta = target.center().sub_point(source.center());
        let axis = if delta.x().abs() > delta.y().abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        // Zero displacement faces right or bottom
        let forward = match axis {
            Axis::Horizontal => delta.x() >= 0.0,
            Axis::Vertical => delta.y() >= 0.0,
        };
        let half_extent = match axis {
            Axis::Horizontal => source.height().min(target.height()),
            Axis::Vertical => source.width().min(target.width()),
        } / 2.0;
        let offset = parallel_offset(self.config.stride(), half_extent, offset_index);

        let start = anchor(source, axis, forward, offset);
        let end = anchor(target, axis, !forward, offset);
        let bend = match axis {
            Axis::Horizontal => Point::new(start.x(), end.y()),
            Axis::Vertical => Point::new(end.x(), start.y()),
        };

        let direction = [end.sub_point(bend), end.sub_point(start)]
            .into_iter()
            .find(|vector| !vector.is_zero())
            .unwrap_or_else(|| axis_direction(axis, forward));
        let rotation = direction.y().atan2(direction.x());

        Ok(Route::new(
            axis,
            [start, bend, end],
            self.marker(kind, end, rotation),
            self.labels(axis, bend, end),
        ))
    }
}

/// Signed distance of the `offset_index`-th parallel connector from the edge
/// midpoint. Slots alternate sides and stay strictly within `half_extent`.
fn parallel_offset(stride: f32, half_extent: f32, offset_index: usize) -> f32 {
    let slot = offset_index.div_ceil(2);
    if slot == 0 {
        return 0.0;
    }
    let slot = slot as f32;
    let step = stride.min(half_extent / (slot + 1.0));
    if offset_index % 2 == 1 {
        step * slot
    } else {
        -step * slot
    }
}

/// Anchor on the edge of `bounds` that faces the positive direction of
/// `axis` when `positive_edge` is set, shifted along the edge by `offset`.
fn anchor(bounds: Bounds, axis: Axis, positive_edge: bool, offset: f32) -> Point {
    let center = bounds.center();
    let candidate = match axis {
        Axis::Horizontal => {
            let x = if positive_edge {
                bounds.max_x()
            } else {
                bounds.min_x()
            };
            Point::new(x, center.y() + offset)
        }
        Axis::Vertical => {
            let y = if positive_edge {
                bounds.max_y()
            } else {
                bounds.min_y()
            };
            Point::new(center.x() + offset, y)
        }
    };
    bounds.clamp(candidate)
}

fn axis_direction(axis: Axis, forward: bool) -> Point {
    let sign = if forward { 1.0 } else { -1.0 };
    match axis {
        Axis::Horizontal => Point::new(sign, 0.0),
        Axis::Vertical => Point::new(0.0, sign),
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use float_cmp::assert_approx_eq;
    use umbra_core::geometry::Size;

    use super::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
    }

    fn route(source: Bounds, target: Bounds, kind: RelationshipKind, index: usize) -> Route {
        OrthogonalRouter::default()
            .route(source, target, kind, index)
            .expect("route should succeed")
    }

    #[test]
    fn test_horizontal_route_to_the_right() {
        let route = route(
            rect(0.0, 0.0, 100.0, 50.0),
            rect(300.0, 100.0, 100.0, 50.0),
            RelationshipKind::Association,
            0,
        );

        assert_eq!(route.axis(), Axis::Horizontal);
        assert_eq!(route.start(), Point::new(100.0, 25.0));
        assert_eq!(route.end(), Point::new(300.0, 125.0));
        assert_eq!(route.bend(), Point::new(100.0, 125.0));
        assert!(route.marker().is_none());
    }

    #[test]
    fn test_horizontal_route_to_the_left() {
        let route = route(
            rect(300.0, 0.0, 100.0, 50.0),
            rect(0.0, 0.0, 100.0, 50.0),
            RelationshipKind::Inheritance,
            0,
        );

        assert_eq!(route.start(), Point::new(300.0, 25.0));
        assert_eq!(route.end(), Point::new(100.0, 25.0));
        let marker = route.marker().unwrap();
        assert_approx_eq!(f32, marker.rotation().abs(), PI, epsilon = 1e-6);
    }

    #[test]
    fn test_vertical_route_down() {
        let route = route(
            rect(0.0, 0.0, 100.0, 50.0),
            rect(40.0, 300.0, 100.0, 50.0),
            RelationshipKind::Composition,
            0,
        );

        assert_eq!(route.axis(), Axis::Vertical);
        assert_eq!(route.start(), Point::new(50.0, 50.0));
        assert_eq!(route.end(), Point::new(90.0, 300.0));
        assert_eq!(route.bend(), Point::new(90.0, 50.0));
        assert_approx_eq!(f32, route.marker().unwrap().rotation(), FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_diagonal_tie_is_vertical() {
        let route = route(
            rect(0.0, 0.0, 100.0, 100.0),
            rect(200.0, 200.0, 100.0, 100.0),
            RelationshipKind::Association,
            0,
        );
        assert_eq!(route.axis(), Axis::Vertical);
    }

    #[test]
    fn test_zero_displacement_faces_bottom() {
        let shape = rect(10.0, 10.0, 80.0, 40.0);
        let route = route(shape, shape, RelationshipKind::Aggregation, 0);

        assert_eq!(route.axis(), Axis::Vertical);
        assert_eq!(route.start(), Point::new(50.0, 50.0));
        assert_eq!(route.end(), Point::new(50.0, 10.0));
        assert!(shape.is_on_boundary(route.start()));
        assert!(shape.is_on_boundary(route.end()));
    }

    #[test]
    fn test_parallel_routes_are_one_stride_apart() {
        let source = rect(0.0, 0.0, 100.0, 200.0);
        let target = rect(400.0, 0.0, 100.0, 200.0);

        let first = route(source, target, RelationshipKind::Association, 0);
        let second = route(source, target, RelationshipKind::Association, 1);

        let separation = second.bend().sub_point(first.bend());
        assert_eq!(separation, Point::new(0.0, 40.0));
    }

    #[test]
    fn test_parallel_routes_alternate_sides() {
        let source = rect(0.0, 0.0, 100.0, 400.0);
        let target = rect(400.0, 0.0, 100.0, 400.0);

        let ys: Vec<f32> = (0..5)
            .map(|index| route(source, target, RelationshipKind::Association, index).start().y())
            .collect();

        assert_eq!(ys, vec![200.0, 240.0, 160.0, 280.0, 120.0]);
    }

    #[test]
    fn test_parallel_routes_shrink_on_short_edges() {
        let source = rect(0.0, 0.0, 160.0, 80.0);
        let target = rect(400.0, 0.0, 160.0, 80.0);

        let routes: Vec<Route> = (0..4)
            .map(|index| route(source, target, RelationshipKind::Association, index))
            .collect();

        assert_eq!(routes[1].start(), Point::new(160.0, 60.0));
        assert_eq!(routes[2].start(), Point::new(160.0, 20.0));
        assert_approx_eq!(f32, routes[3].start().y(), 40.0 + 80.0 / 3.0, epsilon = 1e-4);
        for (index, route) in routes.iter().enumerate() {
            assert!(source.is_on_boundary(route.start()));
            assert!(target.is_on_boundary(route.end()));
            for other in &routes[index + 1..] {
                assert_ne!(route.points(), other.points());
            }
        }
    }

    #[test]
    fn test_parallel_offset_slots() {
        assert_eq!(parallel_offset(40.0, 100.0, 0), 0.0);
        assert_eq!(parallel_offset(40.0, 100.0, 1), 40.0);
        assert_eq!(parallel_offset(40.0, 100.0, 2), -40.0);
        assert_eq!(parallel_offset(40.0, 200.0, 3), 80.0);
        // 30 / (5 + 1) per slot once the stride no longer fits
        assert_eq!(parallel_offset(40.0, 30.0, 9), 25.0);
        assert_eq!(parallel_offset(40.0, 30.0, 10), -25.0);
    }

    #[test]
    fn test_overlapping_shapes_still_route_on_outlines() {
        let source = rect(0.0, 0.0, 200.0, 50.0);
        let target = rect(150.0, 30.0, 200.0, 50.0);

        let route = route(source, target, RelationshipKind::Association, 0);

        assert_eq!(route.axis(), Axis::Horizontal);
        assert_eq!(route.start(), Point::new(200.0, 25.0));
        assert_eq!(route.bend(), Point::new(200.0, 55.0));
        assert_eq!(route.end(), Point::new(150.0, 55.0));
        assert!(source.is_on_boundary(route.start()));
        assert!(target.is_on_boundary(route.end()));
    }

    #[test]
    fn test_configured_stride() {
        let router = OrthogonalRouter::new(RouterConfig::new(10.0, 6.0, 12.0, 10.0));
        let route = router
            .route(
                rect(0.0, 0.0, 100.0, 200.0),
                rect(400.0, 0.0, 100.0, 200.0),
                RelationshipKind::Association,
                3,
            )
            .unwrap();
        assert_eq!(route.end(), Point::new(400.0, 120.0));
    }

    #[test]
    fn test_triangle_outline() {
        let route = route(
            rect(0.0, 0.0, 100.0, 50.0),
            rect(300.0, 0.0, 100.0, 50.0),
            RelationshipKind::Inheritance,
            0,
        );
        let marker = route.marker().unwrap();

        assert_eq!(marker.style(), MarkerStyle::OpenTriangle);
        assert_eq!(marker.tip(), route.end());
        let outline = marker.outline();
        assert_eq!(outline.len(), 3);
        assert_approx_eq!(f32, outline[1].x(), 288.0, epsilon = 1e-4);
        assert_approx_eq!(f32, outline[1].y(), 20.0, epsilon = 1e-4);
        assert_approx_eq!(f32, outline[2].x(), 288.0, epsilon = 1e-4);
        assert_approx_eq!(f32, outline[2].y(), 30.0, epsilon = 1e-4);
    }

    #[test]
    fn test_diamond_outline_points_along_segment() {
        let route = route(
            rect(0.0, 0.0, 100.0, 50.0),
            rect(0.0, 300.0, 100.0, 50.0),
            RelationshipKind::Composition,
            0,
        );
        let marker = route.marker().unwrap();

        assert!(marker.style().is_filled());
        let outline = marker.outline();
        assert_eq!(outline.len(), 4);
        // The far corner sits one marker length before the tip, towards the source
        assert_approx_eq!(f32, outline[2].x(), 50.0, epsilon = 1e-4);
        assert_approx_eq!(f32, outline[2].y(), 288.0, epsilon = 1e-4);
    }

    #[test]
    fn test_horizontal_labels_sit_above() {
        let route = route(
            rect(0.0, 0.0, 100.0, 50.0),
            rect(300.0, 0.0, 100.0, 50.0),
            RelationshipKind::Association,
            0,
        );
        let labels = route.labels();

        assert_eq!(labels.source_multiplicity().position(), Point::new(150.0, 19.0));
        assert_eq!(labels.label().position(), Point::new(200.0, 19.0));
        assert_eq!(labels.target_multiplicity().position(), Point::new(250.0, 19.0));
        assert_eq!(labels.label().rotation_degrees(), 0.0);
    }

    #[test]
    fn test_vertical_labels_sit_right() {
        let route = route(
            rect(0.0, 0.0, 100.0, 50.0),
            rect(0.0, 250.0, 100.0, 50.0),
            RelationshipKind::Association,
            0,
        );
        let labels = route.labels();

        assert_eq!(labels.label().position(), Point::new(56.0, 150.0));
        assert_eq!(labels.label().rotation_degrees(), 90.0);
        assert_eq!(labels.source_multiplicity().position(), Point::new(56.0, 100.0));
        assert_eq!(labels.target_multiplicity().position(), Point::new(56.0, 200.0));
    }

    #[test]
    fn test_degenerate_shapes_are_rejected() {
        let router = OrthogonalRouter::default();
        let good = rect(0.0, 0.0, 10.0, 10.0);

        let err = router
            .route(rect(0.0, 0.0, 0.0, 10.0), good, RelationshipKind::Association, 0)
            .unwrap_err();
        assert_eq!(err, RouteError::DegenerateShape(Endpoint::Source));

        let err = router
            .route(good, rect(f32::NAN, 0.0, 10.0, 10.0), RelationshipKind::Association, 0)
            .unwrap_err();
        assert_eq!(err, RouteError::DegenerateShape(Endpoint::Target));
        assert_eq!(err.to_string(), "target shape is degenerate");
    }
}
