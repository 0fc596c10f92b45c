//! Geometric primitives for shape geometry and connector routing.
//!
//! This module provides the geometric types the router and the preview
//! exporter share. Shape geometry itself is owned by the UI layer; these are
//! the values it hands over.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Umbra uses a coordinate system consistent with SVG and screen space:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use umbra_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let diff = p1.sub_point(p2);
/// assert_eq!(diff.x(), 5.0);
/// assert_eq!(diff.y(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use umbra_core::geometry::Point;
    /// let start = Point::new(0.0, 10.0);
    /// let end = Point::new(100.0, 10.0);
    ///
    /// assert_eq!(start.lerp(end, 0.25), Point::new(25.0, 10.0));
    /// ```
    pub fn lerp(self, other: Point, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Rotates the point around the origin by `angle` radians.
    ///
    /// Positive angles turn from +X towards +Y, which is clockwise on screen.
    pub fn rotate(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Shape geometry arrives from the UI as `{x, y, width, height}`; use
/// [`Bounds::new_from_top_left`] to build one from those values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns true unless every coordinate is finite and both sides are positive.
    pub fn is_degenerate(self) -> bool {
        let finite = self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite();
        !finite || self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Checks whether the point lies inside or on the edge of the rectangle.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Checks whether the point lies exactly on the rectangle outline.
    ///
    /// # Examples
    ///
    /// ```
    /// # use umbra_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    ///
    /// assert!(bounds.is_on_boundary(Point::new(10.0, 4.0)));
    /// assert!(!bounds.is_on_boundary(Point::new(5.0, 5.0)));
    /// assert!(!bounds.is_on_boundary(Point::new(11.0, 4.0)));
    /// ```
    pub fn is_on_boundary(self, point: Point) -> bool {
        self.contains(point)
            && (point.x == self.min_x
                || point.x == self.max_x
                || point.y == self.min_y
                || point.y == self.max_y)
    }

    /// Clamps a point into the closed rectangle.
    pub fn clamp(self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y.clamp(self.min_y, self.max_y),
        )
    }

    /// Merges two bounds to create a larger bounds that contains both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Expands the bounds by adding insets.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }
}

/// Represents spacing around an element with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert!(point.is_zero());
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
    }

    #[test]
    fn test_point_lerp_endpoints() {
        let start = Point::new(-4.0, 2.0);
        let end = Point::new(8.0, -6.0);
        assert_eq!(start.lerp(end, 0.0), start);
        assert_eq!(start.lerp(end, 1.0), end);
        assert_eq!(start.lerp(end, 0.5), Point::new(2.0, -2.0));
    }

    #[test]
    fn test_point_rotate_quarter_turn() {
        let rotated = Point::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert_approx_eq!(f32, rotated.x(), 0.0, epsilon = 1e-6);
        assert_approx_eq!(f32, rotated.y(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(30.0, 40.0));

        assert_eq!(bounds.min_x(), 10.0);
        assert_eq!(bounds.min_y(), 20.0);
        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.center(), Point::new(25.0, 40.0));
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 40.0);
    }

    #[test]
    fn test_bounds_is_degenerate() {
        let origin = Point::new(0.0, 0.0);
        assert!(!Bounds::new_from_top_left(origin, Size::new(1.0, 1.0)).is_degenerate());
        assert!(Bounds::new_from_top_left(origin, Size::new(0.0, 10.0)).is_degenerate());
        assert!(Bounds::new_from_top_left(origin, Size::new(10.0, -1.0)).is_degenerate());
        assert!(Bounds::new_from_top_left(origin, Size::new(f32::NAN, 1.0)).is_degenerate());
        assert!(
            Bounds::new_from_top_left(Point::new(f32::INFINITY, 0.0), Size::new(1.0, 1.0))
                .is_degenerate()
        );
    }

    #[test]
    fn test_bounds_contains_and_boundary() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 20.0));

        assert!(bounds.contains(Point::new(5.0, 5.0)));
        assert!(bounds.contains(Point::new(0.0, 20.0)));
        assert!(!bounds.contains(Point::new(-0.1, 5.0)));

        assert!(bounds.is_on_boundary(Point::new(0.0, 7.0)));
        assert!(bounds.is_on_boundary(Point::new(3.0, 20.0)));
        assert!(!bounds.is_on_boundary(Point::new(3.0, 7.0)));
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        assert_eq!(bounds.clamp(Point::new(15.0, -3.0)), Point::new(10.0, 0.0));
        assert_eq!(bounds.clamp(Point::new(4.0, 6.0)), Point::new(4.0, 6.0));
    }

    #[test]
    fn test_bounds_merge() {
        let header = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
        let content = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));

        let combined = header.merge(&content);
        assert_eq!(combined.min_x(), 0.0);
        assert_eq!(combined.min_y(), 0.0);
        assert_eq!(combined.width(), 130.0);
        assert_eq!(combined.height(), 120.0);
    }

    #[test]
    fn test_bounds_padding() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));

        let padded = bounds.add_padding(Insets::uniform(5.0));
        assert_eq!(padded.min_x(), 5.0);
        assert_eq!(padded.min_y(), 15.0);
        assert_eq!(padded.width(), 60.0);
        assert_eq!(padded.height(), 40.0);
    }
}
