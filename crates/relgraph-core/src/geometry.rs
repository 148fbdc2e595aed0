//! Geometric primitives for relation layouts.
//!
//! This module provides the small set of geometric types the layout engine
//! and its renderers share for positions, viewport dimensions and node extents.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate (or vector) in viewport space
//! - [`Size`] - Width and height dimensions, used for the viewport
//!
//! # Coordinate System
//!
//! relgraph uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the viewport at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point representing a position in viewport coordinate space.
///
/// Points use `f32` coordinates and double as plain 2D vectors for force and
/// displacement math.
///
/// # Examples
///
/// ```
/// # use relgraph_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let delta = p1.sub_point(p2);
/// assert_eq!(delta.x(), 5.0);
/// assert_eq!(delta.y(), 15.0);
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

    /// Adds another point to this point, returning a new point.
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

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relgraph_core::geometry::Point;
    /// let point = Point::new(10.0, 20.0);
    ///
    /// let halved = point.scale(0.5);
    /// assert_eq!(halved.x(), 5.0);
    /// assert_eq!(halved.y(), 10.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Clamps each coordinate independently into `[-limit, limit]`.
    ///
    /// Never panics: a NaN `limit` leaves the point unchanged and a negative
    /// one collapses both coordinates onto it.
    pub fn clamp_magnitude(self, limit: f32) -> Self {
        Self {
            x: self.x.max(-limit).min(limit),
            y: self.y.max(-limit).min(limit),
        }
    }

    /// Returns `true` when both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Represents the dimensions of a viewport or element with width and height
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

    /// Returns the center point of an area of this size anchored at the origin
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamps a circle center so that the full circle stays inside `[0,width] × [0,height]`.
    ///
    /// A circle wider than the viewport is pinned to its lower edge.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relgraph_core::geometry::{Point, Size};
    /// let viewport = Size::new(100.0, 50.0);
    /// let clamped = viewport.contain_circle(Point::new(-20.0, 49.0), 10.0);
    /// assert_eq!(clamped, Point::new(10.0, 40.0));
    /// ```
    pub fn contain_circle(self, center: Point, radius: f32) -> Point {
        Point::new(
            radius.max((self.width - radius).min(center.x)),
            radius.max((self.height - radius).min(center.y)),
        )
    }
}
