//! Geometric primitives for layout.
//!
//! Provides the basic geometric types used by the circle-packing layout.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A circle given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Radius.
    pub r: f64,
}

impl Circle {
    /// Create a new circle.
    #[must_use]
    pub const fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    /// Center point.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// True if the interiors of the two circles intersect by more than `tolerance`.
    #[must_use]
    pub fn overlaps(&self, other: &Self, tolerance: f64) -> bool {
        self.center().distance(other.center()) + tolerance < self.r + other.r
    }

    /// True if `other` lies inside this circle, within `tolerance`.
    #[must_use]
    pub fn encloses(&self, other: &Self, tolerance: f64) -> bool {
        self.center().distance(other.center()) + other.r <= self.r + tolerance
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f64,
    /// Y coordinate of the top-left corner.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True if the whole circle lies inside the rectangle, within `tolerance`.
    #[must_use]
    pub fn contains_circle(&self, circle: &Circle, tolerance: f64) -> bool {
        circle.x - circle.r >= self.x - tolerance
            && circle.y - circle.r >= self.y - tolerance
            && circle.x + circle.r <= self.x + self.width + tolerance
            && circle.y + circle.r <= self.y + self.height + tolerance
    }
}
