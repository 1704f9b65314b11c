//! Circle-packing layout.
//!
//! Turns a flat list of non-negative values into non-overlapping circles
//! whose areas are proportional to the values, scaled to fit a bounding box.

mod enclose;
mod pack;

pub use enclose::enclose;
pub use pack::pack_siblings;

use crate::geometry::{Circle, Rect};

/// A packed leaf: position and radius in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutNode {
    /// Index of the input value this leaf was built from.
    pub index: usize,
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Radius.
    pub r: f64,
}

impl LayoutNode {
    /// The leaf as a circle.
    #[must_use]
    pub const fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.r)
    }
}

/// Result of a packing run.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedLayout {
    /// Circle enclosing every leaf.
    pub root: Circle,
    /// One leaf per input value, in input order.
    pub leaves: Vec<LayoutNode>,
}

/// Circle-packing layout into a `width × height` box.
///
/// Leaf radii are proportional to the square root of their value. Values are
/// packed in the order given (no sorting), and the result is scaled so the
/// enclosing circle touches the shorter side of the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackLayout {
    width: f64,
    height: f64,
}

impl PackLayout {
    /// Create a layout for a `width × height` box.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a layout for a square box of side `side`.
    #[must_use]
    pub const fn square(side: f64) -> Self {
        Self::new(side, side)
    }

    /// Bounding box of the layout.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Pack `values`. Negative or non-finite values are packed as zero.
    ///
    /// Radii are packed relative to the largest one, so the result does not
    /// depend on the magnitude of the values.
    #[must_use]
    pub fn layout(&self, values: &[f64]) -> PackedLayout {
        let radii: Vec<f64> = values
            .iter()
            .map(|&v| if v.is_finite() && v > 0.0 { v.sqrt() } else { 0.0 })
            .collect();
        let largest = radii.iter().copied().fold(0.0, f64::max);
        let mut circles: Vec<Circle> = radii
            .iter()
            .map(|&r| Circle::new(0.0, 0.0, if largest > 0.0 { r / largest } else { 0.0 }))
            .collect();

        let radius = pack_siblings(&mut circles);
        let center = self.bounds().center();
        let k = if radius > 0.0 {
            self.width.min(self.height) / (2.0 * radius)
        } else {
            0.0
        };

        let leaves = circles
            .iter()
            .enumerate()
            .map(|(index, c)| LayoutNode {
                index,
                x: center.x + k * c.x,
                y: center.y + k * c.y,
                r: k * c.r,
            })
            .collect();

        PackedLayout {
            root: Circle::new(center.x, center.y, k * radius),
            leaves,
        }
    }
}
