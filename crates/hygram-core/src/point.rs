//! 2D coordinates for nodes embedded in the plane.

use serde::{Deserialize, Serialize};

/// A 2D position in the plane.
///
/// Positions participate only in the geometric side of rewriting (the affine
/// re-placement of inserted and modified nodes); they are irrelevant to
/// structural matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Approximate equality with a combined absolute/relative tolerance.
    ///
    /// Each axis must satisfy `|a - b| <= tol * max(1, |a|, |b|)`.
    pub fn approx_eq(self, other: Point, tol: f64) -> bool {
        axis_close(self.x, other.x, tol) && axis_close(self.y, other.y, tol)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

fn axis_close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * 1.0_f64.max(a.abs()).max(b.abs())
}
