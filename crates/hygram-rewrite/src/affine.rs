//! The 2D affine map solved from three anchor correspondences.
//!
//! A production's left pattern reserves ids 0..=2 as anchors. Matching those
//! anchors against host nodes gives three point correspondences, which
//! determine a unique affine map `T(p) = M*p + t` -- provided the anchor
//! positions are not collinear. The map re-places every inserted and
//! modified node of the right pattern into host coordinates.
//!
//! The full system is six equations in six unknowns, but it splits into two
//! independent 3x3 systems (one per output axis) over the same coefficient
//! matrix of anchor positions, solved here by Cramer's rule.

use hygram_core::{NodeId, Point};

use crate::error::RewriteError;

/// Tolerance for the anchor round-trip verification: after solving, each
/// anchor must map onto its target within this combined absolute/relative
/// bound.
pub const ANCHOR_TOLERANCE: f64 = 1e-9;

/// Determinant threshold below which the anchor system is treated as
/// singular.
const SINGULAR_EPS: f64 = 1e-12;

/// An affine transform of the plane: `T(p) = M*p + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMap {
    m: [[f64; 2]; 2],
    t: [f64; 2],
}

impl AffineMap {
    /// Solves the unique affine map sending `from[i]` to `to[i]` for
    /// i = 0..=2.
    ///
    /// Fails with [`RewriteError::SingularAnchors`] when the `from` points
    /// are collinear or coincident, and with
    /// [`RewriteError::AnchorMismatch`] when the solved map does not
    /// reproduce a correspondence within [`ANCHOR_TOLERANCE`] (a
    /// numerically degenerate anchor layout). Both indicate a malformed
    /// production.
    pub fn from_anchors(from: [Point; 3], to: [Point; 3]) -> Result<Self, RewriteError> {
        let coeffs = [
            [from[0].x, from[0].y, 1.0],
            [from[1].x, from[1].y, 1.0],
            [from[2].x, from[2].y, 1.0],
        ];
        let det = det3(coeffs);
        if det.abs() < SINGULAR_EPS {
            return Err(RewriteError::SingularAnchors);
        }

        let solve_axis = |rhs: [f64; 3]| -> [f64; 3] {
            [
                det3(replace_column(coeffs, 0, rhs)) / det,
                det3(replace_column(coeffs, 1, rhs)) / det,
                det3(replace_column(coeffs, 2, rhs)) / det,
            ]
        };
        let row_x = solve_axis([to[0].x, to[1].x, to[2].x]);
        let row_y = solve_axis([to[0].y, to[1].y, to[2].y]);

        let map = AffineMap {
            m: [[row_x[0], row_x[1]], [row_y[0], row_y[1]]],
            t: [row_x[2], row_y[2]],
        };

        for (anchor, (src, dst)) in from.iter().zip(to.iter()).enumerate() {
            let image = map.apply(*src);
            if !image.approx_eq(*dst, ANCHOR_TOLERANCE) {
                return Err(RewriteError::AnchorMismatch {
                    anchor: NodeId(anchor as u32),
                    expected: *dst,
                    actual: image,
                });
            }
        }
        Ok(map)
    }

    /// Applies the transform to a point.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y + self.t[0],
            self.m[1][0] * p.x + self.m[1][1] * p.y + self.t[1],
        )
    }
}

fn det3(m: [[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn replace_column(mut m: [[f64; 3]; 3], column: usize, values: [f64; 3]) -> [[f64; 3]; 3] {
    for row in 0..3 {
        m[row][column] = values[row];
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHORS: [Point; 3] = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
    ];

    #[test]
    fn identity_from_coincident_correspondences() {
        let map = AffineMap::from_anchors(ANCHORS, ANCHORS).unwrap();
        let p = Point::new(3.5, -2.25);
        assert!(map.apply(p).approx_eq(p, ANCHOR_TOLERANCE));
    }

    #[test]
    fn pure_translation() {
        let to = [
            Point::new(2.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(2.0, 4.0),
        ];
        let map = AffineMap::from_anchors(ANCHORS, to).unwrap();
        assert!(map
            .apply(Point::new(0.5, 0.5))
            .approx_eq(Point::new(2.5, 3.5), ANCHOR_TOLERANCE));
    }

    #[test]
    fn rotation_and_scale() {
        // 90 degrees counter-clockwise, scaled by 2.
        let to = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(-2.0, 0.0),
        ];
        let map = AffineMap::from_anchors(ANCHORS, to).unwrap();
        assert!(map
            .apply(Point::new(1.0, 1.0))
            .approx_eq(Point::new(-2.0, 2.0), ANCHOR_TOLERANCE));
    }

    #[test]
    fn shear_reproduces_anchors_exactly() {
        let to = [
            Point::new(1.0, 1.0),
            Point::new(2.5, 1.5),
            Point::new(1.5, 3.0),
        ];
        let map = AffineMap::from_anchors(ANCHORS, to).unwrap();
        for (src, dst) in ANCHORS.iter().zip(to.iter()) {
            assert!(map.apply(*src).approx_eq(*dst, ANCHOR_TOLERANCE));
        }
    }

    #[test]
    fn collinear_anchors_are_singular() {
        let from = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        let result = AffineMap::from_anchors(from, ANCHORS);
        assert!(matches!(result, Err(RewriteError::SingularAnchors)));
    }

    #[test]
    fn coincident_anchors_are_singular() {
        let from = [
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 3.0),
        ];
        let result = AffineMap::from_anchors(from, ANCHORS);
        assert!(matches!(result, Err(RewriteError::SingularAnchors)));
    }

    #[test]
    fn targets_may_be_collinear() {
        // Only the source anchors must span the plane; a degenerate image
        // (projection onto a line) is a legitimate affine map.
        let to = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        let map = AffineMap::from_anchors(ANCHORS, to).unwrap();
        assert!(map
            .apply(Point::new(0.5, 0.5))
            .approx_eq(Point::new(1.5, 0.0), ANCHOR_TOLERANCE));
    }
}
