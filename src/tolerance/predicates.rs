//! Geometric predicates with explicit tolerance.

use crate::primitives::Point2;
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Twice the signed area of triangle `abc`.
///
/// Positive when `a -> b -> c` turns counter-clockwise, negative when it
/// turns clockwise, zero when the points are collinear.
#[inline]
pub fn signed_area2<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> F {
    (b - a).cross(c - a)
}

/// Computes the orientation of three points with tolerance.
///
/// `eps` is compared against the absolute value of [`signed_area2`], so
/// `orient2d(a, b, c, 0.0)` is the exact sign test.
///
/// # Example
///
/// ```
/// use planegeom::tolerance::{orient2d, Orientation};
/// use planegeom::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// assert_eq!(orient2d(a, b, Point2::new(0.5, 1.0), 1e-9), Orientation::CounterClockwise);
/// assert_eq!(orient2d(a, b, Point2::new(2.0, 0.0), 1e-9), Orientation::Collinear);
/// ```
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let cross = signed_area2(a, b, c);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}
