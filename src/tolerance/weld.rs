//! Vertex welding: collapsing near-coincident points.
//!
//! Used by the Voronoi builder to merge circumcenters that coincide up to
//! rounding (four co-circular sites produce two triangles sharing one
//! circumcenter, for instance).

use crate::primitives::Point2;
use num_traits::Float;

/// Merges points whose coordinates differ by less than `epsilon` on both axes.
///
/// The first point of every cluster is kept as its representative and input
/// order is otherwise preserved. The closeness test is axis-wise (a box, not
/// a disc), matching [`Point2::approx_eq`].
///
/// # Complexity
///
/// O(n²) time, O(n) space. Intended for the handful of circumcenters that
/// surround a single site.
///
/// # Example
///
/// ```
/// use planegeom::tolerance::weld_keep_first;
/// use planegeom::Point2;
///
/// let points = vec![
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(0.00001, -0.00001),
///     Point2::new(1.0, 0.0),
/// ];
///
/// let welded = weld_keep_first(&points, 1e-4);
/// assert_eq!(welded, vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
/// ```
pub fn weld_keep_first<F: Float>(points: &[Point2<F>], epsilon: F) -> Vec<Point2<F>> {
    let mut result: Vec<Point2<F>> = Vec::with_capacity(points.len());

    for &p in points {
        if !result.iter().any(|&kept| kept.approx_eq(p, epsilon)) {
            result.push(p);
        }
    }

    result
}
