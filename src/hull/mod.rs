//! Convex hull of planar point sets.
//!
//! # Example
//!
//! ```
//! use planegeom::hull::convex_hull;
//! use planegeom::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 0.5), // Interior point
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//!
//! let hull = convex_hull(&points);
//!
//! // Hull should be the 4 corners (interior point excluded)
//! assert_eq!(hull.len(), 4);
//! ```

use crate::primitives::Point2;
use crate::tolerance::signed_area2;
use num_traits::Float;
use std::cmp::Ordering;

/// Computes the convex hull of a set of points using Andrew's monotone chain algorithm.
///
/// Returns the hull vertices in counter-clockwise order, starting from the
/// lowest-x (then lowest-y) point. The first and last points are NOT the same
/// (the hull is implicitly closed).
///
/// # Algorithm
///
/// 1. Sort points lexicographically (by x, then by y)
/// 2. Build the lower chain left to right, popping while the last three
///    points fail to make a strict counter-clockwise turn
/// 3. Build the upper chain right to left with the same rule
/// 4. Drop the last point of each chain and concatenate
///
/// Collinear boundary points are discarded because the turn test is strict.
///
/// # Complexity
///
/// - Time: O(n log n) due to sorting
/// - Space: O(n)
///
/// # Edge cases
///
/// Points with a NaN or infinite coordinate are ignored. Zero or one
/// remaining point is returned as is. A collinear input yields its two
/// extreme points (a degenerate closed segment).
///
/// # Example
///
/// ```
/// use planegeom::hull::convex_hull;
/// use planegeom::Point2;
///
/// let collinear: Vec<Point2<f64>> = vec![
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 1.0),
/// ];
///
/// let hull = convex_hull(&collinear);
/// assert_eq!(hull, vec![Point2::new(0.0, 0.0), Point2::new(2.0, 2.0)]);
/// ```
pub fn convex_hull<F: Float>(points: &[Point2<F>]) -> Vec<Point2<F>> {
    let mut sorted: Vec<Point2<F>> = points.iter().copied().filter(|p| p.is_finite()).collect();
    if sorted.len() <= 1 {
        return sorted;
    }
    sorted.sort_by(|a, b| lexicographic(a, b));

    let mut lower: Vec<Point2<F>> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        push_with_turn_rule(&mut lower, p, |q| *q);
    }

    let mut upper: Vec<Point2<F>> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        push_with_turn_rule(&mut upper, p, |q| *q);
    }

    // Each chain ends where the other starts.
    lower.pop();
    upper.pop();

    lower.extend(upper);
    lower
}

/// Computes the convex hull and returns the indices of hull vertices.
///
/// Same chain construction as [`convex_hull`], but tracks which input
/// points end up on the hull. Non-finite points are skipped.
///
/// # Example
///
/// ```
/// use planegeom::hull::convex_hull_indices;
/// use planegeom::Point2;
///
/// let points: Vec<Point2<f64>> = vec![
///     Point2::new(0.0, 0.0),  // 0
///     Point2::new(1.0, 0.0),  // 1
///     Point2::new(0.5, 0.5),  // 2 - interior
///     Point2::new(1.0, 1.0),  // 3
///     Point2::new(0.0, 1.0),  // 4
/// ];
///
/// let indices = convex_hull_indices(&points);
/// assert_eq!(indices, vec![0, 1, 3, 4]);
/// ```
pub fn convex_hull_indices<F: Float>(points: &[Point2<F>]) -> Vec<usize> {
    let mut indexed: Vec<(usize, Point2<F>)> = points
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, p)| p.is_finite())
        .collect();
    if indexed.len() <= 1 {
        return indexed.into_iter().map(|(idx, _)| idx).collect();
    }
    indexed.sort_by(|(_, a), (_, b)| lexicographic(a, b));

    let mut lower: Vec<(usize, Point2<F>)> = Vec::with_capacity(indexed.len());
    for &entry in &indexed {
        push_with_turn_rule(&mut lower, entry, |e| e.1);
    }

    let mut upper: Vec<(usize, Point2<F>)> = Vec::with_capacity(indexed.len());
    for &entry in indexed.iter().rev() {
        push_with_turn_rule(&mut upper, entry, |e| e.1);
    }

    lower.pop();
    upper.pop();

    lower.extend(upper);
    lower.into_iter().map(|(idx, _)| idx).collect()
}

/// Computes the area of a convex hull using the shoelace formula.
///
/// Returns 0 for fewer than 3 vertices.
///
/// # Example
///
/// ```
/// use planegeom::hull::{convex_hull, convex_hull_area};
/// use planegeom::Point2;
///
/// let points: Vec<Point2<f64>> = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ];
///
/// let hull = convex_hull(&points);
/// assert!((convex_hull_area(&hull) - 4.0).abs() < 1e-10);
/// ```
pub fn convex_hull_area<F: Float>(hull: &[Point2<F>]) -> F {
    if hull.len() < 3 {
        return F::zero();
    }

    let n = hull.len();
    let mut twice_area = F::zero();
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area = twice_area + hull[i].x * hull[j].y - hull[j].x * hull[i].y;
    }

    twice_area.abs() / (F::one() + F::one())
}

/// Computes the perimeter of a hull (sum of its closed-loop edge lengths).
///
/// A two-point hull counts its segment twice, once per direction.
pub fn convex_hull_perimeter<F: Float>(hull: &[Point2<F>]) -> F {
    if hull.len() < 2 {
        return F::zero();
    }

    let n = hull.len();
    (0..n).fold(F::zero(), |acc, i| acc + hull[i].distance(hull[(i + 1) % n]))
}

/// Tests if a point is inside or on the boundary of a CCW convex hull.
///
/// Degenerate hulls are handled too: a one-point hull contains only that
/// point, a two-point hull contains the closed segment between them.
///
/// # Example
///
/// ```
/// use planegeom::hull::{convex_hull, point_in_convex_hull};
/// use planegeom::Point2;
///
/// let points: Vec<Point2<f64>> = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ];
///
/// let hull = convex_hull(&points);
///
/// assert!(point_in_convex_hull(&hull, Point2::new(1.0, 1.0))); // Center
/// assert!(point_in_convex_hull(&hull, Point2::new(0.0, 0.0))); // Corner
/// assert!(!point_in_convex_hull(&hull, Point2::new(3.0, 3.0))); // Outside
/// ```
pub fn point_in_convex_hull<F: Float>(hull: &[Point2<F>], point: Point2<F>) -> bool {
    match hull.len() {
        0 => false,
        1 => hull[0] == point,
        2 => {
            let (a, b) = (hull[0], hull[1]);
            signed_area2(a, b, point) == F::zero()
                && point.x >= a.x.min(b.x)
                && point.x <= a.x.max(b.x)
                && point.y >= a.y.min(b.y)
                && point.y <= a.y.max(b.y)
        }
        n => (0..n).all(|i| signed_area2(hull[i], hull[(i + 1) % n], point) >= F::zero()),
    }
}

/// Lexicographic (x, then y) order used by the monotone chain.
///
/// Only a total order on finite points; callers filter the rest out first.
#[inline]
fn lexicographic<F: Float>(a: &Point2<F>, b: &Point2<F>) -> Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}

/// Appends `item` to a chain after popping every middle point that does not
/// make a strict counter-clockwise turn.
#[inline]
fn push_with_turn_rule<T: Copy, F: Float>(
    chain: &mut Vec<T>,
    item: T,
    point_of: impl Fn(&T) -> Point2<F>,
) {
    let p = point_of(&item);
    while chain.len() >= 2 {
        let o = point_of(&chain[chain.len() - 2]);
        let a = point_of(&chain[chain.len() - 1]);
        if signed_area2(o, a, p) > F::zero() {
            break;
        }
        chain.pop();
    }
    chain.push(item);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convex_hull_empty() {
        let points: Vec<Point2<f64>> = vec![];
        assert!(convex_hull(&points).is_empty());
    }

    #[test]
    fn test_convex_hull_single_unchanged() {
        let points = vec![Point2::new(1.0_f64, 2.0)];
        assert_eq!(convex_hull(&points), points);
    }

    #[test]
    fn test_convex_hull_skips_non_finite() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(f64::NAN, 1.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, f64::INFINITY),
            Point2::new(1.0, 2.0),
            Point2::new(f64::NAN, f64::NAN),
        ];
        assert_eq!(
            convex_hull(&points),
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(1.0, 2.0),
            ]
        );
        assert_eq!(convex_hull_indices(&points), vec![0, 2, 4]);
        assert!(convex_hull(&[Point2::new(f64::NAN, 0.0)]).is_empty());
    }

    #[test]
    fn test_convex_hull_two_points_sorted() {
        let points = vec![Point2::new(1.0_f64, 1.0), Point2::new(0.0, 0.0)];
        let hull = convex_hull(&points);
        assert_eq!(hull, vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)]);
    }

    #[test]
    fn test_convex_hull_with_interior() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(1.0, 1.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(
            hull,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(0.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_convex_hull_collinear_gives_extremes() {
        let points = vec![
            Point2::new(3.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull, vec![Point2::new(0.0, 0.0), Point2::new(3.0, 0.0)]);
    }

    #[test]
    fn test_convex_hull_drops_boundary_collinear_points() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_eq!(convex_hull(&points).len(), 4);
    }

    #[test]
    fn test_convex_hull_all_duplicates() {
        let p = Point2::new(5.0_f64, 5.0);
        let hull = convex_hull(&[p, p, p, p]);
        assert!(!hull.is_empty());
        assert!(hull.iter().all(|&q| q == p));
    }

    #[test]
    fn test_convex_hull_duplicate_points() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(convex_hull(&points).len(), 4);
    }

    #[test]
    fn test_convex_hull_ccw_order() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(3.0, 1.5),
            Point2::new(2.0, 0.0),
            Point2::new(-1.0, 1.5),
            Point2::new(1.0, 3.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 5);

        for i in 0..hull.len() {
            let j = (i + 1) % hull.len();
            let k = (i + 2) % hull.len();
            assert!(
                signed_area2(hull[i], hull[j], hull[k]) > 0.0,
                "Hull not in CCW order at vertex {}",
                i
            );
        }
    }

    #[test]
    fn test_convex_hull_is_fixed_point() {
        let points = vec![
            Point2::new(0.3_f64, 0.1),
            Point2::new(4.0, 0.7),
            Point2::new(2.2, 2.2),
            Point2::new(5.1, 3.9),
            Point2::new(0.9, 4.4),
            Point2::new(-1.0, 2.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(convex_hull(&hull), hull);
    }

    #[test]
    fn test_convex_hull_indices_match_points() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(5.0, 2.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let indices = convex_hull_indices(&points);
        let from_indices: Vec<Point2<f64>> = indices.iter().map(|&i| points[i]).collect();
        assert_eq!(from_indices, convex_hull(&points));
    }

    #[test]
    fn test_convex_hull_area_and_perimeter() {
        let hull = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_relative_eq!(convex_hull_area(&hull), 4.0, epsilon = 1e-10);
        assert_relative_eq!(convex_hull_perimeter(&hull), 8.0, epsilon = 1e-10);
        assert_eq!(convex_hull_area(&hull[..2]), 0.0);
    }

    #[test]
    fn test_point_in_degenerate_hulls() {
        let seg = vec![Point2::new(0.0_f64, 0.0), Point2::new(4.0, 2.0)];
        assert!(point_in_convex_hull(&seg, Point2::new(2.0, 1.0)));
        assert!(!point_in_convex_hull(&seg, Point2::new(6.0, 3.0)));
        assert!(!point_in_convex_hull(&seg, Point2::new(2.0, 1.5)));

        let single = vec![Point2::new(1.0_f64, 1.0)];
        assert!(point_in_convex_hull(&single, Point2::new(1.0, 1.0)));
        assert!(!point_in_convex_hull(&single, Point2::new(1.0, 2.0)));

        let empty: Vec<Point2<f64>> = vec![];
        assert!(!point_in_convex_hull(&empty, Point2::new(0.0, 0.0)));
    }

    #[test]
    fn test_convex_hull_f32() {
        let points: Vec<Point2<f32>> = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(convex_hull(&points).len(), 4);
    }
}
