//! Minkowski sum and difference of convex polygons.
//!
//! The Minkowski sum of two shapes P and Q is:
//! P ⊕ Q = {p + q : p ∈ P, q ∈ Q}
//!
//! For convex polygons the sum is the convex hull of all pairwise vertex
//! sums, which is exactly how it is computed here.
//!
//! # Cost
//!
//! [`minkowski_sum`] forms all |P|·|Q| vertex sums and hulls them, so it runs
//! in O(|P||Q| log(|P||Q|)), dominated by the hull's sort. The angular edge
//! merge would be O(|P| + |Q|); the pairwise construction is kept because it
//! needs no orientation or starting-vertex preconditions on its inputs.
//!
//! # Display placement
//!
//! Interactive callers usually draw the sum around the obstacle it was
//! computed for. That shift is not part of the sum: [`display_offset`]
//! computes it and [`MinkowskiDisplay`] keeps the raw sum and the offset
//! side by side.
//!
//! # Example
//!
//! ```
//! use planegeom::polygon::minkowski_sum;
//! use planegeom::Point2;
//!
//! let a = vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ];
//! let b = vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//!
//! let sum = minkowski_sum(&a, &b);
//! assert_eq!(
//!     sum,
//!     vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(3.0, 0.0),
//!         Point2::new(3.0, 3.0),
//!         Point2::new(0.0, 3.0),
//!     ]
//! );
//! ```

use super::core::ConvexPolygon;
use crate::hull::convex_hull;
use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// Computes the Minkowski sum of two convex vertex sequences.
///
/// Convexity of the inputs is assumed, not validated. The result is a
/// counter-clockwise convex polygon starting at its lowest-x vertex. If
/// either input is empty the result is empty.
pub fn minkowski_sum<F: Float>(p: &[Point2<F>], q: &[Point2<F>]) -> Vec<Point2<F>> {
    if p.is_empty() || q.is_empty() {
        return Vec::new();
    }

    let mut sums: Vec<Point2<F>> = Vec::with_capacity(p.len() * q.len());
    for &pv in p {
        for &qv in q {
            sums.push(pv + qv.to_vec());
        }
    }

    convex_hull(&sums)
}

/// [`minkowski_sum`] over [`ConvexPolygon`]s.
pub fn minkowski_sum_polygons<F: Float>(
    p: &ConvexPolygon<F>,
    q: &ConvexPolygon<F>,
) -> ConvexPolygon<F> {
    ConvexPolygon::new(minkowski_sum(&p.vertices, &q.vertices))
}

/// Computes the Minkowski difference P ⊖ Q = P ⊕ (−Q).
///
/// # Example
///
/// ```
/// use planegeom::polygon::{minkowski_difference, ConvexPolygon};
/// use planegeom::Point2;
///
/// let unit = ConvexPolygon::new(vec![
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ]);
///
/// let diff = minkowski_difference(&unit, &unit);
/// assert!((diff.area() - 4.0).abs() < 1e-10);
/// assert!(diff.contains(Point2::origin()));
/// ```
pub fn minkowski_difference<F: Float>(
    p: &ConvexPolygon<F>,
    q: &ConvexPolygon<F>,
) -> ConvexPolygon<F> {
    ConvexPolygon::new(minkowski_sum(&p.vertices, &reflect(&q.vertices)))
}

/// Checks if two convex polygons overlap (touching counts).
///
/// Two shapes intersect iff their Minkowski difference contains the origin.
pub fn polygons_collide<F: Float>(p: &ConvexPolygon<F>, q: &ConvexPolygon<F>) -> bool {
    minkowski_difference(p, q).contains(Point2::origin())
}

/// Smallest distance between any vertex of `p` and any vertex of `q`.
///
/// Returns `None` if either polygon has no vertices.
pub fn min_vertex_distance<F: Float>(p: &[Point2<F>], q: &[Point2<F>]) -> Option<F> {
    p.iter()
        .flat_map(|&a| q.iter().map(move |&b| a.distance_squared(b)))
        .fold(None, |best: Option<F>, d| match best {
            Some(b) if b <= d => Some(b),
            _ => Some(d),
        })
        .map(|d| d.sqrt())
}

/// Translation that moves the vertex centroid of `sum` onto the vertex
/// centroid of `reference`.
///
/// Returns the zero vector if either polygon is empty.
pub fn display_offset<F: Float>(sum: &ConvexPolygon<F>, reference: &ConvexPolygon<F>) -> Vec2<F> {
    match (sum.vertex_centroid(), reference.vertex_centroid()) {
        (Some(from), Some(to)) => to - from,
        _ => Vec2::zero(),
    }
}

/// A Minkowski sum together with the cosmetic offset used to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct MinkowskiDisplay<F> {
    /// The mathematical sum, untouched.
    pub sum: ConvexPolygon<F>,
    /// Offset placing the sum's vertex centroid on the reference polygon's.
    pub offset: Vec2<F>,
}

impl<F: Float> MinkowskiDisplay<F> {
    /// Sums `subject` and `reference`, then centres the result on `reference`.
    ///
    /// # Example
    ///
    /// ```
    /// use planegeom::polygon::{ConvexPolygon, MinkowskiDisplay};
    /// use planegeom::Point2;
    ///
    /// let robot = ConvexPolygon::new(vec![
    ///     Point2::new(0.0_f64, 0.0),
    ///     Point2::new(2.0, 0.0),
    ///     Point2::new(1.0, 2.0),
    /// ]);
    /// let obstacle = ConvexPolygon::new(vec![
    ///     Point2::new(10.0_f64, 10.0),
    ///     Point2::new(14.0, 10.0),
    ///     Point2::new(14.0, 14.0),
    ///     Point2::new(10.0, 14.0),
    /// ]);
    ///
    /// let shown = MinkowskiDisplay::centred_on(&robot, &obstacle);
    /// let drawn = shown.translated();
    /// let c = drawn.vertex_centroid().unwrap();
    /// assert!((c.x - 12.0).abs() < 1e-9 && (c.y - 12.0).abs() < 1e-9);
    /// // The raw sum stays available.
    /// assert_eq!(shown.sum.vertices[0], Point2::new(10.0, 10.0));
    /// ```
    pub fn centred_on(subject: &ConvexPolygon<F>, reference: &ConvexPolygon<F>) -> Self {
        let sum = minkowski_sum_polygons(subject, reference);
        let offset = display_offset(&sum, reference);
        Self { sum, offset }
    }

    /// The sum moved by the display offset.
    pub fn translated(&self) -> ConvexPolygon<F> {
        self.sum.translated(self.offset)
    }
}

/// Reflects vertices through the origin. Point reflection keeps the winding.
fn reflect<F: Float>(vertices: &[Point2<F>]) -> Vec<Point2<F>> {
    vertices.iter().map(|v| Point2::new(-v.x, -v.y)).collect()
}
