//! Convex polygon type and basic measurements.

use crate::hull::{convex_hull, point_in_convex_hull};
use crate::primitives::{Point2, Vec2};
use crate::tolerance::signed_area2;
use num_traits::Float;

/// A convex polygon represented as a sequence of vertices.
///
/// Vertices are stored in counter-clockwise order with no duplicated closing
/// vertex. Convexity is established by construction (see
/// [`ConvexPolygon::hull_of`]) and is not re-validated by [`ConvexPolygon::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon<F> {
    /// The vertices of the polygon in CCW order.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> ConvexPolygon<F> {
    /// Wraps vertices that the caller guarantees are convex and CCW.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Creates an empty polygon.
    #[inline]
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Builds the convex hull of an arbitrary point set.
    ///
    /// # Example
    ///
    /// ```
    /// use planegeom::polygon::ConvexPolygon;
    /// use planegeom::Point2;
    ///
    /// let clicks = vec![
    ///     Point2::new(10.0_f64, 10.0),
    ///     Point2::new(30.0, 12.0),
    ///     Point2::new(20.0, 15.0), // inside
    ///     Point2::new(20.0, 40.0),
    /// ];
    ///
    /// let poly = ConvexPolygon::hull_of(&clicks);
    /// assert_eq!(poly.len(), 3);
    /// assert!(poly.signed_area() > 0.0);
    /// ```
    pub fn hull_of(points: &[Point2<F>]) -> Self {
        Self::new(convex_hull(points))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the signed area (shoelace formula); positive for CCW winding.
    pub fn signed_area(&self) -> F {
        let n = self.vertices.len();
        if n < 3 {
            return F::zero();
        }

        let origin = self.vertices[0];
        let twice = (1..n - 1).fold(F::zero(), |acc, i| {
            acc + signed_area2(origin, self.vertices[i], self.vertices[i + 1])
        });
        twice / (F::one() + F::one())
    }

    /// Returns the absolute area.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Returns the perimeter of the closed boundary.
    pub fn perimeter(&self) -> F {
        let n = self.vertices.len();
        if n < 2 {
            return F::zero();
        }
        (0..n).fold(F::zero(), |acc, i| {
            acc + self.vertices[i].distance(self.vertices[(i + 1) % n])
        })
    }

    /// Arithmetic mean of the vertices.
    ///
    /// This is the reference point used to place Minkowski results for
    /// display. Returns `None` for an empty polygon.
    pub fn vertex_centroid(&self) -> Option<Point2<F>> {
        if self.vertices.is_empty() {
            return None;
        }
        let n = F::from(self.vertices.len())?;
        let sum = self
            .vertices
            .iter()
            .fold(Vec2::zero(), |acc, v| acc + v.to_vec());
        Some(Point2::new(sum.x / n, sum.y / n))
    }

    /// Area centroid (center of mass).
    ///
    /// Returns `None` for degenerate polygons (fewer than 3 vertices or zero area).
    pub fn centroid(&self) -> Option<Point2<F>> {
        let n = self.vertices.len();
        if n < 3 {
            return None;
        }

        let area = self.signed_area();
        if area.abs() < F::epsilon() {
            return None;
        }

        let mut cx = F::zero();
        let mut cy = F::zero();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let cross = a.x * b.y - b.x * a.y;
            cx = cx + (a.x + b.x) * cross;
            cy = cy + (a.y + b.y) * cross;
        }

        let six = F::from(6.0)?;
        Some(Point2::new(cx / (six * area), cy / (six * area)))
    }

    /// Tests if a point is inside or on the boundary.
    pub fn contains(&self, point: Point2<F>) -> bool {
        point_in_convex_hull(&self.vertices, point)
    }

    /// Returns true if every consecutive turn is counter-clockwise or straight.
    pub fn is_convex(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return true;
        }
        (0..n).all(|i| {
            signed_area2(
                self.vertices[i],
                self.vertices[(i + 1) % n],
                self.vertices[(i + 2) % n],
            ) >= F::zero()
        })
    }

    /// Returns a copy moved by `offset`.
    pub fn translated(&self, offset: Vec2<F>) -> Self {
        Self::new(self.vertices.iter().map(|&v| v + offset).collect())
    }

    /// Returns the bounding box as (min, max) points.
    pub fn bounding_box(&self) -> Option<(Point2<F>, Point2<F>)> {
        let first = *self.vertices.first()?;
        Some(self.vertices[1..].iter().fold((first, first), |(lo, hi), v| {
            (
                Point2::new(lo.x.min(v.x), lo.y.min(v.y)),
                Point2::new(hi.x.max(v.x), hi.y.max(v.y)),
            )
        }))
    }

    /// Returns a copy whose vertex list starts at the lowest (then leftmost)
    /// vertex, preserving cyclic order.
    ///
    /// Gives two equal polygons the same vertex sequence regardless of where
    /// their construction started.
    pub fn rotated_to_lowest(&self) -> Self {
        let mut vertices = self.vertices.clone();
        if let Some(start) = lowest_vertex(&vertices) {
            vertices.rotate_left(start);
        }
        Self::new(vertices)
    }
}

/// Index of the lowest-y vertex, ties broken by lowest x.
fn lowest_vertex<F: Float>(vertices: &[Point2<F>]) -> Option<usize> {
    if vertices.is_empty() {
        return None;
    }
    let mut idx = 0;
    for (i, v) in vertices.iter().enumerate().skip(1) {
        let best = vertices[idx];
        if v.y < best.y || (v.y == best.y && v.x < best.x) {
            idx = i;
        }
    }
    Some(idx)
}
