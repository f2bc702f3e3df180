//! Delaunay triangulation using the Bowyer-Watson algorithm.
//!
//! Delaunay triangulation maximizes the minimum angle of all triangles,
//! avoiding skinny triangles when possible. It has the property that no
//! site lies strictly inside the circumcircle of any triangle.
//!
//! # Algorithm
//!
//! The Bowyer-Watson algorithm is an incremental insertion algorithm:
//! 1. Start with a super-triangle containing the canvas and every site
//! 2. Insert sites one at a time, replacing the triangles whose circumcircle
//!    contains the new site by a fan around it
//! 3. Remove triangles that use a super-triangle corner
//!
//! Working triangles refer to their corners through a tagged [`Vertex`], so
//! the last step is an exact tag test rather than a coordinate heuristic.
//! The corners are treated as infinitely far away (see [`SuperTriangle`]),
//! so the finished triangles cover the convex hull of the sites.
//!
//! # Complexity
//!
//! - Time: O(n²) per build
//! - Space: O(n)
//!
//! # Example
//!
//! ```
//! use planegeom::config::EngineConfig;
//! use planegeom::triangulation::Triangulation;
//! use planegeom::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(100.0, 100.0),
//!     Point2::new(300.0, 100.0),
//!     Point2::new(200.0, 300.0),
//!     Point2::new(200.0, 160.0),
//! ];
//!
//! let tri = Triangulation::build(&points, &EngineConfig::default());
//! assert_eq!(tri.len(), 3);
//! assert!(tri.validate().is_ok());
//!
//! for [a, b, c] in tri.iter_points() {
//!     assert!(planegeom::tolerance::signed_area2(a, b, c) > 0.0);
//! }
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::ops::{Add, Mul, Sub};

use crate::config::{Canvas, EngineConfig};
use crate::error::{GeomError, Result};
use crate::primitives::Point2;
use crate::tolerance::signed_area2;
use num_traits::Float;

/// A triangle represented by indices into the site array.
///
/// Vertices are stored in counter-clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// First vertex index
    pub a: usize,
    /// Second vertex index
    pub b: usize,
    /// Third vertex index
    pub c: usize,
}

impl Triangle {
    /// Creates a new triangle from vertex indices.
    #[inline]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    /// Returns the three undirected edges of this triangle.
    #[inline]
    pub fn edges(&self) -> [Edge; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }

    #[inline]
    pub fn vertices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }

    /// Checks if the triangle contains a specific vertex index.
    #[inline]
    pub fn contains_vertex(&self, v: usize) -> bool {
        self.a == v || self.b == v || self.c == v
    }
}

/// An undirected edge between two sites, normalized so `a <= b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }
}

/// Corner of a working triangle: an input site or a super-triangle corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Vertex {
    Site(usize),
    Auxiliary(usize),
}

impl Vertex {
    #[inline]
    fn site(self) -> Option<usize> {
        match self {
            Vertex::Site(i) => Some(i),
            Vertex::Auxiliary(_) => None,
        }
    }
}

/// Undirected key for cavity edge counting.
#[inline]
fn undirected(u: Vertex, v: Vertex) -> (Vertex, Vertex) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Direction of super-triangle corner `k` from its centre: bottom-left,
/// bottom-right, top.
#[inline]
fn corner_direction<F: Float>(k: usize) -> (F, F) {
    match k {
        0 => (-F::one(), -F::one()),
        1 => (F::one(), -F::one()),
        _ => (F::zero(), F::one()),
    }
}

/// Auxiliary triangle that seeds the incremental construction.
///
/// Corner `k` sits at `center + R·d_k` with `d` = `(-1, -1)`, `(1, -1)`,
/// `(0, 1)`. The triangulator never fixes `R`: every predicate touching a
/// corner is decided as `R` grows without bound, which is the answer every
/// large enough super-triangle gives. No hull triangle is lost to a corner
/// that sits too close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperTriangle<F> {
    /// Centre of the bounding box of the canvas and every finite site.
    pub center: Point2<F>,
    /// Larger side of that bounding box.
    pub extent: F,
}

impl<F: Float> SuperTriangle<F> {
    /// Builds the super-triangle for `sites` on `canvas`.
    ///
    /// # Example
    ///
    /// ```
    /// use planegeom::config::Canvas;
    /// use planegeom::triangulation::SuperTriangle;
    /// use planegeom::tolerance::signed_area2;
    /// use planegeom::Point2;
    ///
    /// let canvas = Canvas::<f64>::default();
    /// let far = Point2::new(2000.0, -50.0);
    /// let st = SuperTriangle::enclosing(&canvas, &[far]);
    /// assert_eq!(st.extent, 2000.0);
    ///
    /// let [a, b, c] = st.corners(2.0);
    /// assert!(signed_area2(a, b, far) > 0.0);
    /// assert!(signed_area2(b, c, far) > 0.0);
    /// assert!(signed_area2(c, a, far) > 0.0);
    /// ```
    pub fn enclosing(canvas: &Canvas<F>, sites: &[Point2<F>]) -> Self {
        let (lo, hi) = sites.iter().filter(|p| p.is_finite()).fold(
            (canvas.min(), canvas.max()),
            |(lo, hi), p| {
                (
                    Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
                )
            },
        );

        Self {
            center: lo.midpoint(hi),
            extent: (hi.x - lo.x).max(hi.y - lo.y),
        }
    }

    /// Corners at `R = scale * extent`, counter-clockwise.
    ///
    /// Any `scale >= 2` strictly contains the covered region.
    pub fn corners(&self, scale: F) -> [Point2<F>; 3] {
        let reach = scale * self.extent;
        [0, 1, 2].map(|k| {
            let (dx, dy) = corner_direction::<F>(k);
            Point2::new(self.center.x + dx * reach, self.center.y + dy * reach)
        })
    }
}

/// Polynomial in the super-triangle reach `R`, constant term first.
///
/// Degree 4 is enough for the in-circle determinant.
#[derive(Debug, Clone, Copy)]
struct Reach<F>([F; 5]);

impl<F: Float> Reach<F> {
    #[inline]
    fn new(constant: F, slope: F) -> Self {
        let mut k = [F::zero(); 5];
        k[0] = constant;
        k[1] = slope;
        Self(k)
    }

    /// Sign taken for every large enough `R`.
    fn sign(&self) -> Ordering {
        match self.0.iter().rev().find(|k| **k != F::zero()) {
            Some(k) if *k > F::zero() => Ordering::Greater,
            Some(_) => Ordering::Less,
            None => Ordering::Equal,
        }
    }
}

impl<F: Float> Add for Reach<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut k = self.0;
        for (a, b) in k.iter_mut().zip(rhs.0) {
            *a = *a + b;
        }
        Self(k)
    }
}

impl<F: Float> Sub for Reach<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut k = self.0;
        for (a, b) in k.iter_mut().zip(rhs.0) {
            *a = *a - b;
        }
        Self(k)
    }
}

impl<F: Float> Mul for Reach<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut k = [F::zero(); 5];
        for (i, &a) in self.0.iter().enumerate() {
            for (j, &b) in rhs.0.iter().enumerate().take(5 - i) {
                k[i + j] = k[i + j] + a * b;
            }
        }
        Self(k)
    }
}

/// Tests if a point lies inside the circumcircle of a triangle.
///
/// Returns true if the point is strictly inside the circumcircle.
/// Uses the determinant test which is more numerically stable than
/// explicitly computing the circumcenter. Points on the circle are outside.
///
/// # Arguments
///
/// * `p` - The point to test
/// * `a`, `b`, `c` - The triangle vertices, in CCW order
///
/// # Example
///
/// ```
/// use planegeom::triangulation::in_circumcircle;
/// use planegeom::Point2;
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// let c = Point2::new(0.5, 0.866); // Roughly equilateral
///
/// // Center of the triangle should be inside circumcircle
/// let center = Point2::new(0.5, 0.29);
/// assert!(in_circumcircle(center, a, b, c));
///
/// // Point far away should be outside
/// let far = Point2::new(10.0, 10.0);
/// assert!(!in_circumcircle(far, a, b, c));
/// ```
pub fn in_circumcircle<F: Float>(p: Point2<F>, a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    // | ax-px  ay-py  (ax-px)²+(ay-py)² |
    // | bx-px  by-py  (bx-px)²+(by-py)² | > 0  iff p is inside circumcircle (CCW triangle)
    // | cx-px  cy-py  (cx-px)²+(cy-py)² |

    let ax = a.x - p.x;
    let ay = a.y - p.y;
    let bx = b.x - p.x;
    let by = b.y - p.y;
    let cx = c.x - p.x;
    let cy = c.y - p.y;

    let aa = ax * ax + ay * ay;
    let bb = bx * bx + by * by;
    let cc = cx * cx + cy * cy;

    let det = ax * (by * cc - cy * bb) - ay * (bx * cc - cx * bb) + aa * (bx * cy - cx * by);

    det > F::zero()
}

/// Working state of one Bowyer-Watson run.
struct Builder<'a, F> {
    sites: &'a [Point2<F>],
    center: Point2<F>,
    triangles: Vec<[Vertex; 3]>,
}

impl<'a, F: Float> Builder<'a, F> {
    fn new(sites: &'a [Point2<F>], super_triangle: SuperTriangle<F>) -> Self {
        Self {
            sites,
            center: super_triangle.center,
            triangles: vec![[
                Vertex::Auxiliary(0),
                Vertex::Auxiliary(1),
                Vertex::Auxiliary(2),
            ]],
        }
    }

    /// Coordinates of `v` relative to `origin`.
    #[inline]
    fn relative(&self, v: Vertex, origin: Point2<F>) -> (Reach<F>, Reach<F>) {
        match v {
            Vertex::Site(i) => {
                let p = self.sites[i];
                (
                    Reach::new(p.x - origin.x, F::zero()),
                    Reach::new(p.y - origin.y, F::zero()),
                )
            }
            Vertex::Auxiliary(k) => {
                let (dx, dy) = corner_direction(k);
                (
                    Reach::new(self.center.x - origin.x, dx),
                    Reach::new(self.center.y - origin.y, dy),
                )
            }
        }
    }

    /// `Greater` for counter-clockwise, `Equal` for flat.
    fn orientation(&self, tri: &[Vertex; 3]) -> Ordering {
        let (ax, ay) = self.relative(tri[0], self.center);
        let (bx, by) = self.relative(tri[1], self.center);
        let (cx, cy) = self.relative(tri[2], self.center);
        ((bx - ax) * (cy - ay) - (by - ay) * (cx - ax)).sign()
    }

    /// Orders `u, v, w` counter-clockwise.
    fn oriented(&self, u: Vertex, v: Vertex, w: Vertex) -> [Vertex; 3] {
        let tri = [u, v, w];
        if self.orientation(&tri) == Ordering::Less {
            [v, u, w]
        } else {
            tri
        }
    }

    /// The [`in_circumcircle`] determinant, with corners at infinity.
    ///
    /// Against one corner this reduces to a half-plane test on the
    /// triangle's real edge.
    fn is_bad(&self, tri: &[Vertex; 3], p: Point2<F>) -> bool {
        // A flat triangle has no circumcircle.
        if self.orientation(tri) != Ordering::Greater {
            return false;
        }

        let (ax, ay) = self.relative(tri[0], p);
        let (bx, by) = self.relative(tri[1], p);
        let (cx, cy) = self.relative(tri[2], p);

        let aa = ax * ax + ay * ay;
        let bb = bx * bx + by * by;
        let cc = cx * cx + cy * cy;

        let det = ax * (by * cc - cy * bb) - ay * (bx * cc - cx * bb) + aa * (bx * cy - cx * by);
        det.sign() == Ordering::Greater
    }

    fn insert(&mut self, index: usize) {
        let p = self.sites[index];

        let mut counts: HashMap<(Vertex, Vertex), usize> = HashMap::new();
        let mut boundary: Vec<(Vertex, Vertex)> = Vec::new();
        let mut kept = Vec::with_capacity(self.triangles.len() + 2);

        for tri in std::mem::take(&mut self.triangles) {
            if !self.is_bad(&tri, p) {
                kept.push(tri);
                continue;
            }
            for (u, v) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let count = counts.entry(undirected(u, v)).or_insert(0);
                if *count == 0 {
                    boundary.push((u, v));
                }
                *count += 1;
            }
        }

        // Edges shared by two bad triangles are interior to the cavity.
        for (u, v) in boundary {
            if counts[&undirected(u, v)] == 1 {
                kept.push(self.oriented(u, v, Vertex::Site(index)));
            }
        }

        self.triangles = kept;
    }

    fn finish(self, collinear_eps: F) -> Vec<Triangle> {
        self.triangles
            .iter()
            .filter_map(|tri| {
                let t = Triangle::new(tri[0].site()?, tri[1].site()?, tri[2].site()?);
                let area2 = signed_area2(self.sites[t.a], self.sites[t.b], self.sites[t.c]);
                (area2 > collinear_eps).then_some(t)
            })
            .collect()
    }
}

/// A Delaunay triangulation together with the sites it was built from.
///
/// Every triangle is counter-clockwise with doubled signed area above the
/// configured `collinear_eps`. Duplicate and non-finite sites keep their
/// index but are not connected to any triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation<F> {
    sites: Vec<Point2<F>>,
    triangles: Vec<Triangle>,
}

impl<F: Float> Triangulation<F> {
    /// Triangulates `points` from scratch.
    ///
    /// Fewer than 3 points, or collinear input, give an empty triangulation.
    pub fn build(points: &[Point2<F>], config: &EngineConfig<F>) -> Self {
        let sites = points.to_vec();
        if points.len() < 3 {
            return Self {
                sites,
                triangles: Vec::new(),
            };
        }

        let mut builder = Builder::new(points, SuperTriangle::enclosing(&config.canvas, points));
        for (i, p) in points.iter().enumerate() {
            if p.is_finite() {
                builder.insert(i);
            }
        }
        let triangles = builder.finish(config.collinear_eps);

        Self { sites, triangles }
    }

    /// Checked variant of [`Triangulation::build`].
    ///
    /// # Errors
    ///
    /// Returns `TooFewSites` for fewer than 3 points and `NonFiniteSite` for
    /// the first point with a NaN or infinite coordinate.
    pub fn try_build(points: &[Point2<F>], config: &EngineConfig<F>) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeomError::TooFewSites { got: points.len() });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeomError::NonFiniteSite { index });
        }
        Ok(Self::build(points, config))
    }

    #[inline]
    pub fn sites(&self) -> &[Point2<F>] {
        &self.sites
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of `tri`.
    ///
    /// # Panics
    ///
    /// Panics if `tri` refers to a site outside this triangulation.
    #[inline]
    pub fn triangle_points(&self, tri: &Triangle) -> [Point2<F>; 3] {
        [self.sites[tri.a], self.sites[tri.b], self.sites[tri.c]]
    }

    /// Iterates over the corner positions of every triangle.
    pub fn iter_points(&self) -> impl Iterator<Item = [Point2<F>; 3]> + '_ {
        self.triangles.iter().map(|t| self.triangle_points(t))
    }

    /// Maps every edge to the triangles that use it, ordered by edge.
    pub(crate) fn edge_triangles(&self) -> BTreeMap<Edge, Vec<usize>> {
        let mut map: BTreeMap<Edge, Vec<usize>> = BTreeMap::new();
        for (ti, tri) in self.triangles.iter().enumerate() {
            for edge in tri.edges() {
                map.entry(edge).or_default().push(ti);
            }
        }
        map
    }

    /// Unique edges, sorted.
    pub fn edges(&self) -> Vec<Edge> {
        self.edge_triangles().into_keys().collect()
    }

    /// Edges used by exactly one triangle, sorted.
    ///
    /// For a valid triangulation these form the convex hull of the
    /// connected sites.
    pub fn hull_edges(&self) -> Vec<Edge> {
        self.edge_triangles()
            .into_iter()
            .filter(|(_, tris)| tris.len() == 1)
            .map(|(edge, _)| edge)
            .collect()
    }

    /// Sum of triangle areas.
    pub fn total_area(&self) -> F {
        let twice = self
            .iter_points()
            .fold(F::zero(), |acc, [a, b, c]| acc + signed_area2(a, b, c));
        twice / (F::one() + F::one())
    }

    /// Checks the structural invariants of the triangulation.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateTriangle` for the first triangle without strictly
    /// positive signed area, or `NonManifoldEdge` for the first edge shared by
    /// more than two triangles.
    pub fn validate(&self) -> Result<()> {
        for (index, [a, b, c]) in self.iter_points().enumerate() {
            if !(signed_area2(a, b, c) > F::zero()) {
                return Err(GeomError::DegenerateTriangle { index });
            }
        }
        for (edge, tris) in self.edge_triangles() {
            if tris.len() > 2 {
                return Err(GeomError::NonManifoldEdge {
                    a: edge.a,
                    b: edge.b,
                    count: tris.len(),
                });
            }
        }
        Ok(())
    }
}

/// Computes the Delaunay triangulation of a set of points.
///
/// Uses the Bowyer-Watson incremental insertion algorithm with the default
/// [`EngineConfig`].
///
/// # Arguments
///
/// * `points` - The points to triangulate
///
/// # Returns
///
/// A vector of triangles. Each triangle contains indices into the input points array.
/// Triangles are in counter-clockwise orientation.
///
/// # Panics
///
/// Does not panic, but returns an empty vector if fewer than 3 points are provided.
///
/// # Example
///
/// ```
/// use planegeom::triangulation::delaunay_triangulation;
/// use planegeom::Point2;
///
/// // Square with center point
/// let points: Vec<Point2<f64>> = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(0.5, 0.5),
/// ];
///
/// let triangles = delaunay_triangulation(&points);
///
/// // Square with center point should produce 4 triangles
/// assert_eq!(triangles.len(), 4);
/// ```
pub fn delaunay_triangulation<F: Float>(points: &[Point2<F>]) -> Vec<Triangle> {
    Triangulation::build(points, &EngineConfig::default()).into_triangles()
}
