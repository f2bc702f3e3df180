//! Voronoi cells computed from a Delaunay triangulation.
//!
//! A Voronoi diagram partitions the plane into cells, where each cell contains
//! all points closer to its generating site than to any other site.
//!
//! # How It Works
//!
//! The Voronoi diagram is the dual of the Delaunay triangulation:
//! - Each Delaunay triangle's circumcenter becomes a Voronoi vertex
//! - Each Delaunay edge shared by two triangles becomes a Voronoi edge
//! - Edges on the convex hull create unbounded Voronoi rays
//!
//! A site's cell is built from the circumcenters of the triangles that use
//! it, merged when they coincide and sorted by angle around the site. Cells
//! are not clipped: a hull site gets the polygon of its finite circumcenters
//! in place of its unbounded cell, and is flagged [`VoronoiCell::unbounded`].
//!
//! # Example
//!
//! ```
//! use planegeom::config::EngineConfig;
//! use planegeom::triangulation::voronoi_diagram;
//! use planegeom::Point2;
//!
//! let sites: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(0.5, 0.5),
//! ];
//!
//! let voronoi = voronoi_diagram(&sites, &EngineConfig::default());
//!
//! // One cell per site; only the centre site has a drawable cell.
//! assert_eq!(voronoi.len(), 5);
//! assert_eq!(voronoi.polygons().count(), 1);
//! assert_eq!(voronoi.cell(4).unwrap().vertices.len(), 4);
//! ```

use crate::config::EngineConfig;
use crate::primitives::{Point2, Vec2};
use crate::tolerance::weld_keep_first;
use crate::triangulation::delaunay::{Edge, Triangulation};
use num_traits::Float;
use std::cmp::Ordering;

/// The Voronoi cell of one site.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell<F> {
    /// Index of the site this cell belongs to.
    pub site: usize,
    /// Cell vertices in counter-clockwise order around the site.
    /// Empty when fewer than 3 distinct vertices exist.
    pub vertices: Vec<Point2<F>>,
    /// Whether the true cell extends to infinity (site on the hull, or not
    /// connected to the triangulation).
    pub unbounded: bool,
}

impl<F: Float> VoronoiCell<F> {
    /// Returns true if the cell has no drawable polygon.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Area of the cell polygon (zero when degenerate).
    pub fn area(&self) -> F {
        let n = self.vertices.len();
        if n < 3 {
            return F::zero();
        }
        let twice = (0..n).fold(F::zero(), |acc, i| {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            acc + (a.x * b.y - b.x * a.y)
        });
        (twice / (F::one() + F::one())).abs()
    }
}

/// One cell per site, in site order.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiDiagram<F> {
    pub sites: Vec<Point2<F>>,
    pub cells: Vec<VoronoiCell<F>>,
}

impl<F: Float> VoronoiDiagram<F> {
    /// The cell of site `index`, if it exists.
    #[inline]
    pub fn cell(&self, index: usize) -> Option<&VoronoiCell<F>> {
        self.cells.get(index)
    }

    /// Non-degenerate cells, in site order.
    pub fn polygons(&self) -> impl Iterator<Item = &VoronoiCell<F>> + '_ {
        self.cells.iter().filter(|c| !c.is_degenerate())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of non-degenerate cells belonging to interior sites.
    pub fn bounded_count(&self) -> usize {
        self.polygons().filter(|c| !c.unbounded).count()
    }
}

/// A Voronoi edge, tagged with the Delaunay edge it is dual to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoronoiEdge<F> {
    /// Segment between the circumcenters of the two triangles sharing `sites`.
    Finite {
        sites: Edge,
        from: Point2<F>,
        to: Point2<F>,
    },
    /// Ray from the circumcenter of the single triangle on hull edge `sites`,
    /// pointing away from the triangulation.
    Ray {
        sites: Edge,
        from: Point2<F>,
        direction: Vec2<F>,
    },
}

/// Computes the circumcenter of a triangle.
///
/// The circumcenter is equidistant from all three vertices. Returns `None`
/// when the determinant `2·(ax(by−cy) + bx(cy−ay) + cx(ay−by))` is smaller
/// than `eps` in magnitude, i.e. the triangle is (nearly) collinear.
///
/// # Example
///
/// ```
/// use planegeom::triangulation::circumcenter;
/// use planegeom::Point2;
///
/// // Right triangle
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// let c = Point2::new(0.0, 1.0);
///
/// let center = circumcenter(a, b, c, 1e-6).unwrap();
///
/// // Circumcenter of right triangle is at midpoint of hypotenuse
/// assert!((center.x - 0.5).abs() < 1e-10);
/// assert!((center.y - 0.5).abs() < 1e-10);
///
/// assert!(circumcenter(a, b, Point2::new(2.0, 0.0), 1e-6).is_none());
/// ```
pub fn circumcenter<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Option<Point2<F>> {
    let two = F::one() + F::one();

    let d = two * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if !(d.abs() >= eps) {
        return None;
    }

    let aa = a.x * a.x + a.y * a.y;
    let bb = b.x * b.x + b.y * b.y;
    let cc = c.x * c.x + c.y * c.y;

    let ux = (aa * (b.y - c.y) + bb * (c.y - a.y) + cc * (a.y - b.y)) / d;
    let uy = (aa * (c.x - b.x) + bb * (a.x - c.x) + cc * (b.x - a.x)) / d;

    Some(Point2::new(ux, uy))
}

/// Builds the Voronoi cells of every site of `triangulation`.
///
/// Circumcenters closer than `config.vertex_merge_eps` on both axes are
/// merged; a cell left with fewer than 3 vertices is degenerate.
pub fn voronoi_cells<F: Float>(
    triangulation: &Triangulation<F>,
    config: &EngineConfig<F>,
) -> VoronoiDiagram<F> {
    let sites = triangulation.sites();
    let mut collected: Vec<Vec<Point2<F>>> = vec![Vec::new(); sites.len()];

    for tri in triangulation.triangles() {
        let [a, b, c] = triangulation.triangle_points(tri);
        if let Some(center) = circumcenter(a, b, c, config.circumcenter_eps) {
            for site in tri.vertices() {
                collected[site].push(center);
            }
        }
    }

    let mut interior: Vec<bool> = vec![false; sites.len()];
    for tri in triangulation.triangles() {
        for site in tri.vertices() {
            interior[site] = true;
        }
    }
    for edge in triangulation.hull_edges() {
        interior[edge.a] = false;
        interior[edge.b] = false;
    }

    let cells = collected
        .into_iter()
        .enumerate()
        .map(|(site, centers)| VoronoiCell {
            site,
            vertices: cell_polygon(sites[site], &centers, config.vertex_merge_eps),
            unbounded: !interior[site],
        })
        .collect();

    VoronoiDiagram {
        sites: sites.to_vec(),
        cells,
    }
}

/// Merges near-duplicate centers and sorts the rest by angle around `site`.
fn cell_polygon<F: Float>(site: Point2<F>, centers: &[Point2<F>], merge_eps: F) -> Vec<Point2<F>> {
    let mut vertices = weld_keep_first(centers, merge_eps);
    if vertices.len() < 3 {
        return Vec::new();
    }
    vertices.sort_by(|&p, &q| {
        (p - site)
            .angle()
            .partial_cmp(&(q - site).angle())
            .unwrap_or(Ordering::Equal)
    });
    vertices
}

/// Triangulates `sites` and builds their Voronoi cells.
///
/// # Example
///
/// ```
/// use planegeom::config::EngineConfig;
/// use planegeom::triangulation::voronoi_diagram;
/// use planegeom::Point2;
///
/// let two = [Point2::new(0.0_f64, 0.0), Point2::new(1.0, 0.0)];
/// let voronoi = voronoi_diagram(&two, &EngineConfig::default());
/// assert_eq!(voronoi.len(), 2);
/// assert_eq!(voronoi.polygons().count(), 0);
/// ```
pub fn voronoi_diagram<F: Float>(sites: &[Point2<F>], config: &EngineConfig<F>) -> VoronoiDiagram<F> {
    voronoi_cells(&Triangulation::build(sites, config), config)
}

/// Computes the dual edges of `triangulation`.
///
/// Interior Delaunay edges give a [`VoronoiEdge::Finite`] segment, hull edges
/// a [`VoronoiEdge::Ray`]. Edges next to a triangle without a circumcenter
/// are skipped. Output is ordered by Delaunay edge.
pub fn voronoi_edges<F: Float>(triangulation: &Triangulation<F>, eps: F) -> Vec<VoronoiEdge<F>> {
    let sites = triangulation.sites();
    let triangles = triangulation.triangles();
    let centers: Vec<Option<Point2<F>>> = triangulation
        .iter_points()
        .map(|[a, b, c]| circumcenter(a, b, c, eps))
        .collect();

    let mut edges = Vec::new();
    for (edge, tris) in triangulation.edge_triangles() {
        match tris.as_slice() {
            &[t0, t1] => {
                if let (Some(from), Some(to)) = (centers[t0], centers[t1]) {
                    edges.push(VoronoiEdge::Finite {
                        sites: edge,
                        from,
                        to,
                    });
                }
            }
            &[t] => {
                let Some(from) = centers[t] else { continue };
                let pa = sites[edge.a];
                let pb = sites[edge.b];
                let third = triangles[t]
                    .vertices()
                    .into_iter()
                    .find(|&v| v != edge.a && v != edge.b)
                    .map(|v| sites[v])
                    .unwrap_or(pa);

                // Point the ray away from the triangle's third vertex.
                let perp = (pb - pa).perpendicular();
                let to_third = third - pa.midpoint(pb);
                let outward = if perp.dot(to_third) > F::zero() { -perp } else { perp };

                if let Some(direction) = outward.normalize() {
                    edges.push(VoronoiEdge::Ray {
                        sites: edge,
                        from,
                        direction,
                    });
                }
            }
            _ => {}
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn diagram(sites: &[Point2<f64>]) -> VoronoiDiagram<f64> {
        voronoi_diagram(sites, &EngineConfig::default())
    }

    fn square_with_center() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.5, 0.5),
        ]
    }

    #[test]
    fn test_circumcenter_equilateral() {
        let sqrt3_2 = 3.0_f64.sqrt() / 2.0;
        let a = Point2::new(0.0_f64, 1.0);
        let b = Point2::new(-sqrt3_2, -0.5);
        let c = Point2::new(sqrt3_2, -0.5);

        let center = circumcenter(a, b, c, 1e-6).unwrap();

        assert_relative_eq!(center.x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_circumcenter_is_equidistant() {
        let a = Point2::new(12.0_f64, 3.0);
        let b = Point2::new(40.0, 9.0);
        let c = Point2::new(21.0, 33.0);
        let center = circumcenter(a, b, c, 1e-6).unwrap();

        assert_relative_eq!(center.distance(a), center.distance(b), epsilon = 1e-9);
        assert_relative_eq!(center.distance(b), center.distance(c), epsilon = 1e-9);
    }

    #[test]
    fn test_circumcenter_degenerate() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(1.0, 1.0);
        assert!(circumcenter(a, b, Point2::new(2.0, 2.0), 1e-6).is_none());
        assert!(circumcenter(a, a, b, 1e-6).is_none());
        // A tiny but valid triangle is rejected by a large epsilon only.
        let c = Point2::new(1e-3, 0.0);
        let d = Point2::new(0.0, 1e-3);
        assert!(circumcenter(a, c, d, 1e-9).is_some());
        assert!(circumcenter(a, c, d, 1e-3).is_none());
    }

    #[test]
    fn test_voronoi_empty() {
        let voronoi = diagram(&[]);
        assert!(voronoi.is_empty());
        assert_eq!(voronoi.bounded_count(), 0);
    }

    #[test]
    fn test_voronoi_two_points() {
        let sites = vec![Point2::new(0.0_f64, 0.0), Point2::new(1.0, 0.0)];
        let voronoi = diagram(&sites);
        assert_eq!(voronoi.len(), 2);
        assert!(voronoi.cells.iter().all(|c| c.is_degenerate() && c.unbounded));
        assert_eq!(voronoi.polygons().count(), 0);
    }

    #[test]
    fn test_voronoi_three_points() {
        let sites = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
        ];
        let voronoi = diagram(&sites);

        // A single circumcenter cannot form a polygon.
        assert_eq!(voronoi.len(), 3);
        for (i, cell) in voronoi.cells.iter().enumerate() {
            assert_eq!(cell.site, i);
            assert!(cell.unbounded);
            assert!(cell.is_degenerate());
        }
    }

    #[test]
    fn test_voronoi_square_merges_circumcenters() {
        // Both triangles of a square share the circumcenter (0.5, 0.5).
        let sites = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let voronoi = diagram(&sites);
        assert_eq!(voronoi.len(), 4);
        assert_eq!(voronoi.polygons().count(), 0);
    }

    #[test]
    fn test_voronoi_center_cell() {
        let voronoi = diagram(&square_with_center());

        let center = voronoi.cell(4).unwrap();
        assert!(!center.unbounded);
        assert_eq!(center.vertices.len(), 4);
        assert_relative_eq!(center.area(), 0.5, epsilon = 1e-9);
        assert_eq!(voronoi.bounded_count(), 1);

        // Edge midpoints of the square, in CCW order.
        let expected = [(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)];
        let start = center
            .vertices
            .iter()
            .position(|v| v.approx_eq(Point2::new(0.5, 0.0), 1e-9))
            .unwrap();
        for (k, &(x, y)) in expected.iter().enumerate() {
            let v = center.vertices[(start + k) % 4];
            assert_relative_eq!(v.x, x, epsilon = 1e-9);
            assert_relative_eq!(v.y, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cell_vertices_sorted_by_angle() {
        let sites: Vec<Point2<f64>> = vec![
            Point2::new(100.0, 100.0),
            Point2::new(500.0, 120.0),
            Point2::new(650.0, 500.0),
            Point2::new(300.0, 700.0),
            Point2::new(60.0, 420.0),
            Point2::new(330.0, 380.0),
        ];
        let voronoi = diagram(&sites);
        let cell = voronoi.cell(5).unwrap();
        assert!(!cell.is_degenerate());

        let angles: Vec<f64> = cell.vertices.iter().map(|&v| (v - sites[5]).angle()).collect();
        assert!(angles.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_cell_vertices_are_equidistant_to_neighbours() {
        let sites = square_with_center();
        let tri = Triangulation::build(&sites, &EngineConfig::default());
        let voronoi = voronoi_cells(&tri, &EngineConfig::default());

        // Every vertex of the centre cell is a circumcenter of a triangle
        // through the centre site, so it is equally far from two corners.
        for v in &voronoi.cell(4).unwrap().vertices {
            let d = v.distance(sites[4]);
            let matches = sites[..4]
                .iter()
                .filter(|&&s| (v.distance(s) - d).abs() < 1e-9)
                .count();
            assert_eq!(matches, 2);
        }
    }

    #[test]
    fn test_voronoi_collinear() {
        let sites = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        let voronoi = diagram(&sites);
        assert_eq!(voronoi.len(), 3);
        assert_eq!(voronoi.polygons().count(), 0);
    }

    #[test]
    fn test_voronoi_edges_triangle_has_three_rays() {
        let sites = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
        ];
        let tri = Triangulation::build(&sites, &EngineConfig::default());
        let edges = voronoi_edges(&tri, 1e-6);

        assert_eq!(edges.len(), 3);
        for edge in &edges {
            match *edge {
                VoronoiEdge::Ray {
                    sites: e, direction, ..
                } => {
                    // Rays cross their hull edge away from the third site.
                    let mid = sites[e.a].midpoint(sites[e.b]);
                    let third = (0..3).find(|&v| v != e.a && v != e.b).unwrap();
                    assert!(direction.dot(sites[third] - mid) < 0.0);
                    assert_relative_eq!(direction.magnitude(), 1.0, epsilon = 1e-12);
                }
                VoronoiEdge::Finite { .. } => panic!("unexpected finite edge"),
            }
        }
    }

    #[test]
    fn test_voronoi_edges_interior() {
        let tri = Triangulation::build(&square_with_center(), &EngineConfig::default());
        let edges = voronoi_edges(&tri, 1e-6);

        let finite: Vec<_> = edges
            .iter()
            .filter_map(|e| match *e {
                VoronoiEdge::Finite { sites, from, to } => Some((sites, from, to)),
                VoronoiEdge::Ray { .. } => None,
            })
            .collect();

        // Four spokes from the centre, each dual to a segment between
        // adjacent edge midpoints.
        assert_eq!(finite.len(), 4);
        for (sites, from, to) in finite {
            assert_eq!(sites.b, 4);
            assert_relative_eq!(from.distance(to), 0.5_f64.sqrt(), epsilon = 1e-9);
        }
        assert_eq!(edges.len(), 8);
    }

    #[test]
    fn test_voronoi_f32() {
        let sites: Vec<Point2<f32>> = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(5.0, 5.0),
        ];
        let voronoi = voronoi_diagram(&sites, &EngineConfig::default());
        assert_eq!(voronoi.len(), 5);
        assert_eq!(voronoi.bounded_count(), 1);
    }
}
