//! SVG export of triangulations, Voronoi cells, hulls and sites.
//!
//! # Example
//!
//! ```
//! use planegeom::config::{Canvas, EngineConfig};
//! use planegeom::io::SvgScene;
//! use planegeom::triangulation::{voronoi_cells, Triangulation};
//! use planegeom::Point2;
//!
//! let sites = vec![
//!     Point2::new(100.0_f64, 100.0),
//!     Point2::new(700.0, 120.0),
//!     Point2::new(400.0, 650.0),
//!     Point2::new(390.0, 300.0),
//! ];
//! let config = EngineConfig::default();
//! let tri = Triangulation::build(&sites, &config);
//!
//! let svg = SvgScene::new(Canvas::default())
//!     .triangulation(&tri)
//!     .voronoi(&voronoi_cells(&tri, &config))
//!     .sites(&sites, 3.0)
//!     .render();
//!
//! assert!(svg.starts_with("<svg"));
//! assert_eq!(svg.matches("class=\"triangle\"").count(), 3);
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::config::Canvas;
use crate::polygon::ConvexPolygon;
use crate::primitives::Point2;
use crate::triangulation::{Triangulation, VoronoiDiagram};
use num_traits::Float;

/// Converts a polyline to an SVG path string.
///
/// # Arguments
///
/// * `points` - The polyline vertices
/// * `closed` - Whether to close the path with 'Z'
///
/// # Returns
///
/// An SVG path string using M and L commands.
///
/// # Example
///
/// ```
/// use planegeom::{Point2, io::polyline_to_svg_path};
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
/// ];
///
/// let svg = polyline_to_svg_path(&points, true);
/// assert_eq!(svg, "M 0 0 L 10 0 L 10 10 Z");
/// ```
pub fn polyline_to_svg_path<F: Float + fmt::Display>(points: &[Point2<F>], closed: bool) -> String {
    if points.is_empty() {
        return String::new();
    }

    let mut result = String::new();

    result.push_str(&format!("M {} {}", points[0].x, points[0].y));
    for p in &points[1..] {
        result.push_str(&format!(" L {} {}", p.x, p.y));
    }

    if closed {
        result.push_str(" Z");
    }

    result
}

/// Converts a convex polygon to a closed SVG path string.
pub fn polygon_to_svg_path<F: Float + fmt::Display>(polygon: &ConvexPolygon<F>) -> String {
    polyline_to_svg_path(&polygon.vertices, true)
}

/// An SVG document assembled layer by layer over a canvas.
///
/// Every element carries a `class` attribute (`triangle`, `voronoi-cell`,
/// `hull`, `polygon`, `site`) and default stroke/fill styling.
#[derive(Debug, Clone)]
pub struct SvgScene<F> {
    canvas: Canvas<F>,
    elements: Vec<String>,
}

impl<F: Float + fmt::Display> SvgScene<F> {
    pub fn new(canvas: Canvas<F>) -> Self {
        Self {
            canvas,
            elements: Vec::new(),
        }
    }

    /// Number of elements added so far.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn path(mut self, d: String, class: &str, style: &str) -> Self {
        if !d.is_empty() {
            self.elements
                .push(format!("<path class=\"{}\" d=\"{}\" {}/>", class, d, style));
        }
        self
    }

    /// Adds every triangle as a closed outline.
    pub fn triangulation(self, triangulation: &Triangulation<F>) -> Self {
        triangulation.iter_points().fold(self, |scene, corners| {
            scene.path(
                polyline_to_svg_path(&corners, true),
                "triangle",
                "fill=\"none\" stroke=\"#3366cc\" stroke-width=\"1\"",
            )
        })
    }

    /// Adds every non-degenerate Voronoi cell.
    pub fn voronoi(self, diagram: &VoronoiDiagram<F>) -> Self {
        diagram.polygons().fold(self, |scene, cell| {
            scene.path(
                polyline_to_svg_path(&cell.vertices, true),
                "voronoi-cell",
                "fill=\"none\" stroke=\"#cc3333\" stroke-width=\"1\"",
            )
        })
    }

    /// Adds a convex hull outline.
    pub fn hull(self, hull: &[Point2<F>]) -> Self {
        self.path(
            polyline_to_svg_path(hull, true),
            "hull",
            "fill=\"none\" stroke=\"#222222\" stroke-width=\"2\"",
        )
    }

    /// Adds a filled polygon, e.g. a Minkowski sum or an obstacle.
    pub fn polygon(self, polygon: &ConvexPolygon<F>, fill: &str) -> Self {
        let style = format!(
            "fill=\"{}\" fill-opacity=\"0.4\" stroke=\"#222222\" stroke-width=\"1\"",
            fill
        );
        self.path(polygon_to_svg_path(polygon), "polygon", &style)
    }

    /// Adds a dot per site.
    pub fn sites(mut self, sites: &[Point2<F>], radius: F) -> Self {
        for p in sites {
            self.elements.push(format!(
                "<circle class=\"site\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"#000000\"/>",
                p.x, p.y, radius
            ));
        }
        self
    }

    /// Renders the complete document.
    pub fn render(&self) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\">\n",
            self.canvas.min_x,
            self.canvas.min_y,
            self.canvas.width(),
            self.canvas.height(),
            self.canvas.width(),
            self.canvas.height()
        );
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    /// Writes the rendered document to `out`.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()
    }
}
