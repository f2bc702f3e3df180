//! Delaunay triangulation and its Voronoi dual.
//!
//! [`Triangulation::build`] runs a full Bowyer-Watson construction over the
//! given sites; [`voronoi_cells`] derives one cell per site from the result.

mod delaunay;
mod voronoi;

pub use delaunay::{
    delaunay_triangulation, in_circumcircle, Edge, SuperTriangle, Triangle, Triangulation,
};
pub use voronoi::{
    circumcenter, voronoi_cells, voronoi_diagram, voronoi_edges, VoronoiCell, VoronoiDiagram,
    VoronoiEdge,
};
