//! planegeom - Planar Delaunay, Voronoi, convex hull and Minkowski sums
//!
//! Four small, self-contained algorithms over `Point2<F>` for any
//! `F: num_traits::Float`:
//!
//! - [`triangulation::Triangulation`]: Bowyer-Watson Delaunay triangulation,
//!   rebuilt from scratch on every call
//! - [`triangulation::voronoi_cells`]: per-site Voronoi cells from the
//!   triangulation's circumcenters
//! - [`hull::convex_hull`]: Andrew's monotone chain
//! - [`polygon::minkowski_sum`]: hull of all pairwise vertex sums
//!
//! Degenerate input never panics; it produces empty triangulations,
//! degenerate cells or short hulls. Checked entry points report [`GeomError`].
//!
//! # Example
//!
//! ```
//! use planegeom::config::EngineConfig;
//! use planegeom::triangulation::{voronoi_cells, Triangulation};
//! use planegeom::{convex_hull, Point2};
//!
//! let sites = vec![
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(0.5, 0.5),
//! ];
//!
//! let config = EngineConfig::default();
//! let tri = Triangulation::build(&sites, &config);
//! assert_eq!(tri.len(), 4);
//!
//! let cells = voronoi_cells(&tri, &config);
//! assert_eq!(cells.bounded_count(), 1);
//!
//! assert_eq!(convex_hull(&sites).len(), 4);
//! ```

pub mod config;
pub mod error;
pub mod hull;
pub mod io;
pub mod polygon;
pub mod primitives;
pub mod sampling;
pub mod session;
pub mod tolerance;
pub mod triangulation;

pub use config::{Canvas, EngineConfig, EngineConfigBuilder};
pub use error::{GeomError, Result};
pub use hull::convex_hull;
pub use polygon::{minkowski_sum, ConvexPolygon};
pub use primitives::{Point2, Vec2};
pub use tolerance::{orient2d, signed_area2, Orientation};
pub use triangulation::{delaunay_triangulation, voronoi_diagram, Triangle, Triangulation};
