//! Convex polygons and Minkowski sums.
//!
//! # Example
//!
//! ```
//! use planegeom::polygon::{minkowski_sum_polygons, ConvexPolygon};
//! use planegeom::Point2;
//!
//! let robot = ConvexPolygon::hull_of(&[
//!     Point2::new(0.0_f64, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, 1.0),
//! ]);
//! let obstacle = ConvexPolygon::hull_of(&[
//!     Point2::new(5.0_f64, 5.0),
//!     Point2::new(7.0, 5.0),
//!     Point2::new(7.0, 7.0),
//!     Point2::new(5.0, 7.0),
//! ]);
//!
//! let grown = minkowski_sum_polygons(&robot, &obstacle);
//! assert!(grown.area() > obstacle.area());
//! ```

mod core;
mod minkowski;

pub use core::ConvexPolygon;
pub use minkowski::{
    display_offset, min_vertex_distance, minkowski_difference, minkowski_sum,
    minkowski_sum_polygons, polygons_collide, MinkowskiDisplay,
};
