//! Error types for planegeom operations.
//!
//! The geometry algorithms themselves never fail: degenerate input degrades
//! to empty or degenerate output. `GeomError` is returned only by the checked
//! entry points, configuration validation and record parsing.

use thiserror::Error;

/// Errors reported by checked geometry entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A triangulation needs at least three sites.
    #[error("triangulation needs at least 3 sites, got {got}")]
    TooFewSites {
        /// Number of sites supplied.
        got: usize,
    },

    /// A site has a NaN or infinite coordinate.
    #[error("site {index} has a non-finite coordinate")]
    NonFiniteSite {
        /// Index of the offending site.
        index: usize,
    },

    /// An edge is shared by more than two triangles.
    #[error("edge ({a}, {b}) is shared by {count} triangles")]
    NonManifoldEdge {
        /// Smaller site index of the edge.
        a: usize,
        /// Larger site index of the edge.
        b: usize,
        /// Number of triangles using the edge.
        count: usize,
    },

    /// A triangle has zero or negative signed area.
    #[error("triangle {index} is degenerate or clockwise")]
    DegenerateTriangle {
        /// Position of the triangle in the triangulation.
        index: usize,
    },

    /// A serialized vertex list could not be parsed.
    #[error("cannot parse vertex list at byte {position}: {reason}")]
    Parse {
        /// Byte offset of the failure.
        position: usize,
        /// What was expected.
        reason: String,
    },
}

/// Result type alias for planegeom operations.
pub type Result<T> = std::result::Result<T, GeomError>;
