//! Input/output utilities for geometric data.
//!
//! Vertex-list text records and CSV cost logs for the measurement tools, and
//! SVG export for inspecting results.

mod record;
mod svg;

pub use record::{
    format_vertex_list, parse_vertex_list, write_minkowski_csv, write_timing_csv,
    MinkowskiRecord, TimingRecord, MINKOWSKI_CSV_HEADER,
};
pub use svg::{polygon_to_svg_path, polyline_to_svg_path, SvgScene};
