//! Vertex-list text format and CSV measurement records.
//!
//! A vertex list is a semicolon-separated sequence of `(x,y)` tuples, e.g.
//! `(10,20);(30.5,40)`. It is used for the polygon columns of the Minkowski
//! cost log.
//!
//! # Example
//!
//! ```
//! use planegeom::io::{format_vertex_list, parse_vertex_list};
//! use planegeom::Point2;
//!
//! let points = vec![Point2::new(1.0_f64, 2.0), Point2::new(3.5, -4.0)];
//! let text = format_vertex_list(&points, 1);
//! assert_eq!(text, "(1.0,2.0);(3.5,-4.0)");
//!
//! let parsed: Vec<Point2<f64>> = parse_vertex_list(&text).unwrap();
//! assert_eq!(parsed, points);
//! ```

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::error::{GeomError, Result};
use crate::primitives::Point2;
use num_traits::Float;

/// Formats points as `(x,y);(x,y)` with `decimals` digits after the point.
pub fn format_vertex_list<F: Float + fmt::Display>(points: &[Point2<F>], decimals: usize) -> String {
    points
        .iter()
        .map(|p| format!("({:.*},{:.*})", decimals, p.x, decimals, p.y))
        .collect::<Vec<_>>()
        .join(";")
}

/// Parses a vertex list written by [`format_vertex_list`].
///
/// Whitespace around tokens is ignored; an empty (or blank) string is an
/// empty list.
///
/// # Errors
///
/// Returns `GeomError::Parse` with the byte offset of the first unexpected
/// token.
pub fn parse_vertex_list<F: Float + FromStr>(s: &str) -> Result<Vec<Point2<F>>> {
    VertexListParser::new(s).parse()
}

struct VertexListParser<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> VertexListParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn parse<F: Float + FromStr>(&mut self) -> Result<Vec<Point2<F>>> {
        let mut points = Vec::new();

        self.skip_whitespace();
        if self.chars.peek().is_none() {
            return Ok(points);
        }

        loop {
            self.expect('(')?;
            let x = self.parse_number()?;
            self.expect(',')?;
            let y = self.parse_number()?;
            self.expect(')')?;
            points.push(Point2::new(x, y));

            self.skip_whitespace();
            match self.chars.next() {
                None => return Ok(points),
                Some((_, ';')) => {}
                Some((pos, c)) => {
                    return Err(error(pos, format!("expected ';' but found '{}'", c)));
                }
            }
        }
    }

    fn position(&mut self) -> usize {
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.input.len())
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, wanted: char) -> Result<()> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((_, c)) if c == wanted => Ok(()),
            Some((pos, c)) => Err(error(pos, format!("expected '{}' but found '{}'", wanted, c))),
            None => Err(error(self.input.len(), format!("expected '{}' at end of input", wanted))),
        }
    }

    fn parse_number<F: Float + FromStr>(&mut self) -> Result<F> {
        self.skip_whitespace();
        let start = self.position();

        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                self.chars.next();
            } else {
                break;
            }
        }

        let end = self.position();
        if end == start {
            return Err(error(start, "expected a number".to_string()));
        }

        let text = &self.input[start..end];
        text.parse()
            .map_err(|_| error(start, format!("invalid number '{}'", text)))
    }
}

fn error(position: usize, reason: String) -> GeomError {
    GeomError::Parse { position, reason }
}

/// One measurement of a full triangulation rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingRecord {
    /// Number of sites in the rebuilt triangulation.
    pub num_points: usize,
    pub elapsed_ms: f64,
}

/// Writes timing records as CSV with header `num_points,elapsed_ms`.
pub fn write_timing_csv<W: Write>(mut out: W, records: &[TimingRecord]) -> io::Result<()> {
    writeln!(out, "num_points,elapsed_ms")?;
    for r in records {
        writeln!(out, "{},{}", r.num_points, r.elapsed_ms)?;
    }
    out.flush()
}

/// One Minkowski sum computation: operands, result and cost.
#[derive(Debug, Clone, PartialEq)]
pub struct MinkowskiRecord<F> {
    pub subject_index: usize,
    pub obstacle_index: usize,
    pub subject: Vec<Point2<F>>,
    pub obstacle: Vec<Point2<F>>,
    /// The Minkowski sum itself, untranslated.
    pub sum: Vec<Point2<F>>,
    /// The sum moved onto the obstacle for drawing; not a Minkowski sum.
    pub display: Vec<Point2<F>>,
    pub elapsed_ms: f64,
}

/// Header line of [`write_minkowski_csv`].
pub const MINKOWSKI_CSV_HEADER: &str =
    "subject_index,obstacle_index,subject_points,obstacle_points,sum_points,display_points,elapsed_ms";

/// Writes Minkowski records as CSV; vertex-list columns are quoted.
///
/// # Example
///
/// ```
/// use planegeom::io::{write_minkowski_csv, MinkowskiRecord};
/// use planegeom::Point2;
///
/// let record = MinkowskiRecord {
///     subject_index: 0,
///     obstacle_index: 2,
///     subject: vec![Point2::new(0.0_f64, 0.0)],
///     obstacle: vec![Point2::new(5.0, 5.0)],
///     sum: vec![Point2::new(5.0, 5.0)],
///     display: vec![Point2::new(5.0, 5.0)],
///     elapsed_ms: 0.25,
/// };
///
/// let mut out = Vec::new();
/// write_minkowski_csv(&mut out, &[record], 0).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.ends_with("0,2,\"(0,0)\",\"(5,5)\",\"(5,5)\",\"(5,5)\",0.25\n"));
/// ```
pub fn write_minkowski_csv<W: Write, F: Float + fmt::Display>(
    mut out: W,
    records: &[MinkowskiRecord<F>],
    decimals: usize,
) -> io::Result<()> {
    writeln!(out, "{}", MINKOWSKI_CSV_HEADER)?;
    for r in records {
        writeln!(
            out,
            "{},{},\"{}\",\"{}\",\"{}\",\"{}\",{}",
            r.subject_index,
            r.obstacle_index,
            format_vertex_list(&r.subject, decimals),
            format_vertex_list(&r.obstacle, decimals),
            format_vertex_list(&r.sum, decimals),
            format_vertex_list(&r.display, decimals),
            r.elapsed_ms
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rounds_to_decimals() {
        let points = vec![Point2::new(10.26_f64, 3.0), Point2::new(-0.5, 799.999)];
        assert_eq!(format_vertex_list(&points, 1), "(10.3,3.0);(-0.5,800.0)");
        assert_eq!(format_vertex_list(&points[..1], 0), "(10,3)");
        assert_eq!(format_vertex_list::<f64>(&[], 2), "");
    }

    #[test]
    fn test_parse_with_whitespace() {
        let parsed: Vec<Point2<f64>> = parse_vertex_list(" ( 1 , 2 ) ; (3e1,-4.5) ").unwrap();
        assert_eq!(parsed, vec![Point2::new(1.0, 2.0), Point2::new(30.0, -4.5)]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_vertex_list::<f64>("").unwrap().is_empty());
        assert!(parse_vertex_list::<f64>("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors_report_position() {
        match parse_vertex_list::<f64>("(1,2);3,4)") {
            Err(GeomError::Parse { position, .. }) => assert_eq!(position, 6),
            other => panic!("unexpected result: {:?}", other),
        }
        match parse_vertex_list::<f64>("(1,2)(3,4)") {
            Err(GeomError::Parse { position, .. }) => assert_eq!(position, 5),
            other => panic!("unexpected result: {:?}", other),
        }
        match parse_vertex_list::<f64>("(1,--2)") {
            Err(GeomError::Parse { position, reason }) => {
                assert_eq!(position, 3);
                assert!(reason.contains("--2"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(parse_vertex_list::<f64>("(1,2").is_err());
        assert!(parse_vertex_list::<f64>("(1,2);").is_err());
    }

    #[test]
    fn test_parse_f32() {
        let parsed: Vec<Point2<f32>> = parse_vertex_list("(0.5,1.5)").unwrap();
        assert_eq!(parsed, vec![Point2::new(0.5, 1.5)]);
    }

    #[test]
    fn test_timing_csv() {
        let records = [
            TimingRecord {
                num_points: 3,
                elapsed_ms: 0.5,
            },
            TimingRecord {
                num_points: 4,
                elapsed_ms: 1.25,
            },
        ];
        let mut out = Vec::new();
        write_timing_csv(&mut out, &records).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "num_points,elapsed_ms\n3,0.5\n4,1.25\n"
        );
    }

    #[test]
    fn test_minkowski_csv_columns() {
        let record = MinkowskiRecord {
            subject_index: 1,
            obstacle_index: 0,
            subject: vec![Point2::new(0.0_f64, 0.0), Point2::new(1.0, 0.0)],
            obstacle: vec![Point2::new(2.0, 2.0)],
            sum: vec![Point2::new(2.0, 2.0), Point2::new(3.0, 2.0)],
            display: vec![Point2::new(1.0, 1.0), Point2::new(2.0, 1.0)],
            elapsed_ms: 2.0,
        };
        let mut out = Vec::new();
        write_minkowski_csv(&mut out, &[record], 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(MINKOWSKI_CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("1,0,\"(0,0);(1,0)\",\"(2,2)\",\"(2,2);(3,2)\",\"(1,1);(2,1)\",2")
        );
        assert_eq!(lines.next(), None);
    }
}
