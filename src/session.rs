//! Measurement sessions around the geometry algorithms.
//!
//! A [`Session`] is an explicit context that times operations and keeps the
//! resulting [`TimingRecord`]s; nothing here is global. [`DelaunaySession`]
//! models the interactive workflow of adding one site at a time, rebuilding
//! the whole triangulation after each insertion. [`measure_minkowski`] times
//! one subject polygon against a set of obstacles.
//!
//! Events are emitted through `tracing`; install a subscriber to see them.
//!
//! # Example
//!
//! ```
//! use planegeom::config::EngineConfig;
//! use planegeom::session::DelaunaySession;
//! use planegeom::Point2;
//!
//! let mut session = DelaunaySession::new(EngineConfig::<f64>::default());
//! session.insert(Point2::new(100.0, 100.0));
//! session.insert(Point2::new(300.0, 100.0));
//! let tri = session.insert(Point2::new(200.0, 250.0));
//! assert_eq!(tri.len(), 1);
//!
//! // One rebuild timed per insertion.
//! let counts: Vec<usize> = session.timing().records().iter().map(|r| r.num_points).collect();
//! assert_eq!(counts, vec![1, 2, 3]);
//! ```

use std::io::{self, Write};
use std::time::Instant;

use crate::config::EngineConfig;
use crate::hull::convex_hull;
use crate::io::{write_timing_csv, MinkowskiRecord, TimingRecord};
use crate::polygon::{display_offset, minkowski_sum, ConvexPolygon};
use crate::primitives::Point2;
use crate::triangulation::{voronoi_cells, Triangulation, VoronoiDiagram};
use num_traits::Float;

/// Named timing log.
#[derive(Debug, Clone, Default)]
pub struct Session {
    label: String,
    records: Vec<TimingRecord>,
}

impl Session {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            records: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs `op`, recording its wall time against `num_points`.
    pub fn time<T>(&mut self, num_points: usize, op: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = op();
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        tracing::debug!(session = %self.label, num_points, elapsed_ms, "timed");
        self.records.push(TimingRecord {
            num_points,
            elapsed_ms,
        });
        result
    }

    pub fn records(&self) -> &[TimingRecord] {
        &self.records
    }

    /// Sum of all recorded times in milliseconds.
    pub fn total_ms(&self) -> f64 {
        self.records.iter().map(|r| r.elapsed_ms).sum()
    }

    /// Mean recorded time, or `None` before the first measurement.
    pub fn mean_ms(&self) -> Option<f64> {
        if self.records.is_empty() {
            None
        } else {
            Some(self.total_ms() / self.records.len() as f64)
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Writes the records as a `num_points,elapsed_ms` CSV.
    pub fn write_csv<W: Write>(&self, out: W) -> io::Result<()> {
        write_timing_csv(out, &self.records)
    }
}

/// Sites added one at a time, with a full Delaunay rebuild after each.
#[derive(Debug, Clone)]
pub struct DelaunaySession<F> {
    config: EngineConfig<F>,
    sites: Vec<Point2<F>>,
    triangulation: Triangulation<F>,
    timing: Session,
}

impl<F: Float> DelaunaySession<F> {
    pub fn new(config: EngineConfig<F>) -> Self {
        Self {
            config,
            sites: Vec::new(),
            triangulation: Triangulation::build(&[], &config),
            timing: Session::new("delaunay"),
        }
    }

    /// Adds a site and rebuilds the triangulation from scratch.
    pub fn insert(&mut self, site: Point2<F>) -> &Triangulation<F> {
        self.sites.push(site);
        let sites = &self.sites;
        let config = &self.config;
        self.triangulation = self
            .timing
            .time(sites.len(), || Triangulation::build(sites, config));

        tracing::trace!(
            sites = self.sites.len(),
            triangles = self.triangulation.len(),
            "rebuilt"
        );
        &self.triangulation
    }

    /// Inserts every site in order, rebuilding after each one.
    pub fn extend<I: IntoIterator<Item = Point2<F>>>(&mut self, sites: I) -> &Triangulation<F> {
        for site in sites {
            self.insert(site);
        }
        &self.triangulation
    }

    pub fn sites(&self) -> &[Point2<F>] {
        &self.sites
    }

    pub fn triangulation(&self) -> &Triangulation<F> {
        &self.triangulation
    }

    pub fn config(&self) -> &EngineConfig<F> {
        &self.config
    }

    /// Voronoi cells of the current triangulation.
    pub fn voronoi(&self) -> VoronoiDiagram<F> {
        voronoi_cells(&self.triangulation, &self.config)
    }

    /// Convex hull of the current sites.
    pub fn hull(&self) -> Vec<Point2<F>> {
        convex_hull(&self.sites)
    }

    pub fn timing(&self) -> &Session {
        &self.timing
    }

    /// Removes all sites; the timing log is kept.
    pub fn clear(&mut self) {
        self.sites.clear();
        self.triangulation = Triangulation::build(&[], &self.config);
    }
}

/// Sums `subject` with every obstacle, timing each sum.
///
/// Obstacle `subject_index` is skipped, so the subject may sit in the same
/// list as the obstacles. Each timing is logged against the number of
/// pairwise vertex sums, `|subject| * |obstacle|`. Records keep the raw sum
/// and, separately, the sum moved onto its obstacle's vertex centroid for
/// drawing.
pub fn measure_minkowski<F: Float>(
    session: &mut Session,
    subject_index: usize,
    subject: &ConvexPolygon<F>,
    obstacles: &[ConvexPolygon<F>],
) -> Vec<MinkowskiRecord<F>> {
    let mut records = Vec::with_capacity(obstacles.len());
    for (obstacle_index, obstacle) in obstacles.iter().enumerate() {
        if obstacle_index == subject_index {
            continue;
        }

        let pairs = subject.len() * obstacle.len();
        let sum = session.time(pairs, || {
            minkowski_sum(&subject.vertices, &obstacle.vertices)
        });
        let elapsed_ms = session.records().last().map_or(0.0, |r| r.elapsed_ms);

        let sum = ConvexPolygon::new(sum);
        let display = sum.translated(display_offset(&sum, obstacle));

        tracing::debug!(
            subject_index,
            obstacle_index,
            pairs,
            sum_vertices = sum.len(),
            elapsed_ms,
            "minkowski"
        );
        records.push(MinkowskiRecord {
            subject_index,
            obstacle_index,
            subject: subject.vertices.clone(),
            obstacle: obstacle.vertices.clone(),
            sum: sum.vertices,
            display: display.vertices,
            elapsed_ms,
        });
    }
    records
}
