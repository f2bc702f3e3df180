//! Seeded random point generation on a canvas.
//!
//! Stands in for an interactive user: uniformly placed sites for the
//! triangulator and random convex polygons for Minkowski experiments. The
//! generator is a seeded [`ChaCha8Rng`], so every run is reproducible.
//!
//! # Example
//!
//! ```
//! use planegeom::config::Canvas;
//! use planegeom::sampling::sample_canvas_points;
//!
//! // Same sampling region as the interactive canvas: [50, 750]².
//! let points = sample_canvas_points::<f64>(&Canvas::default(), 50.0, 100, 7);
//! assert_eq!(points.len(), 100);
//! assert!(points.iter().all(|p| p.x >= 50.0 && p.x < 750.0));
//! assert_eq!(points, sample_canvas_points(&Canvas::default(), 50.0, 100, 7));
//! ```

use crate::config::Canvas;
use crate::polygon::ConvexPolygon;
use crate::primitives::Point2;
use num_traits::Float;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reproducible point source over a rectangular region.
#[derive(Debug, Clone)]
pub struct PointSampler<F> {
    region: Canvas<F>,
    rng: ChaCha8Rng,
}

impl<F: Float> PointSampler<F> {
    /// Samples from `canvas` shrunk by `inset` on every side.
    ///
    /// Falls back to the whole canvas when the inset leaves nothing.
    pub fn new(canvas: &Canvas<F>, inset: F, seed: u64) -> Self {
        Self {
            region: canvas.inset(inset).unwrap_or(*canvas),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The region points are drawn from.
    pub fn region(&self) -> &Canvas<F> {
        &self.region
    }

    /// Draws one point uniformly from the region.
    pub fn next_point(&mut self) -> Point2<F> {
        let lo = self.region.min();
        let hi = self.region.max();
        Point2::new(self.uniform(lo.x, hi.x), self.uniform(lo.y, hi.y))
    }

    /// Draws `count` points.
    pub fn points(&mut self, count: usize) -> Vec<Point2<F>> {
        (0..count).map(|_| self.next_point()).collect()
    }

    /// Hull of `samples` points drawn from a square of half-size `radius`
    /// around a random centre in the region.
    ///
    /// The square is clamped to the region, so every vertex lies inside it.
    /// The result has at most `samples` vertices and may have fewer than 3
    /// when `samples < 3`.
    pub fn convex_polygon(&mut self, radius: F, samples: usize) -> ConvexPolygon<F> {
        let center = self.next_point();
        let lo = self.region.min();
        let hi = self.region.max();
        let min = Point2::new((center.x - radius).max(lo.x), (center.y - radius).max(lo.y));
        let max = Point2::new((center.x + radius).min(hi.x), (center.y + radius).min(hi.y));

        let points: Vec<Point2<F>> = (0..samples)
            .map(|_| Point2::new(self.uniform(min.x, max.x), self.uniform(min.y, max.y)))
            .collect();
        ConvexPolygon::hull_of(&points)
    }

    fn uniform(&mut self, lo: F, hi: F) -> F {
        let lo64 = lo.to_f64().unwrap_or(0.0);
        let hi64 = hi.to_f64().unwrap_or(0.0);
        if !(lo64 < hi64) {
            return lo;
        }
        F::from(self.rng.gen_range(lo64..hi64)).unwrap_or(lo)
    }
}

/// Draws `count` uniform points from `canvas` shrunk by `inset`.
pub fn sample_canvas_points<F: Float>(
    canvas: &Canvas<F>,
    inset: F,
    count: usize,
    seed: u64,
) -> Vec<Point2<F>> {
    PointSampler::new(canvas, inset, seed).points(count)
}
