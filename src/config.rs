//! Engine configuration: working canvas and tolerances.
//!
//! The triangulator centres its super-triangle on the working canvas, and
//! both the triangulator and the Voronoi builder filter degeneracies with
//! the epsilons held here. Defaults reproduce an 800 x 800 interactive
//! canvas.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeomError, Result};
use crate::primitives::Point2;
use num_traits::Float;

/// Axis-aligned working region that input points are expected to lie in.
///
/// Points outside the canvas are still accepted everywhere; the triangulator
/// centres its super-triangle on the canvas and those points together.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas<F> {
    pub min_x: F,
    pub min_y: F,
    pub max_x: F,
    pub max_y: F,
}

impl<F: Float> Canvas<F> {
    /// Creates a canvas from its corners.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `min < max` on both axes and all
    /// coordinates are finite.
    pub fn new(min: Point2<F>, max: Point2<F>) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GeomError::InvalidConfig(
                "canvas corners must be finite".to_string(),
            ));
        }
        if !(min.x < max.x && min.y < max.y) {
            return Err(GeomError::InvalidConfig(
                "canvas must have positive width and height".to_string(),
            ));
        }
        Ok(Self {
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
        })
    }

    /// A square canvas `[0, side] x [0, side]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `side` is not positive.
    pub fn square(side: F) -> Result<Self> {
        Self::new(Point2::origin(), Point2::new(side, side))
    }

    #[inline]
    pub fn min(&self) -> Point2<F> {
        Point2::new(self.min_x, self.min_y)
    }

    #[inline]
    pub fn max(&self) -> Point2<F> {
        Point2::new(self.max_x, self.max_y)
    }

    #[inline]
    pub fn width(&self) -> F {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> F {
        self.max_y - self.min_y
    }

    /// Returns true if `p` lies inside or on the canvas border.
    #[inline]
    pub fn contains(&self, p: Point2<F>) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Shrinks the canvas by `margin` on every side.
    ///
    /// Returns `None` if nothing would be left.
    pub fn inset(&self, margin: F) -> Option<Self> {
        let min = Point2::new(self.min_x + margin, self.min_y + margin);
        let max = Point2::new(self.max_x - margin, self.max_y - margin);
        Self::new(min, max).ok()
    }
}

impl<F: Float> Default for Canvas<F> {
    fn default() -> Self {
        let side = F::from(800.0).unwrap();
        Self {
            min_x: F::zero(),
            min_y: F::zero(),
            max_x: side,
            max_y: side,
        }
    }
}

/// Tolerances and canvas shared by the triangulator and Voronoi builder.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig<F> {
    /// Working region; its centre anchors the super-triangle.
    pub canvas: Canvas<F>,

    /// Triangles whose doubled signed area is at most this are dropped from
    /// a finished triangulation.
    pub collinear_eps: F,

    /// A circumcenter is undefined when the determinant's magnitude is
    /// below this.
    pub circumcenter_eps: F,

    /// Circumcenters closer than this on both axes are merged per cell.
    pub vertex_merge_eps: F,
}

impl<F: Float> Default for EngineConfig<F> {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            collinear_eps: F::from(1e-9).unwrap(),
            circumcenter_eps: F::from(1e-6).unwrap(),
            vertex_merge_eps: F::from(1e-4).unwrap(),
        }
    }
}

impl<F: Float> EngineConfig<F> {
    /// Default tolerances on a custom canvas.
    pub fn with_canvas(canvas: Canvas<F>) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }
}

/// Builder for [`EngineConfig`] with validation.
///
/// # Example
///
/// ```
/// use planegeom::config::{Canvas, EngineConfigBuilder};
///
/// let config = EngineConfigBuilder::<f64>::new()
///     .canvas(Canvas::square(100.0).unwrap())
///     .vertex_merge_eps(1e-6)
///     .unwrap()
///     .build();
///
/// assert_eq!(config.canvas.width(), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder<F> {
    config: EngineConfig<F>,
}

impl<F: Float> EngineConfigBuilder<F> {
    /// Starts from [`EngineConfig::default`].
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn canvas(mut self, canvas: Canvas<F>) -> Self {
        self.config.canvas = canvas;
        self
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if `eps` is negative or not finite.
    pub fn collinear_eps(mut self, eps: F) -> Result<Self> {
        self.config.collinear_eps = check_eps("collinear_eps", eps)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if `eps` is negative or not finite.
    pub fn circumcenter_eps(mut self, eps: F) -> Result<Self> {
        self.config.circumcenter_eps = check_eps("circumcenter_eps", eps)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if `eps` is negative or not finite.
    pub fn vertex_merge_eps(mut self, eps: F) -> Result<Self> {
        self.config.vertex_merge_eps = check_eps("vertex_merge_eps", eps)?;
        Ok(self)
    }

    pub fn build(self) -> EngineConfig<F> {
        self.config
    }
}

impl<F: Float> Default for EngineConfigBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_eps<F: Float>(name: &str, eps: F) -> Result<F> {
    if eps >= F::zero() && eps.is_finite() {
        Ok(eps)
    } else {
        Err(GeomError::InvalidConfig(format!(
            "{} must be finite and >= 0 (got {})",
            name,
            eps.to_f64().unwrap_or(f64::NAN)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_canvas_is_800_square() {
        let canvas: Canvas<f64> = Canvas::default();
        assert_eq!(canvas.min(), Point2::new(0.0, 0.0));
        assert_eq!(canvas.max(), Point2::new(800.0, 800.0));
        assert!(canvas.contains(Point2::new(400.0, 800.0)));
        assert!(!canvas.contains(Point2::new(-1.0, 10.0)));
    }

    #[test]
    fn test_canvas_rejects_empty_extent() {
        assert!(Canvas::new(Point2::new(0.0_f64, 0.0), Point2::new(0.0, 5.0)).is_err());
        assert!(Canvas::square(-1.0_f64).is_err());
        assert!(Canvas::new(Point2::new(f64::NAN, 0.0), Point2::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn test_canvas_inset() {
        let canvas: Canvas<f64> = Canvas::default();
        let inner = canvas.inset(50.0).unwrap();
        assert_eq!(inner.min(), Point2::new(50.0, 50.0));
        assert_eq!(inner.max(), Point2::new(750.0, 750.0));
        assert!(canvas.inset(400.0).is_none());
    }

    #[test]
    fn test_builder_defaults() {
        let config = EngineConfigBuilder::<f64>::new().build();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.collinear_eps, 1e-9);
        assert_eq!(config.vertex_merge_eps, 1e-4);
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(EngineConfigBuilder::<f64>::new()
            .vertex_merge_eps(f64::INFINITY)
            .is_err());
        assert!(EngineConfigBuilder::<f64>::new()
            .circumcenter_eps(-1e-3)
            .is_err());
        assert!(EngineConfigBuilder::<f64>::new()
            .collinear_eps(f64::NAN)
            .is_err());
    }

    #[test]
    fn test_builder_custom() {
        let config = EngineConfigBuilder::<f64>::new()
            .canvas(Canvas::square(10.0).unwrap())
            .circumcenter_eps(1e-9)
            .unwrap()
            .build();
        assert_eq!(config.canvas.width(), 10.0);
        assert_eq!(config.circumcenter_eps, 1e-9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config: EngineConfig<f64> = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: EngineConfig<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
