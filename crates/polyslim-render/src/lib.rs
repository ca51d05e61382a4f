//! Diagnostic overlay rendering for simplification results.
//!
//! Draws the original path, the simplified path, and the detected
//! corner points on one canvas so a threshold choice can be judged by
//! eye: the original in blue, the simplified result in red on top, and
//! each corner point as a small green circle outline.
//!
//! Two backends share the same layout: [`raster`] produces PNG bytes
//! via `tiny-skia`, [`svg`] produces an SVG document string via the
//! `svg` crate. Both are pure functions with no I/O.

use polyslim_core::{Point, Polyline};
use thiserror::Error;

pub mod raster;
pub mod svg;

pub use raster::render_overlay_png;
pub use svg::to_overlay_svg;

/// Fraction of the canvas the fitted path's bounding box occupies.
const FILL_FRACTION: f64 = 0.8;

/// Errors produced while rendering an overlay.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The original path cannot form a visible line segment.
    #[error("need at least 2 points to render a path, got {0}")]
    TooFewPoints(usize),

    /// A zero canvas dimension was requested.
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested canvas width in pixels.
        width: u32,
        /// Requested canvas height in pixels.
        height: u32,
    },

    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    PngEncode(String),
}

/// Stroke and marker sizing for the overlay, in canvas pixels.
#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    /// Stroke width for both the original and the simplified path.
    pub line_width: f64,
    /// Radius of the corner-point marker circles.
    pub marker_radius: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_width: 3.0,
            marker_radius: 2.0,
        }
    }
}

/// Uniform scale-and-translate that fits a path's bounding box into
/// [`FILL_FRACTION`] of the canvas, centered.
///
/// The transform is computed once from the *original* path and applied
/// to every layer, so the simplified path and the corner markers stay
/// registered with the original regardless of which points they kept.
#[derive(Debug, Clone, Copy)]
pub struct FitTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl FitTransform {
    /// Compute the fit for `path` on a `width` x `height` canvas.
    ///
    /// A path whose bounding box is degenerate on both axes (all points
    /// at one location) gets unit scale and is simply centered.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TooFewPoints`] when `path` has fewer than
    /// two points and [`RenderError::InvalidDimensions`] when either
    /// canvas dimension is zero.
    pub fn fit(path: &Polyline, width: u32, height: u32) -> Result<Self, RenderError> {
        if path.len() < 2 {
            return Err(RenderError::TooFewPoints(path.len()));
        }
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let points = path.points();
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let extent_x = max_x - min_x;
        let extent_y = max_y - min_y;
        let scale_x = if extent_x > 0.0 {
            f64::from(width) * FILL_FRACTION / extent_x
        } else {
            f64::INFINITY
        };
        let scale_y = if extent_y > 0.0 {
            f64::from(height) * FILL_FRACTION / extent_y
        } else {
            f64::INFINITY
        };
        let scale = scale_x.min(scale_y);
        let scale = if scale.is_finite() { scale } else { 1.0 };

        let mid_x = (min_x + max_x) / 2.0;
        let mid_y = (min_y + max_y) / 2.0;
        Ok(Self {
            scale,
            offset_x: mid_x.mul_add(-scale, f64::from(width) / 2.0),
            offset_y: mid_y.mul_add(-scale, f64::from(height) / 2.0),
        })
    }

    /// Map a path coordinate into canvas space.
    #[must_use]
    pub fn apply(&self, p: Point) -> (f64, f64) {
        (
            p.x.mul_add(self.scale, self.offset_x),
            p.y.mul_add(self.scale, self.offset_y),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn polyline(points: &[(f64, f64)]) -> Polyline {
        Polyline::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "got {actual:?}, expected {expected:?}"
        );
    }

    // --- FitTransform ---

    #[test]
    fn square_path_fills_eighty_percent_centered() {
        let path = polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let t = FitTransform::fit(&path, 400, 400).unwrap();

        // Bounding box 10x10 -> scale 320/10 = 32, centered at (200, 200).
        assert_close(t.apply(Point::new(0.0, 0.0)), (40.0, 40.0));
        assert_close(t.apply(Point::new(10.0, 10.0)), (360.0, 360.0));
        assert_close(t.apply(Point::new(5.0, 5.0)), (200.0, 200.0));
    }

    #[test]
    fn wide_path_is_limited_by_width() {
        // 20 wide, 5 tall on a 400x400 canvas: width wins, scale 16.
        let path = polyline(&[(0.0, 0.0), (20.0, 5.0)]);
        let t = FitTransform::fit(&path, 400, 400).unwrap();
        assert_close(t.apply(Point::new(0.0, 0.0)), (40.0, 160.0));
        assert_close(t.apply(Point::new(20.0, 5.0)), (360.0, 240.0));
    }

    #[test]
    fn horizontal_line_scales_by_width_only() {
        // Zero vertical extent must not blow up the scale.
        let path = polyline(&[(0.0, 3.0), (10.0, 3.0)]);
        let t = FitTransform::fit(&path, 400, 200).unwrap();
        assert_close(t.apply(Point::new(0.0, 3.0)), (40.0, 100.0));
        assert_close(t.apply(Point::new(10.0, 3.0)), (360.0, 100.0));
    }

    #[test]
    fn coincident_points_are_centered_at_unit_scale() {
        let path = polyline(&[(7.0, 7.0), (7.0, 7.0)]);
        let t = FitTransform::fit(&path, 100, 100).unwrap();
        assert_close(t.apply(Point::new(7.0, 7.0)), (50.0, 50.0));
    }

    #[test]
    fn too_few_points_is_rejected() {
        let path = polyline(&[(1.0, 1.0)]);
        assert!(matches!(
            FitTransform::fit(&path, 100, 100),
            Err(RenderError::TooFewPoints(1))
        ));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let path = polyline(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            FitTransform::fit(&path, 0, 100),
            Err(RenderError::InvalidDimensions { width: 0, height: 100 })
        ));
    }
}
