//! PNG overlay rendering via `tiny-skia`.
//!
//! Layers, bottom to top: white background, original path in blue,
//! simplified path in red, corner-point markers as green circle
//! outlines. All layers share the fit transform computed from the
//! original path.

use polyslim_core::{IndexedPoint, Polyline};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::{FitTransform, OverlayStyle, RenderError};

/// Build a tiny-skia path from a polyline, mapped through `fit`.
///
/// Returns `None` for polylines with fewer than 2 points.
#[allow(clippy::cast_possible_truncation)]
fn build_path(polyline: &Polyline, fit: &FitTransform) -> Option<tiny_skia::Path> {
    let points = polyline.points();
    if points.len() < 2 {
        return None;
    }

    let mut pb = PathBuilder::new();
    let (x, y) = fit.apply(points[0]);
    pb.move_to(x as f32, y as f32);
    for p in &points[1..] {
        let (x, y) = fit.apply(*p);
        pb.line_to(x as f32, y as f32);
    }
    pb.finish()
}

#[allow(clippy::cast_possible_truncation)]
fn stroke_polyline(
    pixmap: &mut Pixmap,
    polyline: &Polyline,
    fit: &FitTransform,
    rgb: (u8, u8, u8),
    width: f64,
) {
    let Some(path) = build_path(polyline, fit) else {
        return;
    };

    let stroke = Stroke {
        width: width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgb.0, rgb.1, rgb.2, 255);
    paint.anti_alias = true;

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

#[allow(clippy::cast_possible_truncation)]
fn stroke_markers(
    pixmap: &mut Pixmap,
    corners: &[IndexedPoint],
    fit: &FitTransform,
    radius: f64,
) {
    let mut pb = PathBuilder::new();
    for corner in corners {
        let (x, y) = fit.apply(corner.point);
        pb.push_circle(x as f32, y as f32, radius as f32);
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let stroke = Stroke {
        width: 1.0,
        ..Stroke::default()
    };
    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 128, 0, 255);
    paint.anti_alias = true;

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Render the overlay and return encoded PNG bytes.
///
/// The fit transform is computed from `original`, so `simplified` and
/// `corners` land exactly on top of the points they were taken from.
///
/// # Errors
///
/// Returns [`RenderError::TooFewPoints`] when `original` has fewer than
/// two points, [`RenderError::InvalidDimensions`] for a zero canvas
/// dimension, and [`RenderError::PngEncode`] when encoding fails.
pub fn render_overlay_png(
    original: &Polyline,
    simplified: &Polyline,
    corners: &[IndexedPoint],
    width: u32,
    height: u32,
    style: &OverlayStyle,
) -> Result<Vec<u8>, RenderError> {
    let fit = FitTransform::fit(original, width, height)?;

    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return Err(RenderError::InvalidDimensions { width, height });
    };
    pixmap.fill(tiny_skia::Color::WHITE);

    stroke_polyline(&mut pixmap, original, &fit, (0, 0, 255), style.line_width);
    stroke_polyline(&mut pixmap, simplified, &fit, (255, 0, 0), style.line_width);
    stroke_markers(&mut pixmap, corners, &fit, style.marker_radius);

    pixmap
        .encode_png()
        .map_err(|e| RenderError::PngEncode(e.to_string()))
}
