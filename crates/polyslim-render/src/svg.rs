//! SVG overlay serializer.
//!
//! Produces the same three-layer overlay as [`crate::raster`] but as an
//! SVG document string: one `<path>` per polyline, one `<circle>` per
//! corner marker. Uses the [`svg`] crate for document construction and
//! path data formatting.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use polyslim_core::{IndexedPoint, Polyline};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Path, Rectangle};
use svg::node::Value;

use crate::{FitTransform, OverlayStyle, RenderError};

/// Build an SVG path `d` attribute string from a polyline, mapped
/// through `fit`.
///
/// Returns an empty string for polylines with fewer than 2 points.
#[must_use]
fn build_path_data(polyline: &Polyline, fit: &FitTransform) -> String {
    let points = polyline.points();
    if points.len() < 2 {
        return String::new();
    }

    let mut data = Data::new().move_to(fit.apply(points[0]));
    for p in &points[1..] {
        data = data.line_to(fit.apply(*p));
    }
    String::from(Value::from(data))
}

/// Serialize the overlay into an SVG document string.
///
/// Same layer order and colors as the PNG backend: white background,
/// original in blue, simplified in red, corner markers as green circle
/// outlines.
///
/// # Errors
///
/// Returns [`RenderError::TooFewPoints`] when `original` has fewer than
/// two points and [`RenderError::InvalidDimensions`] for a zero canvas
/// dimension.
pub fn to_overlay_svg(
    original: &Polyline,
    simplified: &Polyline,
    corners: &[IndexedPoint],
    width: u32,
    height: u32,
    style: &OverlayStyle,
) -> Result<String, RenderError> {
    let fit = FitTransform::fit(original, width, height)?;

    let mut doc = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, width, height));

    doc = doc.add(
        Rectangle::new()
            .set("width", width)
            .set("height", height)
            .set("fill", "white"),
    );

    for (polyline, stroke) in [(original, "blue"), (simplified, "red")] {
        let d = build_path_data(polyline, &fit);
        if d.is_empty() {
            continue;
        }
        doc = doc.add(
            Path::new()
                .set("d", d)
                .set("fill", "none")
                .set("stroke", stroke)
                .set("stroke-width", style.line_width),
        );
    }

    for corner in corners {
        let (cx, cy) = fit.apply(corner.point);
        doc = doc.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", style.marker_radius)
                .set("fill", "none")
                .set("stroke", "green"),
        );
    }

    // The svg crate omits the XML declaration, so we prepend it.
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n"))
}
