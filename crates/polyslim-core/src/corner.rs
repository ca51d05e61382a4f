//! Corner-point filtering: local turning-angle maxima extraction.
//!
//! Scans a path once and extracts a sparse subsequence of "interesting"
//! vertices — points where the path turns the most within a contiguous
//! run of same-signed turning. The simplifier uses this list as a cheap
//! coarse checkpoint set, falling back to the full point list only when
//! the corners alone cannot settle a deviation question.
//!
//! The output is strictly increasing by original index, contains no
//! duplicates, and always ends with the last input point so downstream
//! checks have a tail anchor.

use std::f64::consts::PI;

use crate::types::{IndexedPoint, Point, Polyline};

/// Turning-angle changes smaller than this are treated as "walking
/// straight" (2 degrees, in radians).
const ANGLE_SMOOTHING: f64 = 2.0 * (PI / 180.0);

/// The current best corner candidate within a run of same-signed,
/// non-negligible turning angles.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    /// Index into the input slice (not the original path index).
    position: usize,
    /// Signed turning angle at that point, in radians.
    angle: f64,
}

/// Signed turning angle between two direction vectors, in radians.
///
/// Positive means the second vector turns counter-clockwise (left)
/// relative to the first. Computed as `atan2(cross, dot)`, yielding a
/// value in `(-PI, PI]`.
fn turn_angle(a: Point, b: Point) -> f64 {
    let cross = a.x.mul_add(b.y, -(a.y * b.x));
    let dot = a.x.mul_add(b.x, a.y * b.y);
    cross.atan2(dot)
}

/// Sign of an angle: -1, 0, or 1.
///
/// Zero maps to 0 so that a degenerate (exactly straight) step never
/// counts as agreeing with either turning direction.
fn sign(angle: f64) -> i8 {
    if angle > 0.0 {
        1
    } else if angle < 0.0 {
        -1
    } else {
        0
    }
}

/// Extract the corner points of `input`: local turning-angle maxima.
///
/// For each interior triple the signed turning angle between the
/// incoming and outgoing direction is computed. A running best
/// candidate is kept over each contiguous run of same-signed,
/// non-negligible angles; only a strictly larger magnitude replaces
/// it, so when several points in a row share the same angle the first
/// one wins. A run's candidate is emitted when the turning sign flips,
/// the magnitude drops by more than the smoothing tolerance, or the
/// path straightens out. The first point after a sharp turn settles
/// into a straight stretch is emitted as well, marking where the
/// straightness begins.
///
/// The last input point is always appended as the final corner point
/// unless it was already emitted, so the result is never missing its
/// tail anchor. Output indices are strictly increasing with no
/// duplicates.
#[must_use]
pub fn filter_corner_points(input: &[IndexedPoint]) -> Vec<IndexedPoint> {
    let mut corners: Vec<IndexedPoint> = Vec::new();
    let mut previous_angle: Option<f64> = None;
    let mut candidate: Option<Candidate> = None;

    for i in 2..input.len() {
        let first = input[i - 2].point;
        let middle = input[i - 1].point;
        let last = input[i].point;
        let incoming = Point::new(middle.x - first.x, middle.y - first.y);
        let outgoing = Point::new(last.x - middle.x, last.y - middle.y);
        let angle = turn_angle(incoming, outgoing);

        if angle.abs() < ANGLE_SMOOTHING {
            // Walking straight: the current run (if any) is over.
            if let Some(c) = candidate.take() {
                corners.push(input[c.position]);
            }
            if previous_angle.is_some_and(|prev| prev.abs() > ANGLE_SMOOTHING) {
                // First point of a straight stretch after a sharp turn.
                corners.push(input[i]);
            }
        } else {
            if let (Some(c), Some(prev)) = (candidate, previous_angle) {
                if prev.abs() > angle.abs() + ANGLE_SMOOTHING || sign(prev) != sign(angle) {
                    // Magnitude dropped or turning direction flipped:
                    // emit the run's maximal-angle point.
                    corners.push(input[c.position]);
                    candidate = None;
                }
            }
            let replaces_candidate = candidate
                .is_some_and(|c| c.angle.abs() < angle.abs() && sign(c.angle) == sign(angle));
            let starts_run = previous_angle
                .is_none_or(|prev| prev.abs() < angle.abs() || sign(prev) != sign(angle));
            if replaces_candidate || starts_run {
                candidate = Some(Candidate {
                    position: i - 1,
                    angle,
                });
            }
        }
        previous_angle = Some(angle);
    }

    if let Some(c) = candidate {
        corners.push(input[c.position]);
    }

    // Guarantee the tail anchor.
    if let Some(last) = input.last() {
        if corners.last().is_none_or(|c| c.point != last.point) {
            corners.push(*last);
        }
    }

    corners
}

/// Attach indices to a polyline's points and extract its corner points.
///
/// Convenience wrapper around [`filter_corner_points`] for callers that
/// hold a plain [`Polyline`] (e.g. diagnostic overlays).
#[must_use]
pub fn corner_points(polyline: &Polyline) -> Vec<IndexedPoint> {
    let indexed: Vec<IndexedPoint> = polyline
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| IndexedPoint::new(p.x, p.y, i))
        .collect();
    filter_corner_points(&indexed)
}
