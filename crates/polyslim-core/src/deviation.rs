//! Deviation checking: does any point stray too far from a candidate
//! segment?
//!
//! The tolerance region around a segment is a capsule-shaped corridor:
//! a point is adequately approximated when its perpendicular distance
//! to the segment's carrier line is within the threshold AND it does
//! not lie further along the segment's direction than the far endpoint
//! plus the threshold. The second condition bounds how far the path
//! may run on past the segment's end before a new vertex is required.

use std::ops::Range;

use crate::types::{IndexedPoint, Point, Segment};

/// Which point set a deviation check is running against.
///
/// The two modes differ in how an empty index range is interpreted:
/// the coarse corner-point list is sparse, so finding nothing there
/// must not be silently trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Checking against the sparse corner-point list. An empty range
    /// reports the deviation as exceeded, forcing escalation to a
    /// detailed check.
    Coarse,
    /// Checking against the full input point list. An empty range
    /// reports no deviation — there is nothing left to violate.
    Detailed,
}

/// Perpendicular distance from `p` to the carrier line of `segment`.
///
/// Standard cross-product formula: `|cross(to - from, p - from)| / |to - from|`.
/// When the segment has zero length the carrier line is undefined and
/// the distance to `from` is returned instead.
fn point_to_line_distance(p: Point, segment: &Segment) -> f64 {
    let from = segment.from.point;
    let to = segment.to.point;
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length_sq = dx.mul_add(dx, dy * dy);

    if length_sq == 0.0 {
        // from and to coincide.
        return p.distance(from);
    }

    let cross = dx.mul_add(p.y - from.y, -(dy * (p.x - from.x)));
    cross.abs() / length_sq.sqrt()
}

/// Check whether any point of `points` whose original index falls in
/// `range` lies outside the capsule corridor of width `threshold`
/// around `segment`.
///
/// `points` must be sorted by strictly increasing original index; the
/// first candidate is located by binary search so a sparse checkpoint
/// list costs `O(log n + k)` rather than a full scan.
///
/// Returns `true` when the deviation is exceeded. When no point with
/// index at or past `range.start` exists, the answer depends on
/// [`CheckMode`]: `Coarse` escalates (`true`), `Detailed` passes
/// (`false`).
#[must_use]
pub fn exceeds(
    segment: &Segment,
    points: &[IndexedPoint],
    threshold: f64,
    range: Range<usize>,
    mode: CheckMode,
) -> bool {
    let first = points.partition_point(|p| p.index < range.start);
    if first == points.len() {
        return mode == CheckMode::Coarse;
    }

    let from = segment.from.point;
    let length = segment.length();
    for candidate in &points[first..] {
        if candidate.index >= range.end {
            break;
        }
        let p = candidate.point;
        // Past-the-end cap: a point may trail the segment's far
        // endpoint along its direction by at most the threshold.
        if point_to_line_distance(p, segment) > threshold
            || p.distance(from) > length + threshold
        {
            return true;
        }
    }
    false
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn segment(from: (f64, f64), from_index: usize, to: (f64, f64), to_index: usize) -> Segment {
        Segment::new(
            IndexedPoint::new(from.0, from.1, from_index),
            IndexedPoint::new(to.0, to.1, to_index),
        )
    }

    fn indexed(points: &[(f64, f64)]) -> Vec<IndexedPoint> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| IndexedPoint::new(x, y, i))
            .collect()
    }

    // --- point_to_line_distance ---

    #[test]
    fn distance_on_axis() {
        let s = segment((0.0, 0.0), 0, (2.0, 0.0), 1);
        let d = point_to_line_distance(Point::new(1.0, 3.0), &s);
        assert!((d - 3.0).abs() < 1e-10);
    }

    #[test]
    fn distance_to_diagonal_line() {
        // Point (2, -1) vs line (0,0)->(4,2): |4*(-1) - 2*(-2)| / sqrt(20).
        let s = segment((0.0, 0.0), 0, (4.0, 2.0), 1);
        let d = point_to_line_distance(Point::new(2.0, -1.0), &s);
        let expected = 8.0 / 20.0_f64.sqrt();
        assert!((d - expected).abs() < 1e-10, "got {d}, expected {expected}");
    }

    #[test]
    fn zero_length_segment_falls_back_to_point_distance() {
        let s = segment((0.0, 0.0), 0, (0.0, 0.0), 1);
        let d = point_to_line_distance(Point::new(3.0, 4.0), &s);
        assert!((d - 5.0).abs() < 1e-10);
    }

    // --- Capsule corridor ---

    #[test]
    fn point_within_corridor_does_not_exceed() {
        let s = segment((0.0, 0.0), 0, (4.0, 0.0), 3);
        let points = indexed(&[(0.0, 0.0), (1.0, 0.4), (2.0, -0.3), (4.0, 0.0)]);
        assert!(!exceeds(&s, &points, 0.5, 0..3, CheckMode::Detailed));
    }

    #[test]
    fn perpendicular_violation_exceeds() {
        let s = segment((0.0, 0.0), 0, (4.0, 0.0), 3);
        let points = indexed(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.6), (4.0, 0.0)]);
        assert!(exceeds(&s, &points, 0.5, 0..3, CheckMode::Detailed));
    }

    #[test]
    fn point_past_far_endpoint_exceeds() {
        // (3, 0) is collinear with the segment (0,0)->(1,0) but lies
        // 2 units past its far end; with threshold 0.5 the end cap
        // rejects it.
        let s = segment((0.0, 0.0), 0, (1.0, 0.0), 1);
        let points = indexed(&[(0.0, 0.0), (1.0, 0.0), (3.0, 0.0)]);
        assert!(exceeds(&s, &points, 0.5, 0..3, CheckMode::Detailed));
    }

    #[test]
    fn point_just_past_far_endpoint_is_tolerated() {
        let s = segment((0.0, 0.0), 0, (1.0, 0.0), 1);
        let points = indexed(&[(0.0, 0.0), (1.0, 0.0), (1.4, 0.0)]);
        assert!(!exceeds(&s, &points, 0.5, 0..3, CheckMode::Detailed));
    }

    // --- Index range handling ---

    #[test]
    fn points_before_range_start_are_skipped() {
        // Index 1 violates the corridor but lies before the range.
        let s = segment((0.0, 0.0), 0, (4.0, 0.0), 4);
        let points = indexed(&[(0.0, 0.0), (2.0, 3.0), (2.0, 0.1), (3.0, 0.1), (4.0, 0.0)]);
        assert!(!exceeds(&s, &points, 0.5, 2..4, CheckMode::Detailed));
        assert!(exceeds(&s, &points, 0.5, 1..4, CheckMode::Detailed));
    }

    #[test]
    fn points_at_or_past_range_end_are_skipped() {
        let s = segment((0.0, 0.0), 0, (4.0, 0.0), 4);
        let points = indexed(&[(0.0, 0.0), (1.0, 0.1), (2.0, 3.0), (3.0, 0.1), (4.0, 0.0)]);
        assert!(!exceeds(&s, &points, 0.5, 0..2, CheckMode::Detailed));
    }

    #[test]
    fn sparse_list_skips_to_first_index_in_range() {
        // Sparse corner-style list: indices 3 and 9 only.
        let points = vec![IndexedPoint::new(2.0, 0.1, 3), IndexedPoint::new(9.0, 0.1, 9)];
        let s = segment((0.0, 0.0), 0, (10.0, 0.0), 10);
        assert!(!exceeds(&s, &points, 0.5, 0..10, CheckMode::Coarse));
        assert!(!exceeds(&s, &points, 0.5, 5..10, CheckMode::Coarse));
    }

    // --- Empty-range asymmetry ---

    #[test]
    fn coarse_check_with_no_candidate_escalates() {
        // No point has index >= 4: the sparse list cannot be trusted.
        let points = indexed(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let s = segment((0.0, 0.0), 0, (3.0, 0.0), 3);
        assert!(exceeds(&s, &points, 0.5, 4..8, CheckMode::Coarse));
    }

    #[test]
    fn detailed_check_with_no_candidate_passes() {
        let points = indexed(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let s = segment((0.0, 0.0), 0, (3.0, 0.0), 3);
        assert!(!exceeds(&s, &points, 0.5, 4..8, CheckMode::Detailed));
    }
}
