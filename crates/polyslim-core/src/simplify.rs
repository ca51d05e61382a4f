//! Path simplification with a guaranteed deviation bound.
//!
//! Grows a candidate segment point by point and checks whether any
//! point covered so far strays outside the threshold corridor. The
//! check normally runs against the sparse corner-point list only; when
//! it trips, the point before the current one becomes the provisional
//! next vertex and is re-verified against every input point. A coarse
//! miss discovered at that stage rewinds the scan and redoes the
//! stretch at full detail, with a monotone watermark bounding how often
//! any region can be re-scanned.
//!
//! This is a heuristic: the output respects the deviation bound but is
//! not guaranteed to have the minimal possible point count. Complexity
//! is amortized near O(n) when the corner heuristic holds, O(n^2) in
//! the worst case.

use crate::corner::filter_corner_points;
use crate::deviation::{self, CheckMode};
use crate::types::{IndexedPoint, Point, Polyline, Segment, SimplifyError};

/// Which point set is authoritative for the current growth check.
///
/// A two-valued strategy rather than a swapped list reference, so the
/// intent of each check is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckSet {
    /// The sparse corner-point list (fast, approximate).
    Corners,
    /// The full input list (exhaustive, exact).
    Full,
}

/// Simplify a polyline, keeping every discarded point within
/// `threshold` of the result.
///
/// Returns an order-preserving subsequence of the input. The first and
/// last points are always retained (for non-empty input), and inputs
/// with fewer than 2 points are returned unchanged.
///
/// # Errors
///
/// Returns [`SimplifyError::NonPositiveThreshold`] when `threshold` is
/// zero, negative, or NaN. The check runs before any computation; on
/// error no partial result is produced.
pub fn simplify(polyline: &Polyline, threshold: f64) -> Result<Polyline, SimplifyError> {
    let points = polyline.points();
    let kept = simplify_indices(points, threshold)?;
    Ok(Polyline::new(kept.into_iter().map(|i| points[i]).collect()))
}

/// Simplify a sequence of items carrying coordinates plus out-of-band
/// payload (timestamps, headings, ...), preserving the payload of every
/// retained item.
///
/// `key` projects each item to its planar coordinates; retained items
/// are cloned from the original slice by index, so the payload survives
/// untouched.
///
/// # Errors
///
/// Returns [`SimplifyError::NonPositiveThreshold`] when `threshold` is
/// zero, negative, or NaN.
pub fn simplify_by_key<T, K>(items: &[T], key: K, threshold: f64) -> Result<Vec<T>, SimplifyError>
where
    T: Clone,
    K: Fn(&T) -> Point,
{
    let points: Vec<Point> = items.iter().map(&key).collect();
    let kept = simplify_indices(&points, threshold)?;
    Ok(kept.into_iter().map(|i| items[i].clone()).collect())
}

/// Core of the simplifier: returns the strictly increasing original
/// indices of the retained points.
///
/// # Errors
///
/// Returns [`SimplifyError::NonPositiveThreshold`] when `threshold` is
/// zero, negative, or NaN.
#[allow(clippy::missing_panics_doc)] // indices produced here are always in bounds
pub fn simplify_indices(points: &[Point], threshold: f64) -> Result<Vec<usize>, SimplifyError> {
    if threshold.is_nan() || threshold <= 0.0 {
        return Err(SimplifyError::NonPositiveThreshold(threshold));
    }

    let input: Vec<IndexedPoint> = points
        .iter()
        .enumerate()
        .map(|(i, p)| IndexedPoint::new(p.x, p.y, i))
        .collect();

    // Nothing to simplify.
    if input.len() < 2 {
        return Ok((0..input.len()).collect());
    }

    let corners = filter_corner_points(&input);
    let mut check_set = CheckSet::Corners;
    let mut output: Vec<IndexedPoint> = vec![input[0]];
    let mut segment = Segment::new(input[0], input[1]);
    // Index of the point scanned right after the last committed vertex.
    let mut segment_index_start = 0_usize;
    // Watermark: the highest index already verified at full detail.
    // Only ever moves forward, which bounds the total rewind work.
    let mut every_point_check_stop = 0_usize;

    let mut i = 2;
    while i < input.len() {
        let point = input[i];
        // Grow the candidate segment to end at the current point.
        segment = Segment::new(segment.from, point);

        if segment.from.point == point.point {
            // Still standing in the same place.
            i += 1;
            continue;
        }
        if i == input.len() - 1 {
            // The tail segment is always checked at full detail.
            check_set = CheckSet::Full;
        }

        let checkpoints = match check_set {
            CheckSet::Corners => corners.as_slice(),
            CheckSet::Full => input.as_slice(),
        };
        let exceeded = deviation::exceeds(
            &segment,
            checkpoints,
            threshold,
            segment_index_start..i,
            CheckMode::Coarse,
        );
        if exceeded {
            // The current point broke the corridor, so the previous
            // point is the provisional next vertex.
            let previous = input[i - 1];
            let shorter = Segment::new(segment.from, previous);
            let coarse_missed = every_point_check_stop < i
                && deviation::exceeds(
                    &shorter,
                    &input,
                    threshold,
                    segment_index_start..i,
                    CheckMode::Detailed,
                );
            if coarse_missed {
                // The corner heuristic let a real violation through.
                // Redo this stretch checking every point, at most once.
                every_point_check_stop = i;
                i = segment_index_start;
                check_set = CheckSet::Full;
            } else {
                // The shorter segment holds: commit the vertex and
                // start a fresh segment from it.
                output.push(previous);
                segment = Segment::new(previous, point);
                segment_index_start = i;
                every_point_check_stop = every_point_check_stop.max(i);
                if every_point_check_stop == i {
                    // Past the re-checked region: corners suffice again.
                    check_set = CheckSet::Corners;
                }
            }
        }
        i += 1;
    }

    if let (Some(last_out), Some(last_in)) = (output.last(), input.last()) {
        if last_out.point != last_in.point {
            output.push(*last_in);
        }
    }
    Ok(output.into_iter().map(|p| p.index).collect())
}
