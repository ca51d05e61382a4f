//! Shared value types for the polyslim simplification core.

use serde::{Deserialize, Serialize};

/// A 2D point in a planar Cartesian coordinate system.
///
/// Not suitable for geodetic (latitude/longitude) coordinates: on a
/// sphere the same longitude difference spans a shorter distance the
/// closer to the poles, so Euclidean distances computed here would be
/// wrong. Project such data into a planar system first.
///
/// Coordinates are expected to be finite. NaN or infinite values are a
/// precondition violation and leave the simplifier's behavior
/// undefined; validating them is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// A point tagged with its zero-based position in the original input
/// sequence.
///
/// Indices are unique and strictly increasing in traversal order. For
/// output-matching purposes the identity of an `IndexedPoint` is its
/// index, not its coordinates: duplicate coordinates at different
/// indices are distinct entities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexedPoint {
    /// The point's coordinates.
    pub point: Point,
    /// Zero-based position in the original input sequence.
    pub index: usize,
}

impl IndexedPoint {
    /// Create a new indexed point.
    #[must_use]
    pub const fn new(x: f64, y: f64, index: usize) -> Self {
        Self {
            point: Point::new(x, y),
            index,
        }
    }
}

/// A directed candidate edge from `from` to `to`.
///
/// Represents the simplified edge currently being grown and tested by
/// the approximator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start of the edge (the last committed vertex).
    pub from: IndexedPoint,
    /// End of the edge (the point under test).
    pub to: IndexedPoint,
}

impl Segment {
    /// Create a new segment.
    #[must_use]
    pub const fn new(from: IndexedPoint, to: IndexedPoint) -> Self {
        Self { from, to }
    }

    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.from.point.distance(self.to.point)
    }
}

/// A sequence of connected points forming a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Errors that can occur during simplification.
///
/// An absent input path has no representation here: a `&Polyline` or
/// `&[Point]` cannot be null, so that precondition is enforced by the
/// type system before any call is possible.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SimplifyError {
    /// The deviation threshold must be strictly positive.
    ///
    /// Also raised for NaN thresholds, which satisfy neither
    /// `threshold > 0` nor `threshold <= 0`.
    #[error("threshold must be strictly positive, got {0}")]
    NonPositiveThreshold(f64),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_new() {
        let p = Point::new(3.0, 4.0);
        assert!((p.x - 3.0).abs() < f64::EPSILON);
        assert!((p.y - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
        assert!((a.distance_squared(b) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance_to_self_is_zero() {
        let p = Point::new(7.0, 11.0);
        assert!(p.distance(p).abs() < f64::EPSILON);
    }

    // --- IndexedPoint tests ---

    #[test]
    fn indexed_point_carries_index() {
        let p = IndexedPoint::new(1.0, 2.0, 5);
        assert_eq!(p.index, 5);
        assert_eq!(p.point, Point::new(1.0, 2.0));
    }

    #[test]
    fn indexed_points_with_equal_coordinates_differ_by_index() {
        let a = IndexedPoint::new(1.0, 1.0, 0);
        let b = IndexedPoint::new(1.0, 1.0, 1);
        assert_ne!(a, b);
        assert_eq!(a.point, b.point);
    }

    // --- Segment tests ---

    #[test]
    fn segment_length() {
        let s = Segment::new(IndexedPoint::new(0.0, 0.0, 0), IndexedPoint::new(3.0, 4.0, 1));
        assert!((s.length() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_length_segment() {
        let s = Segment::new(IndexedPoint::new(2.0, 2.0, 0), IndexedPoint::new(2.0, 2.0, 3));
        assert!(s.length().abs() < f64::EPSILON);
    }

    // --- Polyline tests ---

    #[test]
    fn polyline_empty() {
        let pl = Polyline::new(vec![]);
        assert!(pl.is_empty());
        assert_eq!(pl.len(), 0);
        assert!(pl.first().is_none());
        assert!(pl.last().is_none());
    }

    #[test]
    fn polyline_first_and_last() {
        let pl = Polyline::new(vec![
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(5.0, 6.0),
        ]);
        assert_eq!(pl.first(), Some(&Point::new(1.0, 2.0)));
        assert_eq!(pl.last(), Some(&Point::new(5.0, 6.0)));
    }

    #[test]
    fn polyline_into_points_returns_owned_vec() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let pl = Polyline::new(points.clone());
        assert_eq!(pl.into_points(), points);
    }

    // --- Error tests ---

    #[test]
    fn non_positive_threshold_display() {
        let err = SimplifyError::NonPositiveThreshold(-1.5);
        assert_eq!(err.to_string(), "threshold must be strictly positive, got -1.5");
    }

    // --- Serde round-trip tests ---

    #[test]
    fn point_serde_round_trip() {
        let p = Point::new(3.14, -2.71);
        let json = serde_json::to_string(&p).unwrap();
        let deserialized: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deserialized);
    }

    #[test]
    fn polyline_serde_round_trip() {
        let pl = Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.5, 2.5),
            Point::new(3.0, 0.0),
        ]);
        let json = serde_json::to_string(&pl).unwrap();
        let deserialized: Polyline = serde_json::from_str(&json).unwrap();
        assert_eq!(pl, deserialized);
    }

    #[test]
    fn indexed_point_serde_round_trip() {
        let p = IndexedPoint::new(1.0, -2.0, 7);
        let json = serde_json::to_string(&p).unwrap();
        let deserialized: IndexedPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deserialized);
    }
}
