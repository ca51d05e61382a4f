//! polyslim-core: bounded-error polyline simplification (sans-IO).
//!
//! Reduces the point count of an ordered 2D path while guaranteeing
//! that every discarded point stays within a caller-chosen distance
//! threshold of the simplified path. Built for dense point sequences
//! that must be stored or transmitted compactly — GPS tracks, pen and
//! touch strokes, sensor traces.
//!
//! The simplifier works in three stages:
//! corner-point pre-filtering -> segment growing with coarse deviation
//! checks -> detailed verification with bounded backtracking.
//!
//! This crate has **no I/O dependencies** — it operates on in-memory
//! point sequences and returns structured data. It holds no state
//! between calls, so concurrent invocations on independent inputs need
//! no coordination. Rendering and the demo CLI live in
//! `polyslim-render` and `polyslim`.

pub mod corner;
pub mod deviation;
pub mod simplify;
pub mod types;

pub use corner::{corner_points, filter_corner_points};
pub use simplify::{simplify, simplify_by_key, simplify_indices};
pub use types::{IndexedPoint, Point, Polyline, Segment, SimplifyError};
