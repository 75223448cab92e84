//! Structured diagnostics for triangulation failures.

use crate::point::Point2;
use std::fmt;
use thiserror::Error;

/// The ear search exhausted its loop bound before consuming the ring.
///
/// Signals a polygon whose ear search did not converge (numerical ties,
/// self-intersecting or otherwise malformed input). Recoverable at ring
/// granularity: the triangles emitted before the bound was hit remain a
/// valid partial cover, and sibling rings are unaffected. There are no
/// retries inside the core; a caller wanting resilience should re-attempt
/// with a non-zero simplification threshold to break ties.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "ear search did not converge: {iterations} iterations for {total_vertices} vertices, \
     {} still live",
    .remaining.len()
)]
pub struct NonConvergence<F: fmt::Debug> {
    /// Outer-loop iterations performed before giving up.
    pub iterations: usize,
    /// Total vertices ever stored in the ring, deleted included.
    pub total_vertices: usize,
    /// Index and position of every vertex still live when the bound was hit.
    pub remaining: Vec<(usize, Point2<F>)>,
}
