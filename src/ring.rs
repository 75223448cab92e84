//! Mutable vertex ring with logical deletion.
//!
//! A [`Ring`] holds one closed polygon boundary as a flat vector of vertices.
//! Triangulation never removes storage; it marks vertices deleted and keeps a
//! live-count, so the coordinates of clipped vertices remain visible to the
//! containment scan for the rest of the run. The ring's rotation primitive
//! ([`Ring::move_to_back`]) physically shifts storage, which keeps relative
//! vertex order stable for the geometric tests.
//!
//! A ring is built once by repeated [`Ring::push_back`], canonicalized with
//! [`Ring::set_clockwise`] / [`Ring::set_to_leftmost`], then destructively
//! consumed by the driver. On success it ends fully deleted;
//! [`Ring::undelete_all`] exists only to reset it for reuse or tests.

use crate::point::Point2;
use num_traits::Float;

/// A ring vertex: a coordinate plus a logical-deletion flag.
///
/// Vertices never move in storage once created except as whole-ring
/// rotations; their only state transition during a triangulation run is
/// live → deleted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex<F> {
    point: Point2<F>,
    deleted: bool,
}

impl<F: Float> Vertex<F> {
    #[inline]
    fn new(point: Point2<F>) -> Self {
        Self {
            point,
            deleted: false,
        }
    }

    /// The vertex coordinate.
    #[inline]
    pub fn point(&self) -> Point2<F> {
        self.point
    }

    /// True if the vertex has been logically removed.
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

/// An ordered ring of vertices with a traversal cursor and live-count.
///
/// Invariant: `live_len()` equals the number of vertices whose deleted flag
/// is unset. The cursor always points at a live vertex once [`Ring::first`]
/// has been called.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring<F> {
    vertices: Vec<Vertex<F>>,
    pos: usize,
    live: usize,
}

impl<F: Float> Default for Ring<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Ring<F> {
    /// Creates an empty ring.
    #[inline]
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            pos: 0,
            live: 0,
        }
    }

    /// Appends a vertex unless the simplification filter rejects it.
    ///
    /// With `threshold > 0` and a non-empty ring, the new point is dropped if
    /// it is coordinate-identical to the previous point, or if both
    /// coordinate deltas are below `prev / threshold`. The rejection radius
    /// scales with the magnitude of the previous coordinate, not a fixed
    /// distance; this exact formula is preserved for output compatibility
    /// with existing data sets. `threshold == 0` disables the filter.
    #[allow(clippy::float_cmp)]
    pub fn push_back(&mut self, point: Point2<F>, threshold: F) {
        if threshold > F::zero() {
            if let Some(prev) = self.vertices.last() {
                let prev = prev.point;
                let pct_x = prev.x / threshold;
                let pct_y = prev.y / threshold;
                if (prev.x == point.x && prev.y == point.y)
                    || ((prev.x - point.x).abs() < pct_x && (prev.y - point.y).abs() < pct_y)
                {
                    return;
                }
            }
        }
        self.vertices.push(Vertex::new(point));
        self.live += 1;
    }

    /// Returns the first live vertex and its index, setting the cursor.
    pub fn first(&mut self) -> Option<(usize, Point2<F>)> {
        for (i, v) in self.vertices.iter().enumerate() {
            if !v.deleted {
                self.pos = i;
                return Some((i, v.point));
            }
        }
        None
    }

    /// Returns the next live vertex after the cursor, advancing it.
    ///
    /// Does not wrap: once the scan reaches the end of storage this returns
    /// `None` and callers must start over with [`Ring::first`].
    pub fn next(&mut self) -> Option<(usize, Point2<F>)> {
        for i in self.pos + 1..self.vertices.len() {
            if !self.vertices[i].deleted {
                self.pos = i;
                return Some((i, self.vertices[i].point));
            }
        }
        None
    }

    /// Returns the last live vertex and its index.
    pub fn last(&self) -> Option<(usize, Point2<F>)> {
        for (i, v) in self.vertices.iter().enumerate().rev() {
            if !v.deleted {
                return Some((i, v.point));
            }
        }
        None
    }

    /// Logically deletes the vertex at `index`.
    pub fn delete(&mut self, index: usize) {
        if !self.vertices[index].deleted {
            self.vertices[index].deleted = true;
            self.live -= 1;
        }
    }

    /// Rotates the first stored vertex to the back and resets the cursor to
    /// the first live vertex.
    ///
    /// This is the driver's primitive for advancing the ear-search window;
    /// it preserves relative vertex order, which the search order depends on.
    pub fn move_to_back(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        self.vertices.rotate_left(1);
        self.first();
    }

    /// Inverse rotation: moves the last stored vertex to the front.
    pub fn move_to_front(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        self.vertices.rotate_right(1);
        self.first();
    }

    /// Clears every deleted flag and resets the cursor.
    ///
    /// Only for resetting a consumed ring for reuse or tests; never called
    /// within one triangulation run.
    pub fn undelete_all(&mut self) {
        for v in &mut self.vertices {
            v.deleted = false;
        }
        self.pos = 0;
        self.live = self.vertices.len();
    }

    /// Number of live (not deleted) vertices.
    #[inline]
    pub fn live_len(&self) -> usize {
        self.live
    }

    /// Number of stored vertices, deleted included.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if no vertices are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All stored vertices in ring order, deleted included.
    #[inline]
    pub fn vertices(&self) -> &[Vertex<F>] {
        &self.vertices
    }

    /// Arithmetic mean of all stored coordinates, deleted included.
    pub fn centroid(&self) -> Option<Point2<F>> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut sum = Point2::origin();
        for v in &self.vertices {
            sum = sum + v.point;
        }
        let n = F::from(self.vertices.len())?;
        Some(Point2::new(sum.x / n, sum.y / n))
    }

    /// Tests whether the stored vertices are ordered clockwise.
    ///
    /// Accumulates `(x_i − x_{i−1})(y_i + y_{i−1})` over consecutive vertices
    /// plus the closing edge from last back to first; a positive sum means
    /// clockwise under the same sign convention as
    /// [`is_convex`](crate::predicates::is_convex).
    pub fn is_clockwise(&self) -> bool {
        let Some(first) = self.vertices.first() else {
            return false;
        };
        let first = first.point;
        let last = self.vertices[self.vertices.len() - 1].point;
        let mut sum = (first.x - last.x) * (first.y + last.y);
        let mut current = first;
        for v in &self.vertices {
            let p = v.point;
            sum = sum + (p.x - current.x) * (p.y + current.y);
            current = p;
        }
        sum > F::zero()
    }

    /// Reverses the ring in place if it is not already clockwise.
    ///
    /// Idempotent; the driver's convexity test is only meaningful after this
    /// has run.
    pub fn set_clockwise(&mut self) {
        if !self.is_clockwise() {
            self.vertices.reverse();
        }
    }

    /// Rotates the ring so the leftmost vertex (minimum x, first occurrence
    /// on ties) is stored first, preserving relative order.
    ///
    /// A determinism aid: the ear-search outcome is sensitive to the starting
    /// vertex on pathological inputs, and anchoring on the leftmost vertex
    /// makes the search repeatable and less prone to non-convergence.
    pub fn set_to_leftmost(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        let mut min_pos = 0;
        let mut min_x = self.vertices[0].point.x;
        for (i, v) in self.vertices.iter().enumerate().skip(1) {
            if v.point.x < min_x {
                min_x = v.point.x;
                min_pos = i;
            }
        }
        self.vertices.rotate_left(min_pos);
    }
}
