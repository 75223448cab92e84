//! Ear-clipping triangulation of a vertex ring.
//!
//! Decomposes the interior of a simple polygon ring into non-overlapping
//! triangles by repeatedly clipping "ears": three consecutive live vertices
//! forming a convex triangle that contains no other ring vertex.
//!
//! The ring must be canonicalized first: [`Ring::set_clockwise`] puts it in
//! the winding the convexity predicate expects, and
//! [`Ring::set_to_leftmost`] anchors the search at a repeatable starting
//! vertex. The driver consumes the ring destructively; on success the ring
//! ends with every vertex deleted.
//!
//! # Example
//!
//! ```
//! use earclip::{triangulate, Point2, Ring};
//!
//! let mut ring = Ring::new();
//! for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
//!     ring.push_back(Point2::new(x, y), 0.0);
//! }
//! ring.set_clockwise();
//! ring.set_to_leftmost();
//!
//! let result = triangulate(&mut ring);
//! assert!(result.failure.is_none());
//! assert_eq!(result.triangles.len(), 2);
//! ```

use crate::error::NonConvergence;
use crate::point::Point2;
use crate::predicates::{is_colinear, is_convex, point_in_triangle};
use crate::ring::Ring;
use num_traits::Float;
use std::fmt;

/// A triangle emitted by the ear search.
///
/// Owns its three vertex positions, captured at the moment the ear was
/// accepted; later ring mutation does not affect it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<F> {
    /// First vertex of the triangle.
    pub a: Point2<F>,
    /// Second vertex of the triangle.
    pub b: Point2<F>,
    /// Third vertex of the triangle.
    pub c: Point2<F>,
}

impl<F: Float> Triangle<F> {
    /// Creates a new triangle from three points.
    #[inline]
    pub fn new(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Self {
        Self { a, b, c }
    }

    /// Computes the area of the triangle.
    pub fn area(&self) -> F {
        let two = F::one() + F::one();
        ((self.b.x - self.a.x) * (self.c.y - self.a.y)
            - (self.c.x - self.a.x) * (self.b.y - self.a.y))
            .abs()
            / two
    }

    /// The three vertex positions in emission order.
    #[inline]
    pub fn vertices(&self) -> [Point2<F>; 3] {
        [self.a, self.b, self.c]
    }
}

/// Computes the total area of a set of triangles.
///
/// Useful for verifying that a triangulation covers its source ring.
pub fn triangulation_area<F: Float>(triangles: &[Triangle<F>]) -> F {
    triangles
        .iter()
        .map(|t| t.area())
        .fold(F::zero(), |a, b| a + b)
}

/// Result of triangulating one ring.
///
/// `triangles` holds everything emitted before completion or failure; with
/// a non-convergence failure it is a partial cover of the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct RingTriangulation<F: fmt::Debug> {
    /// Triangles in discovery order.
    pub triangles: Vec<Triangle<F>>,
    /// The diagnostic if the ear search hit its loop bound, `None` on
    /// success.
    pub failure: Option<NonConvergence<F>>,
}

/// Triangulates a ring, collecting all triangles.
///
/// Equivalent to draining [`Ears`]; see the module documentation for the
/// canonicalization the caller must perform first. A ring that fails to
/// converge yields its partial triangle list plus the structured diagnostic
/// rather than an error return, so a batch caller can keep what was emitted.
pub fn triangulate<F: Float + fmt::Debug>(ring: &mut Ring<F>) -> RingTriangulation<F> {
    let mut ears = Ears::new(ring);
    let mut triangles = Vec::new();
    for t in ears.by_ref() {
        triangles.push(t);
    }
    RingTriangulation {
        triangles,
        failure: ears.take_failure(),
    }
}

/// Lazy iterator over the ears of a ring.
///
/// Finite and non-restartable: it mutates the ring as it goes and terminates
/// when the ring is drained, the input degenerates below three live
/// vertices, or the loop safety bound of `3 ×` stored vertices is exceeded.
/// In the last case [`Ears::failure`] reports the remaining live vertices.
pub struct Ears<'a, F: fmt::Debug> {
    ring: &'a mut Ring<F>,
    bound: usize,
    loops: usize,
    /// Ear-search attempts left in the current outer pass (general tier).
    attempts_left: usize,
    /// Second triangle of a four-vertex split, held for the next call.
    queued: Option<Triangle<F>>,
    failure: Option<NonConvergence<F>>,
    done: bool,
}

impl<'a, F: Float + fmt::Debug> Ears<'a, F> {
    /// Starts an ear search over `ring`.
    pub fn new(ring: &'a mut Ring<F>) -> Self {
        let bound = ring.len() * 3;
        Self {
            ring,
            bound,
            loops: 0,
            attempts_left: 0,
            queued: None,
            failure: None,
            done: false,
        }
    }

    /// The non-convergence diagnostic, if the search hit its loop bound.
    ///
    /// Only meaningful once the iterator has returned `None`.
    pub fn failure(&self) -> Option<&NonConvergence<F>> {
        self.failure.as_ref()
    }

    /// Takes ownership of the non-convergence diagnostic.
    pub fn take_failure(&mut self) -> Option<NonConvergence<F>> {
        self.failure.take()
    }

    fn fail(&mut self) {
        let remaining = self
            .ring
            .vertices()
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_deleted())
            .map(|(i, v)| (i, v.point()))
            .collect();
        self.failure = Some(NonConvergence {
            iterations: self.loops,
            total_vertices: self.ring.len(),
            remaining,
        });
        self.done = true;
    }

    /// Collects and deletes every live vertex in storage order.
    fn drain_live(&mut self) -> Vec<Point2<F>> {
        let mut points = Vec::with_capacity(self.ring.live_len());
        for i in 0..self.ring.len() {
            if !self.ring.vertices()[i].is_deleted() {
                points.push(self.ring.vertices()[i].point());
                self.ring.delete(i);
            }
        }
        points
    }

    /// One ear-search attempt in the general tier.
    ///
    /// Returns the clipped ear's triangle if one was accepted and has
    /// non-zero area. An attempt that rotates past a reflex or blocked
    /// candidate, or that clips a zero-area ear, returns `None` while the
    /// search continues.
    fn try_clip(&mut self) -> Option<Triangle<F>> {
        let Some((i1, p1)) = self.ring.first() else {
            self.attempts_left = 0;
            return None;
        };
        let Some((i2, p2)) = self.ring.next() else {
            self.attempts_left = 0;
            return None;
        };
        let Some((i3, p3)) = self.ring.next() else {
            self.attempts_left = 0;
            return None;
        };

        if !is_convex(p1, p2, p3) {
            self.ring.move_to_back();
            return None;
        }

        // Every stored vertex is checked, deleted ones included: their
        // coordinates still lie on the polygon's boundary history. The
        // candidate triple is excluded by storage index, never by coordinate
        // equality, so a coincident vertex elsewhere in the ring still
        // disqualifies the ear.
        let blocked = self
            .ring
            .vertices()
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i1 && j != i2 && j != i3)
            .any(|(_, v)| point_in_triangle(p1, p2, p3, v.point()));
        if blocked {
            self.ring.move_to_back();
            return None;
        }

        // Valid ear: clip the middle vertex and advance the window.
        self.ring.delete(i2);
        self.ring.move_to_back();

        // Final zero-area guard before emission.
        if is_colinear(p1, p2, p3) {
            return None;
        }
        Some(Triangle::new(p1, p2, p3))
    }

    /// Drains the last three live vertices, emitting their triangle if it is
    /// a proper (convex, non-degenerate) one.
    fn clip_final_three(&mut self) -> Option<Triangle<F>> {
        let p = self.drain_live();
        if p.len() == 3 && is_convex(p[0], p[1], p[2]) {
            return Some(Triangle::new(p[0], p[1], p[2]));
        }
        None
    }

    /// Drains the last four live vertices and fan-splits them across the
    /// p0–p2 diagonal.
    ///
    /// Each half is gated on its own convexity, tested in ring orientation;
    /// the second half is emitted with the mirrored vertex order
    /// `(p0, p3, p2)`. A degenerate quad can yield zero, one, or two
    /// triangles.
    fn clip_final_four(&mut self) -> Option<Triangle<F>> {
        let p = self.drain_live();
        if p.len() != 4 {
            return None;
        }
        let mut out = None;
        if is_convex(p[0], p[1], p[2]) {
            out = Some(Triangle::new(p[0], p[1], p[2]));
        }
        if is_convex(p[2], p[3], p[0]) {
            let second = Triangle::new(p[0], p[3], p[2]);
            match out {
                Some(_) => self.queued = Some(second),
                None => out = Some(second),
            }
        }
        out
    }
}

impl<F: Float + fmt::Debug> Iterator for Ears<'_, F> {
    type Item = Triangle<F>;

    fn next(&mut self) -> Option<Triangle<F>> {
        if let Some(t) = self.queued.take() {
            return Some(t);
        }
        if self.done {
            return None;
        }
        loop {
            // Finish the current outer pass before re-evaluating the tier;
            // the attempt budget deliberately persists across clips, so a
            // pass that started at five live vertices keeps searching even
            // as clips shrink the ring below that.
            while self.attempts_left > 0 {
                self.attempts_left -= 1;
                if let Some(t) = self.try_clip() {
                    return Some(t);
                }
            }

            if self.ring.live_len() == 0 {
                self.done = true;
                return None;
            }
            if self.loops >= self.bound {
                self.fail();
                return None;
            }
            self.loops += 1;

            match self.ring.live_len() {
                // Malformed remnant, cannot form a triangle; treated as an
                // already-complete result rather than an error.
                1 | 2 => {
                    self.done = true;
                    return None;
                }
                3 => {
                    if let Some(t) = self.clip_final_three() {
                        return Some(t);
                    }
                    // Degenerate final triple: ring is drained, nothing to
                    // emit; the next pass observes the empty ring.
                }
                4 => {
                    if let Some(t) = self.clip_final_four() {
                        return Some(t);
                    }
                }
                live => {
                    self.attempts_left = live - 1;
                }
            }
        }
    }
}
