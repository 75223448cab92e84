//! Geometric predicates for ear admissibility tests.
//!
//! These are the exact formulas the triangulation driver depends on. Their
//! comparison contracts are deliberate and output-affecting:
//!
//! - [`is_colinear`] compares against zero with exact floating equality, no
//!   epsilon. Near-degenerate triples that miss exact zero are *not* treated
//!   as colinear. Substituting a tolerance here changes which triangles are
//!   accepted near degeneracy.
//! - [`is_convex`] assumes the ring has already been canonicalized to
//!   clockwise winding; on a counter-clockwise ring its meaning inverts.
//! - [`point_in_triangle`] is strict: boundary points are outside.

use crate::point::Point2;
use num_traits::Float;

/// Tests whether three points lie on a single line.
///
/// Uses the cross-product expansion
/// `p1.x(p2.y−p3.y) + p2.x(p3.y−p1.y) + p3.x(p1.y−p2.y)` compared with exact
/// equality against zero. Known fragility: points that are colinear up to
/// rounding but not exactly so will report `false`.
#[inline]
#[allow(clippy::float_cmp)]
pub fn is_colinear<F: Float>(p1: Point2<F>, p2: Point2<F>, p3: Point2<F>) -> bool {
    p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y) == F::zero()
}

/// Tests whether the corner `p1 → p2 → p3` is convex.
///
/// True iff the points are not colinear and the signed turn
/// `(p2.y−p1.y)(p3.x−p2.x) − (p3.y−p2.y)(p2.x−p1.x)` is non-negative.
///
/// The sign convention requires clockwise ring winding; callers must run
/// [`Ring::set_clockwise`](crate::ring::Ring::set_clockwise) first.
#[inline]
pub fn is_convex<F: Float>(p1: Point2<F>, p2: Point2<F>, p3: Point2<F>) -> bool {
    !is_colinear(p1, p2, p3)
        && (p2.y - p1.y) * (p3.x - p2.x) - (p3.y - p2.y) * (p2.x - p1.x) >= F::zero()
}

/// Tests whether `p` lies strictly inside triangle `(p1, p2, p3)`.
///
/// Barycentric-coordinate test: α and β from the area-ratio formulas,
/// γ = 1 − α − β, inside iff all three are strictly positive. Points on the
/// triangle boundary are excluded.
///
/// # Precondition
///
/// The triangle must be non-degenerate (the three vertices not colinear),
/// otherwise the shared denominator is zero and the result is meaningless.
/// The driver guarantees this by only testing triangles that already passed
/// [`is_convex`].
#[inline]
pub fn point_in_triangle<F: Float>(
    p1: Point2<F>,
    p2: Point2<F>,
    p3: Point2<F>,
    p: Point2<F>,
) -> bool {
    let den = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);
    let alpha = ((p2.y - p3.y) * (p.x - p3.x) + (p3.x - p2.x) * (p.y - p3.y)) / den;
    let beta = ((p3.y - p1.y) * (p.x - p3.x) + (p1.x - p3.x) * (p.y - p3.y)) / den;
    let gamma = F::one() - alpha - beta;
    alpha > F::zero() && beta > F::zero() && gamma > F::zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colinear_horizontal() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(5.0, 0.0);
        let c = Point2::new(10.0, 0.0);
        assert!(is_colinear(a, b, c));
    }

    #[test]
    fn test_colinear_diagonal() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(1.0, 1.0);
        let c = Point2::new(2.0, 2.0);
        assert!(is_colinear(a, b, c));
    }

    #[test]
    fn test_not_colinear() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(1.0, 1.0);
        assert!(!is_colinear(a, b, c));
    }

    #[test]
    fn test_convex_never_true_on_colinear() {
        // is_convex must reject every colinear triple regardless of turn sign
        let triples = [
            (
                Point2::new(0.0_f64, 0.0),
                Point2::new(5.0, 0.0),
                Point2::new(10.0, 0.0),
            ),
            (
                Point2::new(10.0_f64, 0.0),
                Point2::new(5.0, 0.0),
                Point2::new(0.0, 0.0),
            ),
            (
                Point2::new(0.0_f64, 0.0),
                Point2::new(1.0, 2.0),
                Point2::new(2.0, 4.0),
            ),
        ];
        for (a, b, c) in triples {
            assert!(is_colinear(a, b, c));
            assert!(!is_convex(a, b, c));
        }
    }

    #[test]
    fn test_convex_clockwise_corner() {
        // Clockwise square corner
        let a = Point2::new(0.0_f64, 10.0);
        let b = Point2::new(10.0, 10.0);
        let c = Point2::new(10.0, 0.0);
        assert!(is_convex(a, b, c));
        // Reflex when traversed the other way
        assert!(!is_convex(c, b, a));
    }

    #[test]
    fn test_point_in_triangle_interior() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(10.0, 0.0);
        let c = Point2::new(5.0, 10.0);
        assert!(point_in_triangle(a, b, c, Point2::new(5.0, 3.0)));
        assert!(!point_in_triangle(a, b, c, Point2::new(15.0, 3.0)));
    }

    #[test]
    fn test_point_in_triangle_boundary_excluded() {
        let a = Point2::new(0.0_f64, 0.0);
        let b = Point2::new(10.0, 0.0);
        let c = Point2::new(5.0, 10.0);
        // On an edge
        assert!(!point_in_triangle(a, b, c, Point2::new(5.0, 0.0)));
        // On a vertex
        assert!(!point_in_triangle(a, b, c, a));
    }
}
