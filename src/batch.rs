//! Concurrent per-entity triangulation with aggregate reporting.
//!
//! A vector data source yields entities, each composed of one or more
//! coordinate rings. Entities are triangulated independently: every task
//! owns its own rings, so the core needs no locking. The only shared state
//! is the aggregate totals accumulator and the color source, both behind
//! mutexes.
//!
//! A ring that fails to converge is logged and recorded on its entity's
//! report; it never aborts sibling rings or the batch. The entity keeps the
//! triangles emitted before the failure.

use crate::error::NonConvergence;
use crate::point::Point2;
use crate::ring::Ring;
use crate::triangulate::{triangulate, Triangle};
use log::{debug, info, warn};
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// One polygon entity: a group of rings triangulated as a unit by a single
/// task. Holes are not treated specially; each ring is triangulated
/// independently.
#[derive(Debug, Clone)]
pub struct Entity<F> {
    /// The entity's rings, already translated to the target coordinate
    /// space by the caller.
    pub rings: Vec<Ring<F>>,
}

impl<F: Float> Entity<F> {
    /// Builds an entity from raw coordinate rings.
    ///
    /// `threshold` is the simplification threshold applied uniformly at
    /// ingestion through [`Ring::push_back`]; zero disables simplification.
    pub fn from_rings(rings: &[Vec<(F, F)>], threshold: F) -> Self {
        let rings = rings
            .iter()
            .map(|coords| {
                let mut ring = Ring::new();
                for &(x, y) in coords {
                    ring.push_back(Point2::new(x, y), threshold);
                }
                ring
            })
            .collect();
        Self { rings }
    }

    /// Total stored vertices across all rings.
    pub fn point_count(&self) -> usize {
        self.rings.iter().map(Ring::len).sum()
    }
}

/// Per-entity triangulation outcome.
#[derive(Debug, Clone)]
pub struct EntityReport<F: fmt::Debug> {
    /// Every triangle produced for the entity's rings, in ring order.
    pub triangles: Vec<Triangle<F>>,
    /// Diagnostics for rings whose ear search did not converge. Their
    /// partial triangles are still present in `triangles`.
    pub failures: Vec<NonConvergence<F>>,
    /// Stored vertices processed, after simplification.
    pub points: usize,
    /// Wall-clock time spent triangulating this entity.
    pub elapsed: Duration,
    /// Color base in `[0, 1)` drawn from the shared color source; purely
    /// for the rendering layer.
    pub color_base: f64,
}

/// Aggregate totals over one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub entities: usize,
    pub points: usize,
    pub triangles: usize,
    pub failed_rings: usize,
    /// Sum of per-entity elapsed times (not wall-clock batch time).
    pub elapsed: Duration,
}

/// Batch tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Worker threads for entity dispatch.
    pub workers: usize,
    /// Seed for the shared color source; `None` seeds from entropy.
    pub color_seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            color_seed: None,
        }
    }
}

/// Default worker count: twice the available hardware parallelism.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * 2
}

/// Triangulates a batch of entities concurrently.
///
/// Each entity is canonicalized (clockwise winding, leftmost anchor) and
/// triangulated by one task on a pool of `config.workers` threads. Returns
/// per-entity reports in input order plus the aggregate summary.
pub fn triangulate_entities<F>(
    entities: Vec<Entity<F>>,
    config: &BatchConfig,
) -> (Vec<EntityReport<F>>, BatchSummary)
where
    F: Float + Send + fmt::Debug,
{
    let color_rng = Mutex::new(match config.color_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    });
    let totals = Mutex::new(BatchSummary::default());

    let run = || {
        entities
            .into_par_iter()
            .map(|entity| {
                let report = triangulate_entity(entity, &color_rng);
                let mut totals = totals
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                totals.entities += 1;
                totals.points += report.points;
                totals.triangles += report.triangles.len();
                totals.failed_rings += report.failures.len();
                totals.elapsed += report.elapsed;
                report
            })
            .collect::<Vec<_>>()
    };

    let reports = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(e) => {
            warn!("falling back to the global thread pool: {e}");
            run()
        }
    };

    let summary = totals
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);
    info!(
        "processed {} entities, {} points, {} triangles ({} rings failed) in {} ms",
        summary.entities,
        summary.points,
        summary.triangles,
        summary.failed_rings,
        summary.elapsed.as_millis()
    );
    (reports, summary)
}

fn triangulate_entity<F>(entity: Entity<F>, color_rng: &Mutex<StdRng>) -> EntityReport<F>
where
    F: Float + fmt::Debug,
{
    // The color source is shared across tasks and not thread safe on its
    // own; draws go through the mutex.
    let color_base = color_rng
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .gen::<f64>();

    let start = Instant::now();
    let mut triangles = Vec::new();
    let mut failures = Vec::new();
    let mut points = 0;

    for mut ring in entity.rings {
        ring.set_clockwise();
        ring.set_to_leftmost();
        points += ring.len();
        let result = triangulate(&mut ring);
        if let Some(failure) = result.failure {
            // Non-fatal: the partial cover may show a gap in this polygon
            warn!("ring triangulation failed: {failure}");
            failures.push(failure);
        }
        triangles.extend(result.triangles);
    }

    let elapsed = start.elapsed();
    debug!(
        "entity: {} points, {} triangles in {} ms",
        points,
        triangles.len(),
        elapsed.as_millis()
    );
    EntityReport {
        triangles,
        failures,
        points,
        elapsed,
        color_base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BatchConfig {
        BatchConfig {
            workers: 2,
            color_seed: Some(7),
        }
    }

    #[test]
    fn test_entity_from_rings_applies_threshold() {
        let coords = vec![vec![
            (100.0_f64, 100.0),
            (100.05, 100.05), // dropped by the proportional filter
            (200.0, 100.0),
            (200.0, 200.0),
        ]];
        let entity = Entity::from_rings(&coords, 1000.0);
        assert_eq!(entity.point_count(), 3);

        let unfiltered = Entity::from_rings(&coords, 0.0);
        assert_eq!(unfiltered.point_count(), 4);
    }

    #[test]
    fn test_batch_aggregates() {
        let square = Entity::from_rings(
            &[vec![(0.0_f64, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]],
            0.0,
        );
        let l_shape = Entity::from_rings(
            &[vec![
                (0.0_f64, 0.0),
                (2.0, 0.0),
                (2.0, 1.0),
                (1.0, 1.0),
                (1.0, 2.0),
                (0.0, 2.0),
            ]],
            0.0,
        );
        let (reports, summary) = triangulate_entities(vec![square, l_shape], &config());

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].triangles.len(), 2);
        assert_eq!(reports[1].triangles.len(), 4);
        assert_eq!(summary.entities, 2);
        assert_eq!(summary.points, 10);
        assert_eq!(summary.triangles, 6);
        assert_eq!(summary.failed_rings, 0);
        for report in &reports {
            assert!((0.0..1.0).contains(&report.color_base));
            assert!(report.failures.is_empty());
        }
    }

    #[test]
    fn test_failed_ring_does_not_abort_siblings() {
        // Five colinear points: every candidate triple is rejected, so the
        // ear search spins until its loop bound and reports non-convergence.
        let bad = Entity::from_rings(
            &[vec![
                (0.0_f64, 0.0),
                (1.0, 0.0),
                (2.0, 0.0),
                (3.0, 0.0),
                (4.0, 0.0),
            ]],
            0.0,
        );
        let good = Entity::from_rings(
            &[vec![(0.0_f64, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]],
            0.0,
        );
        let (reports, summary) = triangulate_entities(vec![bad, good], &config());

        assert_eq!(reports[0].failures.len(), 1);
        assert!(reports[0].triangles.is_empty());
        let failure = &reports[0].failures[0];
        assert_eq!(failure.total_vertices, 5);
        assert_eq!(failure.remaining.len(), 5);

        // The sibling entity is unaffected
        assert_eq!(reports[1].triangles.len(), 2);
        assert!(reports[1].failures.is_empty());
        assert_eq!(summary.failed_rings, 1);
        assert_eq!(summary.triangles, 2);
    }

    #[test]
    fn test_multi_ring_entity() {
        let entity = Entity::from_rings(
            &[
                vec![(0.0_f64, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
                vec![(20.0, 0.0), (30.0, 0.0), (25.0, 10.0)],
            ],
            0.0,
        );
        let (reports, summary) = triangulate_entities(vec![entity], &config());
        assert_eq!(reports[0].triangles.len(), 3);
        assert_eq!(summary.points, 7);
    }

    #[test]
    fn test_default_workers_positive() {
        assert!(default_workers() >= 2);
    }
}
