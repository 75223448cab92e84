//! Benchmarks for ring triangulation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use earclip::{triangulate, Point2, Ring};

/// Generates a jagged star ring with alternating radii (concave, simple).
fn star_ring(num_points: usize) -> Ring<f64> {
    let mut ring = Ring::new();
    for i in 0..num_points {
        let angle = i as f64 / num_points as f64 * 2.0 * std::f64::consts::PI;
        let radius = if i % 2 == 0 { 100.0 } else { 60.0 };
        ring.push_back(
            Point2::new(radius * angle.cos(), radius * angle.sin()),
            0.0,
        );
    }
    ring
}

/// Generates a convex regular ring.
fn convex_ring(num_points: usize) -> Ring<f64> {
    let mut ring = Ring::new();
    for i in 0..num_points {
        let angle = i as f64 / num_points as f64 * 2.0 * std::f64::consts::PI;
        ring.push_back(Point2::new(100.0 * angle.cos(), 100.0 * angle.sin()), 0.0);
    }
    ring
}

fn bench_triangulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate");

    for &size in &[16usize, 64, 256] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("convex", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut ring = convex_ring(size);
                    ring.set_clockwise();
                    ring.set_to_leftmost();
                    ring
                },
                |mut ring| black_box(triangulate(&mut ring)),
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("star", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut ring = star_ring(size);
                    ring.set_clockwise();
                    ring.set_to_leftmost();
                    ring
                },
                |mut ring| black_box(triangulate(&mut ring)),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_triangulate);
criterion_main!(benches);
