//! Benchmarks for convex hulls and Minkowski sums.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use planegeom::config::Canvas;
use planegeom::hull::convex_hull;
use planegeom::polygon::{minkowski_sum, ConvexPolygon};
use planegeom::sampling::{sample_canvas_points, PointSampler};
use planegeom::Point2;

fn bench_convex_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("convex_hull");

    for count in [100, 1000, 10000] {
        let points = sample_canvas_points(&Canvas::<f64>::default(), 50.0, count, 12345);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("points", count), &points, |b, pts| {
            b.iter(|| convex_hull(black_box(pts)))
        });
    }

    group.finish();
}

/// Regular polygon with `n` vertices, CCW.
fn regular_polygon(n: usize, radius: f64) -> Vec<Point2<f64>> {
    (0..n)
        .map(|i| {
            let t = std::f64::consts::TAU * i as f64 / n as f64;
            Point2::new(400.0 + radius * t.cos(), 400.0 + radius * t.sin())
        })
        .collect()
}

fn bench_minkowski_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("minkowski_sum");

    // Cost grows with |P|·|Q| pairwise sums.
    for n in [4, 8, 16, 32, 64] {
        let p = regular_polygon(n, 30.0);
        let q = regular_polygon(n, 50.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_with_input(BenchmarkId::new("regular", n), &(p, q), |b, (p, q)| {
            b.iter(|| minkowski_sum(black_box(p), black_box(q)))
        });
    }

    let mut sampler = PointSampler::new(&Canvas::<f64>::default(), 50.0, 7);
    let robot = sampler.convex_polygon(30.0, 12);
    let obstacles: Vec<ConvexPolygon<f64>> =
        (0..20).map(|_| sampler.convex_polygon(60.0, 12)).collect();
    group.bench_function("random_scene_20", |b| {
        b.iter(|| {
            for obstacle in &obstacles {
                black_box(minkowski_sum(&robot.vertices, &obstacle.vertices));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_convex_hull, bench_minkowski_sum);
criterion_main!(benches);
