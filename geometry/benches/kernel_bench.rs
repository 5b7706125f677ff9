use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use parcel_geometry::{
    contour_segments_intersects, point_strictly_inside, segments_are_collinear,
};
use parcel_types::{Contour, Point};

/// Regular polygon approximation with `n` vertices around a fixed centre.
fn ring(n: usize) -> Contour {
    let points = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            let lat = 405_948_000_000 + (angle.sin() * 1_000_000.0) as i64;
            let lon = -739_496_000_000 + (angle.cos() * 1_000_000.0) as i64;
            Point::with_precision(lat, lon, 0, 12).unwrap()
        })
        .collect();
    Contour::new(points).unwrap()
}

fn bench_point_inside(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_strictly_inside");
    let centre = Point::with_precision(405_948_000_000, -739_496_000_000, 0, 12).unwrap();

    for n in [4, 16, 64, 256] {
        let contour = ring(n);
        group.bench_with_input(BenchmarkId::new("vertices", n), &n, |b, _| {
            b.iter(|| black_box(point_strictly_inside(black_box(&centre), black_box(&contour))));
        });
    }

    group.finish();
}

fn bench_segment_checks(c: &mut Criterion) {
    let a = ring(4);
    let b = ring(5);

    c.bench_function("segments_are_collinear", |bench| {
        let (a1, a2) = a.segment(0).unwrap();
        let (b1, b2) = b.segment(0).unwrap();
        bench.iter(|| black_box(segments_are_collinear(&a1, &a2, &b1, &b2)));
    });

    c.bench_function("contour_segments_intersects", |bench| {
        bench.iter(|| {
            black_box(contour_segments_intersects(
                black_box(&a),
                black_box(&b),
                0,
                1,
                true,
            ))
        });
    });
}

criterion_group!(benches, bench_point_inside, bench_segment_checks);
criterion_main!(benches);
