//! Benchmarks for the CPU side of the wave field.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wavefield::field::grid_points;
use wavefield::{displace, displace_all, DisplacementInputs, Vec3};

fn inputs() -> DisplacementInputs {
    DisplacementInputs {
        time: 1.5,
        frequency: 0.1,
        amplitude: 5.5,
        pointer: Vec3::new(250.0, 0.0, 250.0),
        radius: 10.0,
        strength: 1.0,
    }
}

fn bench_displace(c: &mut Criterion) {
    let inputs = inputs();

    c.bench_function("displace_single", |b| {
        let origin = Vec3::new(245.0, 0.0, 250.0);
        b.iter(|| black_box(displace(black_box(origin), &inputs)))
    });

    let mut group = c.benchmark_group("displace_all");
    for side in [100u32, 300, 1000] {
        let points = grid_points(side, side, 5.0);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &points, |b, points| {
            b.iter(|| black_box(displace_all(points, &inputs)))
        });
    }
    group.finish();
}

fn bench_grid_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_points");
    for side in [100u32, 300, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &side, |b, &side| {
            b.iter(|| black_box(grid_points(side, side, 5.0)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_displace, bench_grid_points);
criterion_main!(benches);
