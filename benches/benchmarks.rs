use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::DVec2;
use vfvm_levelset::discretization::connectivity::CellConnectivity;
use vfvm_levelset::discretization::generator::create_rectangular_grid;
use vfvm_levelset::levelset::{DistanceEquation, DistanceVariable};

fn grid_sizes() -> Vec<usize> {
    vec![32, 128]
}

fn solver_sizes() -> Vec<usize> {
    vec![32, 64, 128]
}

/// Sign-only field of a circle through the middle of the unit square.
fn circle_field(centroids: &[DVec2]) -> DistanceVariable {
    let centre = DVec2::splat(0.5);
    DistanceVariable::from_centroids(centroids, |p| {
        if p.distance(centre) < 0.3 { -1.0 } else { 1.0 }
    })
}

fn bench_grid_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_generation");
    for &size in &grid_sizes() {
        let h = 1.0 / size as f64;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &n| {
            b.iter(|| {
                let mesh = create_rectangular_grid(std::hint::black_box(n), n, h, h);
                std::hint::black_box(mesh);
            });
        });
    }
    group.finish();
}

fn bench_connectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity");
    for &size in &grid_sizes() {
        let h = 1.0 / size as f64;
        let mesh = create_rectangular_grid(size, size, h, h);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter(|| {
                let geometry = CellConnectivity::from_mesh(std::hint::black_box(&mesh));
                std::hint::black_box(geometry);
            });
        });
    }
    group.finish();
}

fn bench_fast_marching(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_marching");
    for &size in &solver_sizes() {
        let h = 1.0 / size as f64;
        let mesh = create_rectangular_grid(size, size, h, h);
        let geometry = CellConnectivity::from_mesh(&mesh);
        let init = circle_field(&mesh.centroids());
        let equation = DistanceEquation::new();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter_batched(
                || init.clone(),
                |mut var| {
                    let _ = equation.solve(&geometry, &mut var);
                    std::hint::black_box(var);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_narrow_band(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrow_band");
    for &size in &solver_sizes() {
        let h = 1.0 / size as f64;
        let mesh = create_rectangular_grid(size, size, h, h);
        let geometry = CellConnectivity::from_mesh(&mesh);
        let init = circle_field(&mesh.centroids());
        let equation = DistanceEquation::new().with_narrow_band(5.0 * h);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &_| {
            b.iter_batched(
                || init.clone(),
                |mut var| {
                    let _ = equation.solve(&geometry, &mut var);
                    std::hint::black_box(var);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_grid_generation,
    bench_connectivity,
    bench_fast_marching,
    bench_narrow_band
);
criterion_main!(benches);
