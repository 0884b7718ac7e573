//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;

use neuroweb::{Network, NetworkConfig, SourceMesh};

/// Ellipsoid with roughly `2 * particles` vertices, so the default sampling
/// coefficient yields about `particles` particles.
fn brain_mesh(particles: u32) -> SourceMesh {
    let side = ((particles * 2) as f32).sqrt().ceil() as u32;
    SourceMesh::ellipsoid(Vec3::new(0.3, 0.25, 0.36), side, side)
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for particles in [100u32, 300, 1000] {
        let mesh = brain_mesh(particles);
        let config = NetworkConfig::new().with_seed(1);
        let mut network = Network::new(mesh.positions(), config).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(particles), &particles, |b, _| {
            b.iter(|| black_box(network.advance().segment_count()))
        });
    }

    group.finish();
}

fn bench_connection_cap(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_by_cap");
    let mesh = brain_mesh(400);

    for cap in [1u32, 10, 50] {
        let config = NetworkConfig::new()
            .with_max_connections(cap)
            .with_min_distance(Some(3.0))
            .with_seed(2);
        let mut network = Network::new(mesh.positions(), config).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(cap), &cap, |b, _| {
            b.iter(|| black_box(network.advance().segment_count()))
        });
    }

    group.finish();
}

fn bench_initialize(c: &mut Criterion) {
    let mesh = brain_mesh(1000);
    c.bench_function("network_new_1000", |b| {
        b.iter(|| {
            let config = NetworkConfig::new().with_seed(3);
            black_box(Network::new(black_box(mesh.positions()), config).unwrap())
        })
    });
}

criterion_group!(benches, bench_advance, bench_connection_cap, bench_initialize);
criterion_main!(benches);
