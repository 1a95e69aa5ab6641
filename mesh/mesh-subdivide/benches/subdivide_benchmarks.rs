//! Benchmarks for mesh-subdivide operations.
//!
//! Run with: cargo bench -p mesh-subdivide
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-subdivide -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-subdivide -- --baseline main

#![allow(clippy::unwrap_used, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_subdivide::{
    SubdivideParams, icosphere, sphere_report, subdivide, subdivide_mesh, with_vertex_normals,
};
use mesh_types::icosahedron;

// =============================================================================
// Single Pass
// =============================================================================

fn bench_single_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("SinglePass");

    let test_cases = [
        ("sphere_80tri", icosphere(1, 1.0).unwrap()),
        ("sphere_1280tri", icosphere(3, 1.0).unwrap()),
        ("sphere_20480tri", icosphere(5, 1.0).unwrap()),
    ];

    for (name, mesh) in &test_cases {
        group.throughput(Throughput::Elements(mesh.faces.len() as u64));
        group.bench_with_input(BenchmarkId::new("subdivide", name), mesh, |b, mesh| {
            b.iter(|| subdivide(black_box(mesh)));
        });
    }

    group.finish();
}

// =============================================================================
// Multi Pass
// =============================================================================

fn bench_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("Levels");
    group.sample_size(20); // Level 6 produces 81920 faces

    let base = icosahedron();
    for levels in [2_u32, 4, 6] {
        let params = SubdivideParams::spherical(1.0).with_iterations(levels);
        group.throughput(Throughput::Elements(20 * 4_u64.pow(levels)));
        group.bench_with_input(BenchmarkId::new("spherical", levels), &params, |b, params| {
            b.iter(|| subdivide_mesh(black_box(&base), black_box(params)));
        });
    }

    group.finish();
}

// =============================================================================
// Post-processing
// =============================================================================

fn bench_post(c: &mut Criterion) {
    let mut group = c.benchmark_group("Post");
    let mesh = icosphere(4, 1.0).unwrap();
    group.throughput(Throughput::Elements(mesh.faces.len() as u64));

    group.bench_function("vertex_normals", |b| {
        b.iter(|| with_vertex_normals(black_box(&mesh)));
    });
    group.bench_function("sphere_report", |b| {
        b.iter(|| sphere_report(black_box(&mesh), 1.0, 1e-9));
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_single_pass, bench_levels, bench_post);
criterion_main!(benches);
