//! Benchmarks for mesh-io operations.
//!
//! Run with: cargo bench -p mesh-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-io -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-io -- --baseline main

#![allow(clippy::expect_used)]

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_io::{load_mesh, save_mesh, save_stl};
use mesh_subdivide::icosphere;
use tempfile::tempdir;

// =============================================================================
// I/O Benchmarks
// =============================================================================

fn bench_io(c: &mut Criterion) {
    let mut group = c.benchmark_group("IO");

    let sphere = icosphere(4, 1.0).expect("failed to build sphere"); // 5120 triangles
    let temp_dir = tempdir().expect("failed to create temp dir");

    let stl_path = temp_dir.path().join("bench_sphere.stl");
    let ascii_path = temp_dir.path().join("bench_sphere_ascii.stl");
    let obj_path = temp_dir.path().join("bench_sphere.obj");

    save_mesh(&sphere, &stl_path).expect("failed to save STL");
    save_stl(&sphere, &ascii_path, false).expect("failed to save ASCII STL");
    save_mesh(&sphere, &obj_path).expect("failed to save OBJ");

    group.throughput(Throughput::Elements(sphere.faces.len() as u64));

    // Load benchmarks (STL includes vertex welding)
    group.bench_function("load_stl", |b| b.iter(|| load_mesh(black_box(&stl_path))));
    group.bench_function("load_stl_ascii", |b| {
        b.iter(|| load_mesh(black_box(&ascii_path)));
    });
    group.bench_function("load_obj", |b| b.iter(|| load_mesh(black_box(&obj_path))));

    // Save benchmarks
    let out_stl = temp_dir.path().join("bench_out.stl");
    let out_obj = temp_dir.path().join("bench_out.obj");

    group.bench_function("save_stl", |b| {
        b.iter(|| save_mesh(black_box(&sphere), black_box(&out_stl)));
    });
    group.bench_function("save_obj", |b| {
        b.iter(|| save_mesh(black_box(&sphere), black_box(&out_obj)));
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_io);
criterion_main!(benches);
