//! File round trips of subdivided spheres.
//!
//! To run: cargo test -p mesh-io --test sphere_roundtrip

#![allow(clippy::unwrap_used, clippy::expect_used)]

use mesh_io::{load_mesh, save_mesh, save_stl};
use mesh_subdivide::{icosphere, sphere_report};
use mesh_types::MeshTopology;
use tempfile::tempdir;

#[test]
fn obj_roundtrip_keeps_sphere_exact() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sphere.obj");
    let sphere = icosphere(3, 2.0).unwrap();

    save_mesh(&sphere, &path).unwrap();
    let loaded = load_mesh(&path).unwrap();

    assert_eq!(loaded, sphere);
    assert!(sphere_report(&loaded, 2.0, 1e-12).is_valid_sphere());
}

#[test]
fn binary_stl_roundtrip_welds_topology() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sphere.stl");
    let sphere = icosphere(2, 1.0).unwrap();

    save_mesh(&sphere, &path).unwrap();
    let loaded = load_mesh(&path).unwrap();

    assert_eq!(loaded.vertex_count(), 162);
    assert_eq!(loaded.face_count(), 320);

    // f32 storage costs precision but not topology.
    let report = sphere_report(&loaded, 1.0, 1e-6);
    assert!(report.is_watertight);
    assert!(report.is_valid_sphere());
}

#[test]
fn ascii_stl_roundtrip() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sphere_ascii.stl");
    let sphere = icosphere(1, 1.0).unwrap();

    save_stl(&sphere, &path, false).unwrap();
    let loaded = load_mesh(&path).unwrap();

    assert_eq!(loaded.vertex_count(), 42);
    assert_eq!(loaded.face_count(), 80);
    assert!(sphere_report(&loaded, 1.0, 1e-12).is_valid_sphere());
}
