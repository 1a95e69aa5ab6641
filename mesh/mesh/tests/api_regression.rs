//! API Regression Tests for the Icosphere Crates
//!
//! These tests pin the public API across the workspace. They are organized
//! in 4 tiers, each building on the one before:
//!
//! - Tier 1: Foundation (mesh-types, the base icosahedron)
//! - Tier 2: Subdivision (mesh-subdivide)
//! - Tier 3: Output (mesh-buffers, mesh-io)
//! - Tier 4: Render state (mesh-scene)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

use mesh::{prelude::*, subdivide as sub, types};

// =============================================================================
// TIER 1: Foundation - Basic Types and the Icosahedron
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn vertex_creation_and_access() {
        let v = types::Vertex::from_coords(3.0, 4.0, 0.0);
        assert!((v.radius() - 5.0).abs() < f64::EPSILON);
        assert!(v.is_finite());

        let unit = v.projected_onto_sphere(1.0).unwrap();
        assert!((unit.position.x - 0.6).abs() < 1e-12);

        // The origin has no direction
        assert!(types::Vertex::from_coords(0.0, 0.0, 0.0)
            .projected_onto_sphere(1.0)
            .is_none());
    }

    #[test]
    fn indexed_mesh_construction() {
        let mesh = types::IndexedMesh::new();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());

        let vertices = vec![
            types::Vertex::from_coords(0.0, 0.0, 0.0),
            types::Vertex::from_coords(1.0, 0.0, 0.0),
            types::Vertex::from_coords(0.0, 1.0, 0.0),
        ];
        let mesh = types::IndexedMesh::from_parts(vertices, vec![[0, 1, 2]]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.first_out_of_range_index().is_none());
    }

    #[test]
    fn icosahedron_table() {
        let ico = icosahedron();
        assert_eq!(ico.vertex_count(), 12);
        assert_eq!(ico.face_count(), 20);
        assert_eq!(types::ICOSAHEDRON_FACES.len(), 20);
        assert_eq!(types::ICOSAHEDRON_VERTICES.len(), 12);

        // Every vertex on the unit sphere within table precision
        assert!(ico.max_radius_error(1.0) < 1e-3);

        // Counter-clockwise from outside
        for fi in 0..ico.face_count() {
            assert!(ico.triangle(fi).unwrap().faces_away_from_origin());
        }
    }

    #[test]
    fn icosahedron_scaled() {
        let ico = types::icosahedron_with_radius(2.5);
        for v in &ico.vertices {
            assert!((v.radius() - 2.5).abs() < 1e-12);
        }
        assert!(ico.signed_volume() > 0.0);
    }

    #[test]
    fn mesh_topology_traits() {
        let ico = icosahedron();
        let count = <types::IndexedMesh as types::MeshTopology>::face_count(&ico);
        assert_eq!(count, 20);
        assert_eq!(ico.faces().count(), 20);
        assert_eq!(ico.face(0), Some(types::ICOSAHEDRON_FACES[0]));
        assert!(ico.face(20).is_none());
        assert!(ico.vertex(12).is_none());
    }
}

// =============================================================================
// TIER 2: Subdivision - Counts, Invariants, Errors
// =============================================================================

mod tier2_subdivision {
    use super::*;
    use mesh::subdivide::{EdgeMap, MeshDefect, SubdivideError};

    #[test]
    fn subdivision_counts() {
        let expected = [(0, 12, 20), (1, 42, 80), (2, 162, 320), (3, 642, 1280)];
        for (levels, vertices, faces) in expected {
            let sphere = icosphere(levels, 1.0).unwrap();
            assert_eq!(sphere.vertex_count(), vertices, "level {}", levels);
            assert_eq!(sphere.face_count(), faces, "level {}", levels);
        }
    }

    #[test]
    fn params_builder_pattern() {
        let params = SubdivideParams::default();
        assert_eq!(params.method, SubdivisionMethod::Spherical);
        assert_eq!(params.iterations, 1);

        let params = SubdivideParams::spherical(2.0)
            .with_iterations(3)
            .with_max_faces(5_000);
        assert!((params.radius - 2.0).abs() < f64::EPSILON);
        assert_eq!(params.expected_faces(20), 1280);

        assert_eq!(SubdivideParams::midpoint().method, SubdivisionMethod::Midpoint);
    }

    #[test]
    fn result_statistics() {
        let params = SubdivideParams::default().with_iterations(2);
        let result = subdivide_mesh(&icosahedron(), &params).unwrap();

        assert!(result.was_subdivided());
        assert_eq!(result.added_vertices(), 150);
        assert!((result.face_ratio() - 16.0).abs() < f64::EPSILON);

        let display = format!("{}", result);
        assert!(display.contains("20 -> 320"));
    }

    #[test]
    fn sphere_invariants_hold() {
        let sphere = icosphere(2, 1.5).unwrap();
        let report = sphere_report(&sphere, 1.5, 1e-6);

        assert!(report.is_valid_sphere(), "{}", report);
        assert_eq!(report.euler_characteristic(), 2);
        assert_eq!(report.edge_count, 480);

        let edges = EdgeMap::build(&sphere.faces);
        assert!(edges.is_watertight());
    }

    #[test]
    fn converges_on_sphere_area() {
        let exact = 4.0 * std::f64::consts::PI;
        let mut previous = f64::INFINITY;
        for levels in 0..=4 {
            let error = exact - icosphere(levels, 1.0).unwrap().surface_area();
            // Inscribed, so always short of the sphere and closing in
            assert!(error > 0.0);
            assert!(error < previous);
            previous = error;
        }
        assert!(previous / exact < 0.01);
    }

    #[test]
    fn deterministic_output() {
        let a = subdivide(&icosahedron()).unwrap();
        let b = subdivide(&icosahedron()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let empty = types::IndexedMesh::new();
        assert!(matches!(
            subdivide(&empty),
            Err(SubdivideError::InvalidMesh(MeshDefect::NoVertices))
        ));

        let mut broken = icosahedron();
        broken.faces[3] = [0, 1, 99];
        assert!(matches!(
            subdivide(&broken),
            Err(SubdivideError::InvalidMesh(MeshDefect::IndexOutOfRange {
                face: 3,
                index: 99,
                ..
            }))
        ));

        let params = SubdivideParams::default().with_iterations(0);
        assert!(matches!(
            subdivide_mesh(&icosahedron(), &params),
            Err(SubdivideError::InvalidIterations(0))
        ));

        let params = SubdivideParams::default()
            .with_iterations(4)
            .with_max_faces(1_000);
        assert!(matches!(
            subdivide_mesh(&icosahedron(), &params),
            Err(SubdivideError::MeshTooLarge { .. })
        ));
    }

    #[test]
    fn normals() {
        let sphere = icosphere(1, 1.0).unwrap();
        let normals = sub::face_normals(&sphere).unwrap();
        assert_eq!(normals.len(), sphere.face_count());

        let smooth = sub::with_vertex_normals(&sphere).unwrap();
        for v in &smooth.vertices {
            let n = v.normal.unwrap();
            assert!(n.dot(&v.position.coords) > 0.9);
        }
    }
}

// =============================================================================
// TIER 3: Output - Render Buffers and Files
// =============================================================================

mod tier3_output {
    use super::*;
    use mesh::buffers::{NORMAL_SLOT, POSITION_SLOT, RenderVertex};

    #[test]
    fn flat_buffer_sizes() {
        let sphere = icosphere(1, 1.0).unwrap();
        let buffers = RenderBuffers::from_mesh(&sphere, ShadingMode::Flat).unwrap();

        assert_eq!(buffers.positions.len(), 9 * 80);
        assert_eq!(buffers.normals.len(), 9 * 80);
        assert_eq!(buffers.indices.len(), 3 * 80);
        assert_eq!(buffers.triangle_count(), 80);
    }

    #[test]
    fn smooth_buffer_sizes() {
        let sphere = icosphere(1, 1.0).unwrap();
        let buffers = RenderBuffers::from_mesh(&sphere, ShadingMode::Smooth).unwrap();

        assert_eq!(buffers.positions.len(), 3 * 42);
        assert_eq!(buffers.normals.len(), 3 * 42);
        assert_eq!(buffers.indices.len(), 3 * 80);
    }

    #[test]
    fn attribute_slots() {
        assert_eq!(POSITION_SLOT, 0);
        assert_eq!(NORMAL_SLOT, 2);
        let slots: Vec<u32> = RenderVertex::ATTRIBUTES.iter().map(|a| a.slot).collect();
        assert_eq!(slots, vec![0, 2]);
        assert_eq!(RenderVertex::stride(), 24);
    }

    #[test]
    fn io_format_detection() {
        assert_eq!(MeshFormat::from_path("sphere.stl"), Some(MeshFormat::Stl));
        assert_eq!(MeshFormat::from_path("sphere.OBJ"), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path("sphere.ply"), None);

        assert_eq!(MeshFormat::Stl.extension(), "stl");
        assert_eq!(MeshFormat::Obj.extension(), "obj");
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let sphere = icosphere(2, 1.0).unwrap();

        let obj = dir.path().join("sphere.obj");
        save_mesh(&sphere, &obj).unwrap();
        assert_eq!(load_mesh(&obj).unwrap(), sphere);

        let stl = dir.path().join("sphere.stl");
        save_mesh(&sphere, &stl).unwrap();
        let loaded = load_mesh(&stl).unwrap();
        assert_eq!(loaded.vertex_count(), 162);
        assert_eq!(loaded.face_count(), 320);
    }

    #[test]
    fn unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let result = save_mesh(&icosahedron(), dir.path().join("sphere.xyz"));
        assert!(matches!(
            result,
            Err(mesh::io::IoError::UnknownFormat { .. })
        ));
    }
}

// =============================================================================
// TIER 4: Render State - Camera, Lighting, Input
// =============================================================================

mod tier4_render_state {
    use super::*;
    use approx::assert_relative_eq;
    use mesh::scene::{Action, Key, MouseButton, shade_faces};

    #[test]
    fn defaults() {
        let ctx = RenderContext::default();
        assert_eq!(ctx.camera.fovy_degrees, 70.0);
        assert_eq!(ctx.camera.eye.z, 10.0);
        assert_eq!(ctx.lighting.light.position.x, 5.0);
        assert_eq!(ctx.lighting.material.ambient[0], 0.2);
        assert_eq!(ctx.lighting.material.diffuse[0], 0.8);
        assert_eq!(ctx.step, 0.1);
        assert!(!ctx.close_requested);
    }

    #[test]
    fn input_drives_context() {
        let mut ctx = RenderContext::default();
        let mut queue = InputQueue::new();
        queue.push(InputEvent::press(Key::H));
        queue.push(InputEvent::press(Key::Up));
        queue.push(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        queue.push(InputEvent::MouseButton {
            button: MouseButton::Right,
            action: Action::Press,
        });
        queue.push(InputEvent::CursorMoved { x: 10.0, y: 0.0 });

        assert_eq!(ctx.apply_events(&mut queue), 5);
        assert_relative_eq!(ctx.lighting.light.position.x, 5.5);
        let offset = ctx.model.offset();
        assert_relative_eq!(offset.x, 0.1, epsilon = 1e-6);
        assert_relative_eq!(offset.y, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn mvp_is_projection_view_model() {
        let mut ctx = RenderContext::default();
        ctx.model.rotate_y(0.7);
        assert_eq!(
            ctx.mvp(),
            ctx.projection_matrix() * ctx.view_matrix() * ctx.model_matrix()
        );
    }

    #[test]
    fn facing_light_is_brighter() {
        let sphere = icosphere(2, 1.0).unwrap();
        let ctx = RenderContext::default();
        let colors = shade_faces(&sphere, &ctx).unwrap();

        let brightest = sphere
            .faces()
            .enumerate()
            .max_by(|(a, _), (b, _)| colors[*a][0].total_cmp(&colors[*b][0]))
            .map(|(fi, _)| fi)
            .unwrap();
        let darkest = sphere
            .faces()
            .enumerate()
            .min_by(|(a, _), (b, _)| colors[*a][0].total_cmp(&colors[*b][0]))
            .map(|(fi, _)| fi)
            .unwrap();

        // Light is on +X
        assert!(sphere.triangle(brightest).unwrap().centroid().x > 0.5);
        assert!(sphere.triangle(darkest).unwrap().centroid().x < 0.5);
        assert!(colors[brightest][0] > colors[darkest][0]);
    }
}
