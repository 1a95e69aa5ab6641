//! Core mesh types.
//!
//! This crate provides the foundational types for sphere meshing:
//!
//! - [`Vertex`] - A point in 3D space with an optional normal
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`icosahedron`] - The 12-vertex, 20-face base sphere approximation
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`. Sphere
//! meshes are centred on the origin; the base icosahedron has radius 1.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system** with +Y up, matching the
//! camera convention of the render collaborator.
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Vertex, IndexedMesh, Point3, MeshTopology};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(0.5, 1.0, 0.0)));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod icosahedron;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use icosahedron::{
    ICOSAHEDRON_FACES, ICOSAHEDRON_VERTICES, ICOSAHEDRON_X, ICOSAHEDRON_Z, icosahedron,
    icosahedron_with_radius,
};
pub use mesh::IndexedMesh;
pub use traits::MeshTopology;
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
