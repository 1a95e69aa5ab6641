//! Sphere subdivision.
//!
//! This crate refines a triangle mesh approximating a sphere by splitting
//! every triangle into four:
//!
//! - **Spherical subdivision**: edge midpoints are projected back onto the
//!   sphere, so the mesh converges on a smooth sphere with each pass
//! - **Midpoint subdivision**: plain averaging, for meshes that are not
//!   spheres
//!
//! Alongside the subdivider it provides face and vertex normals for flat and
//! smooth shading, an [`EdgeMap`] for edge bookkeeping, and a
//! [`SphereReport`] that checks the sphere invariants.
//!
//! # Examples
//!
//! One pass over the icosahedron:
//!
//! ```
//! use mesh_types::{icosahedron, MeshTopology};
//! use mesh_subdivide::{face_normals, subdivide};
//!
//! let sphere = subdivide(&icosahedron())?;
//! assert_eq!(sphere.vertex_count(), 42);
//! assert_eq!(sphere.face_count(), 80);
//!
//! // Flat shading: one unit normal per face
//! let normals = face_normals(&sphere)?;
//! assert_eq!(normals.len(), 80);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```
//!
//! Several passes onto a larger sphere:
//!
//! ```
//! use mesh_types::icosahedron_with_radius;
//! use mesh_subdivide::{sphere_report, subdivide_mesh, SubdivideParams};
//!
//! let base = icosahedron_with_radius(3.0);
//! let params = SubdivideParams::spherical(3.0).with_iterations(2);
//! let result = subdivide_mesh(&base, &params)?;
//!
//! assert_eq!(result.final_faces, 320);
//! assert!(sphere_report(&result.mesh, 3.0, 1e-9).is_valid_sphere());
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

mod error;
mod normals;
mod params;
mod report;
mod result;
mod subdivide;
mod topology;

pub use error::{MeshDefect, SubdivideError, SubdivideResult};
pub use normals::{face_normal, face_normals, with_vertex_normals};
pub use params::{SubdivideParams, SubdivisionMethod};
pub use report::{SphereReport, sphere_report};
pub use result::SubdivisionResult;
pub use subdivide::{
    SPHERE_TOLERANCE, icosphere, subdivide, subdivide_mesh, subdivide_onto_sphere,
};
pub use topology::{EdgeMap, normalize_edge};
