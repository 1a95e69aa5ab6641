//! Icosphere toolkit: subdivision, shading buffers, export and render state.
//!
//! This umbrella crate re-exports the mesh-* crates behind one dependency.
//! None of them touch a window or a GPU, so the same code runs in CLI tools,
//! tests and render loops alike.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! // Three passes over the icosahedron: 642 vertices, 1280 triangles
//! let sphere = icosphere(3, 1.0).unwrap();
//! assert!(sphere_report(&sphere, 1.0, 1e-9).is_valid_sphere());
//!
//! // Flat-shaded buffers for upload
//! let buffers = RenderBuffers::from_mesh(&sphere, ShadingMode::Flat).unwrap();
//! assert_eq!(buffers.indices.len(), 3 * 1280);
//!
//! // Save the result
//! save_mesh(&sphere, "sphere.obj").unwrap();
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, `Triangle`,
//!   and the base icosahedron
//! - [`subdivide`] - Spherical and midpoint subdivision, normals, sphere checks
//! - [`buffers`] - Flat and smooth vertex buffers with attribute slots
//! - [`io`] - OBJ and STL loading and saving
//! - [`scene`] - Camera, model transform, lighting and input handling
//!
//! # Feature Flags
//!
//! - `serde` - Serialize and deserialize data types, params and render state

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![doc(html_root_url = "https://docs.rs/mesh/0.7.0")]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures and the base icosahedron.
pub use mesh_types as types;

/// Spherical and midpoint subdivision.
pub use mesh_subdivide as subdivide;

/// Vertex buffers for flat and smooth shading.
pub use mesh_buffers as buffers;

/// OBJ and STL file I/O.
pub use mesh_io as io;

/// Camera, model transform, lighting and input state.
pub use mesh_scene as scene;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for building and viewing spheres.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{IndexedMesh, MeshTopology, Triangle, Vertex, icosahedron};

    // Subdivision
    pub use mesh_subdivide::{
        SubdivideParams, SubdivisionMethod, icosphere, sphere_report, subdivide, subdivide_mesh,
    };

    // Buffers
    pub use mesh_buffers::{RenderBuffers, ShadingMode};

    // I/O
    pub use mesh_io::{MeshFormat, load_mesh, save_mesh};

    // Render state
    pub use mesh_scene::{InputEvent, InputQueue, RenderContext};
}

// =============================================================================
// Tests
// =============================================================================
