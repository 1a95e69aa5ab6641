//! Outcome of a multi-pass subdivision.

// Face counts fit well within f64's exact integer range
#![allow(clippy::cast_precision_loss)]

use mesh_types::IndexedMesh;

use crate::params::SubdivisionMethod;

/// Result of [`subdivide_mesh`](crate::subdivide_mesh).
#[derive(Debug, Clone)]
pub struct SubdivisionResult {
    /// The refined mesh.
    pub mesh: IndexedMesh,

    /// Faces before the first pass.
    pub original_faces: usize,

    /// Faces after the last pass.
    pub final_faces: usize,

    /// Vertices before the first pass.
    pub original_vertices: usize,

    /// Vertices after the last pass.
    pub final_vertices: usize,

    /// Number of passes performed.
    pub iterations: u32,

    /// How edge vertices were placed.
    pub method: SubdivisionMethod,
}

impl SubdivisionResult {
    /// Face multiplication factor (`4^iterations` for a valid run).
    #[must_use]
    pub fn face_ratio(&self) -> f64 {
        if self.original_faces == 0 {
            1.0
        } else {
            self.final_faces as f64 / self.original_faces as f64
        }
    }

    /// Vertex multiplication factor.
    #[must_use]
    pub fn vertex_ratio(&self) -> f64 {
        if self.original_vertices == 0 {
            1.0
        } else {
            self.final_vertices as f64 / self.original_vertices as f64
        }
    }

    /// Number of vertices created across all passes.
    #[must_use]
    pub const fn added_vertices(&self) -> usize {
        self.final_vertices.saturating_sub(self.original_vertices)
    }

    /// Check if any subdivision occurred.
    #[must_use]
    pub const fn was_subdivided(&self) -> bool {
        self.iterations > 0 && self.final_faces > self.original_faces
    }

    /// Consume the result, keeping only the mesh.
    #[must_use]
    pub fn into_mesh(self) -> IndexedMesh {
        self.mesh
    }
}

impl std::fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} subdivision x{}: {} -> {} faces ({:.1}x), {} -> {} vertices",
            self.method,
            self.iterations,
            self.original_faces,
            self.final_faces,
            self.face_ratio(),
            self.original_vertices,
            self.final_vertices
        )
    }
}
