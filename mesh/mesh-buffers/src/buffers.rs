//! Render buffer types for sphere meshes.
//!
//! This module flattens an [`IndexedMesh`] into the arrays a rasterizer
//! binds as vertex attributes.
//!
//! # Memory Layout
//!
//! - positions: `[f32; 3]` per vertex, attribute slot [`POSITION_SLOT`]
//! - normals: `[f32; 3]` per vertex, attribute slot [`NORMAL_SLOT`]
//! - indices: `u32`, three per triangle
//! - [`RenderVertex`]: 24 bytes (position + normal), for interleaved upload

use bytemuck::{Pod, Zeroable};
use mesh_subdivide::{face_normals, with_vertex_normals};
use mesh_types::{IndexedMesh, Point3, Vector3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{BufferError, BufferResult};

/// Vertex attribute slot bound to the position stream.
pub const POSITION_SLOT: u32 = 0;

/// Vertex attribute slot bound to the normal stream.
pub const NORMAL_SLOT: u32 = 2;

/// How normals are laid out across faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShadingMode {
    /// One normal per face. Every face corner gets its own vertex copy.
    #[default]
    Flat,

    /// Shared vertices with area-weighted averaged normals.
    Smooth,
}

/// One vertex attribute in an interleaved [`RenderVertex`] stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute slot.
    pub slot: u32,
    /// Byte offset inside [`RenderVertex`].
    pub offset: u64,
    /// Number of `f32` components.
    pub components: u32,
}

/// Interleaved position and normal.
///
/// # Memory Layout
///
/// Total size: 24 bytes
/// - position: 12 bytes (vec3)
/// - normal: 12 bytes (vec3)
///
/// # Example
///
/// ```
/// use mesh_buffers::RenderVertex;
///
/// let v = RenderVertex::new([0.0, 0.0, 1.0], [0.0, 0.0, 1.0]);
/// assert_eq!(std::mem::size_of::<RenderVertex>(), 24);
/// assert_eq!(bytemuck::bytes_of(&v).len(), 24);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct RenderVertex {
    /// Vertex position (xyz).
    pub position: [f32; 3],
    /// Unit normal (xyz).
    pub normal: [f32; 3],
}

impl RenderVertex {
    /// Attribute descriptions for an interleaved buffer.
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute {
            slot: POSITION_SLOT,
            offset: 0,
            components: 3,
        },
        VertexAttribute {
            slot: NORMAL_SLOT,
            offset: 12,
            components: 3,
        },
    ];

    /// Create a vertex from a position and a normal.
    #[must_use]
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Byte stride between consecutive vertices.
    #[must_use]
    pub const fn stride() -> u64 {
        std::mem::size_of::<Self>() as u64
    }
}

/// Flat attribute arrays ready for upload.
///
/// `positions` and `normals` are parallel: entry `i` of each describes
/// vertex `i`. `face_normals` holds one normal per triangle regardless of
/// the shading mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderBuffers {
    /// xyz per vertex.
    pub positions: Vec<f32>,
    /// xyz per vertex.
    pub normals: Vec<f32>,
    /// Three per triangle, counter-clockwise from outside.
    pub indices: Vec<u32>,
    /// xyz per triangle.
    pub face_normals: Vec<f32>,
    /// Layout the buffers were built with.
    pub mode: ShadingMode,
}

impl RenderBuffers {
    /// Build buffers from `mesh` using `mode`.
    ///
    /// # Errors
    ///
    /// - [`BufferError::IndexOutOfRange`] if a face references a missing vertex
    /// - [`BufferError::DegenerateFace`] if a face has zero area
    /// - [`BufferError::TooManyVertices`] if the vertex count overflows `u32`
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::icosahedron;
    /// use mesh_buffers::{RenderBuffers, ShadingMode};
    ///
    /// let buffers = RenderBuffers::from_mesh(&icosahedron(), ShadingMode::Flat)?;
    /// assert_eq!(buffers.vertex_count(), 60);
    /// assert_eq!(buffers.indices.len(), 60);
    /// # Ok::<(), mesh_buffers::BufferError>(())
    /// ```
    pub fn from_mesh(mesh: &IndexedMesh, mode: ShadingMode) -> BufferResult<Self> {
        if let Some((face, index)) = mesh.first_out_of_range_index() {
            return Err(BufferError::IndexOutOfRange {
                face,
                index,
                vertex_count: mesh.vertices.len(),
            });
        }

        let normals_per_face = face_normals(mesh)?;
        let buffers = match mode {
            ShadingMode::Flat => Self::flat(mesh, &normals_per_face)?,
            ShadingMode::Smooth => Self::smooth(mesh, &normals_per_face)?,
        };

        debug!(
            "Built {:?} render buffers: {} vertices, {} triangles",
            mode,
            buffers.vertex_count(),
            buffers.triangle_count()
        );

        Ok(buffers)
    }

    /// Per-face-corner layout; indices are `0..3F`.
    fn flat(mesh: &IndexedMesh, normals_per_face: &[Vector3<f64>]) -> BufferResult<Self> {
        let corner_count = mesh.faces.len().saturating_mul(3);
        check_addressable(corner_count)?;

        let mut positions = Vec::with_capacity(corner_count * 3);
        let mut normals = Vec::with_capacity(corner_count * 3);

        for (face, normal) in mesh.faces.iter().zip(normals_per_face) {
            for &index in face {
                positions.extend_from_slice(&point_to_f32(&mesh.vertices[index as usize].position));
                normals.extend_from_slice(&vector_to_f32(normal));
            }
        }

        // Bounded by check_addressable
        #[allow(clippy::cast_possible_truncation)]
        let indices = (0..corner_count as u32).collect();

        Ok(Self {
            positions,
            normals,
            indices,
            face_normals: flatten_normals(normals_per_face),
            mode: ShadingMode::Flat,
        })
    }

    /// Shared-vertex layout; indices are the face list.
    fn smooth(mesh: &IndexedMesh, normals_per_face: &[Vector3<f64>]) -> BufferResult<Self> {
        check_addressable(mesh.vertices.len())?;

        let shaded = with_vertex_normals(mesh)?;
        let mut positions = Vec::with_capacity(shaded.vertices.len() * 3);
        let mut normals = Vec::with_capacity(shaded.vertices.len() * 3);

        for v in &shaded.vertices {
            positions.extend_from_slice(&point_to_f32(&v.position));
            normals.extend_from_slice(&v.normal.map_or([0.0; 3], |n| vector_to_f32(&n)));
        }

        Ok(Self {
            positions,
            normals,
            indices: mesh.faces.iter().flatten().copied().collect(),
            face_normals: flatten_normals(normals_per_face),
            mode: ShadingMode::Smooth,
        })
    }

    /// Number of vertices in the position stream.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the index stream.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position stream as raw bytes.
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normal stream as raw bytes.
    #[must_use]
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Index stream as raw bytes.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Total bytes across the position, normal and index streams.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.position_bytes().len() + self.normal_bytes().len() + self.index_bytes().len()
    }

    /// Positions and normals zipped into one interleaved stream.
    #[must_use]
    pub fn interleaved(&self) -> Vec<RenderVertex> {
        self.positions
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
            .map(|(p, n)| RenderVertex::new([p[0], p[1], p[2]], [n[0], n[1], n[2]]))
            .collect()
    }
}

fn check_addressable(count: usize) -> BufferResult<()> {
    let max = u32::MAX as usize;
    if count > max {
        return Err(BufferError::TooManyVertices { count, max });
    }
    Ok(())
}

// Truncation: f64 to f32 conversion is intentional for rendering
#[allow(clippy::cast_possible_truncation)]
fn point_to_f32(p: &Point3<f64>) -> [f32; 3] {
    [p.x as f32, p.y as f32, p.z as f32]
}

#[allow(clippy::cast_possible_truncation)]
fn vector_to_f32(v: &Vector3<f64>) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

fn flatten_normals(normals: &[Vector3<f64>]) -> Vec<f32> {
    normals.iter().flat_map(vector_to_f32).collect()
}
