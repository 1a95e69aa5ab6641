//! Error types for render buffer construction.

use mesh_subdivide::{MeshDefect, SubdivideError};
use thiserror::Error;

/// Errors that can occur while building render buffers.
///
/// # Example
///
/// ```
/// use mesh_buffers::{BufferError, BufferResult};
///
/// fn check(count: usize) -> BufferResult<()> {
///     Err(BufferError::TooManyVertices { count, max: u32::MAX as usize })
/// }
/// assert!(check(1).is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BufferError {
    /// A face has zero area, so flat shading has no normal for it.
    #[error("face {face} is degenerate and has no normal")]
    DegenerateFace {
        /// Index of the face.
        face: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Face containing the bad index.
        face: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// The buffer would need more vertices than a `u32` index can address.
    #[error("too many vertices for a u32 index buffer: {count}, max supported: {max}")]
    TooManyVertices {
        /// Vertices the buffer would hold.
        count: usize,
        /// Maximum addressable vertices.
        max: usize,
    },

    /// Normal computation rejected the mesh for another reason.
    #[error("normal computation failed: {0}")]
    Normals(SubdivideError),
}

impl From<SubdivideError> for BufferError {
    fn from(err: SubdivideError) -> Self {
        match err {
            SubdivideError::DegenerateFace { face } => Self::DegenerateFace { face },
            SubdivideError::InvalidMesh(MeshDefect::IndexOutOfRange {
                face,
                index,
                vertex_count,
            }) => Self::IndexOutOfRange {
                face,
                index,
                vertex_count,
            },
            other => Self::Normals(other),
        }
    }
}

/// Result type for buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;
