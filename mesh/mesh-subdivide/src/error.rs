//! Error types for mesh subdivision operations.

use thiserror::Error;

/// What is wrong with a mesh that cannot be subdivided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshDefect {
    /// Mesh has no vertices.
    NoVertices,

    /// Mesh has no faces.
    NoFaces,

    /// A face references a vertex that does not exist.
    IndexOutOfRange {
        /// Face containing the bad index.
        face: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A face index past the end of the face list.
    MissingFace {
        /// The requested face.
        face: usize,
        /// Number of faces in the mesh.
        face_count: usize,
    },

    /// A vertex sits at the origin and has no direction to project along.
    ZeroLengthVertex {
        /// Index of the vertex.
        vertex: usize,
    },

    /// A vertex is not on the sphere being subdivided onto.
    OffSphereVertex {
        /// Index of the vertex.
        vertex: usize,
        /// Its distance from the origin.
        radius: f64,
    },

    /// A vertex has a NaN or infinite coordinate.
    NonFiniteVertex {
        /// Index of the vertex.
        vertex: usize,
    },
}

impl std::fmt::Display for MeshDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoVertices => write!(f, "mesh has no vertices"),
            Self::NoFaces => write!(f, "mesh has no faces"),
            Self::IndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {face} references vertex {index}, but the mesh has {vertex_count} vertices"
            ),
            Self::MissingFace { face, face_count } => {
                write!(f, "face {face} requested, but the mesh has {face_count} faces")
            }
            Self::ZeroLengthVertex { vertex } => {
                write!(f, "vertex {vertex} is at the origin and cannot be normalized")
            }
            Self::OffSphereVertex { vertex, radius } => {
                write!(f, "vertex {vertex} is off the sphere (distance {radius})")
            }
            Self::NonFiniteVertex { vertex } => {
                write!(f, "vertex {vertex} has a non-finite coordinate")
            }
        }
    }
}

/// Errors that can occur during subdivision operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubdivideError {
    /// Input mesh is malformed.
    #[error("invalid mesh: {0}")]
    InvalidMesh(MeshDefect),

    /// An edge midpoint could not be placed on the sphere.
    ///
    /// Either the midpoint has zero length (antipodal endpoints) or it
    /// coincides with one of the edge's endpoints. This is a programming
    /// error in the caller, not something to recover from.
    #[error("degenerate midpoint on edge {edge:?}")]
    ArithmeticDegenerate {
        /// The offending edge, smaller index first.
        edge: (u32, u32),
    },

    /// A face has zero area and therefore no normal.
    #[error("face {face} is degenerate and has no normal")]
    DegenerateFace {
        /// Index of the face.
        face: usize,
    },

    /// Sphere radius is zero, negative, or not finite.
    #[error("invalid sphere radius: {0}")]
    InvalidRadius(f64),

    /// Invalid iteration count.
    #[error("invalid iteration count: {0} (must be >= 1)")]
    InvalidIterations(u32),

    /// Mesh would exceed maximum size.
    #[error(
        "subdivision would exceed maximum mesh size ({current} -> {projected} faces, max {max})"
    )]
    MeshTooLarge {
        /// Current face count.
        current: usize,
        /// Projected face count after subdivision.
        projected: usize,
        /// Maximum allowed face count.
        max: usize,
    },
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
