//! Render buffers for sphere meshes.
//!
//! This crate turns an [`IndexedMesh`](mesh_types::IndexedMesh) into the flat
//! arrays a rasterizer consumes: positions in attribute slot 0, normals in
//! slot 2, and a `u32` index buffer. It is renderer-agnostic; upload the
//! byte views with whatever graphics API you use.
//!
//! # Shading Modes
//!
//! | Mode | Vertices | Normals | Indices |
//! |------|----------|---------|---------|
//! | [`ShadingMode::Flat`] | 3 per face | face normal per corner | `0..3F` |
//! | [`ShadingMode::Smooth`] | shared | area-weighted average | face list |
//!
//! # Example
//!
//! ```
//! use mesh_buffers::{RenderBuffers, ShadingMode, NORMAL_SLOT};
//! use mesh_subdivide::icosphere;
//!
//! let sphere = icosphere(2, 1.0)?;
//! let buffers = RenderBuffers::from_mesh(&sphere, ShadingMode::Flat)?;
//!
//! assert_eq!(buffers.positions.len(), 9 * 320);
//! assert_eq!(buffers.index_bytes().len(), 4 * 3 * 320);
//! assert_eq!(NORMAL_SLOT, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod buffers;
pub mod error;

pub use buffers::{
    NORMAL_SLOT, POSITION_SLOT, RenderBuffers, RenderVertex, ShadingMode, VertexAttribute,
};
pub use error::{BufferError, BufferResult};
