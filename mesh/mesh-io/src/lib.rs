//! Mesh file I/O for sphere meshes.
//!
//! This crate provides loading and saving of triangle meshes in two formats:
//!
//! - **OBJ** (Wavefront) - ASCII, written with one normal per face
//! - **STL** (Stereolithography) - Binary and ASCII
//!
//! Both loaders return an indexed mesh; STL corners are welded back into
//! shared vertices.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_mesh, save_mesh};
//! use mesh_types::icosahedron;
//!
//! // Format detected from the extension
//! save_mesh(&icosahedron(), "ico.obj")?;
//! let mesh = load_mesh("ico.obj")?;
//! assert_eq!(mesh.faces.len(), 20);
//! # Ok::<(), mesh_io::IoError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;
mod stl;

pub use error::{IoError, IoResult};
pub use obj::{load_obj, save_obj};
pub use stl::{load_stl, save_stl};

use std::fs::File;
use std::path::Path;

use mesh_types::IndexedMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format.
    /// Saved as binary; binary and ASCII are both loaded.
    Stl,
    /// OBJ (Wavefront) format.
    /// ASCII only, vertices, per-face normals and triangles.
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension, ignoring case.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Match an extension without the leading dot.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }
}

impl std::fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stl => write!(f, "STL"),
            Self::Obj => write!(f, "OBJ"),
        }
    }
}

fn detect_format(path: &Path) -> IoResult<MeshFormat> {
    MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    match detect_format(path)? {
        MeshFormat::Stl => load_stl(path),
        MeshFormat::Obj => load_obj(path),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - A face references a missing vertex
/// - The file cannot be written
pub fn save_mesh<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match detect_format(path)? {
        MeshFormat::Stl => save_stl(mesh, path, true),
        MeshFormat::Obj => save_obj(mesh, path),
    }
}

/// Read a whole file, reporting a missing file as [`IoError::FileNotFound`].
fn read_file(path: &Path) -> IoResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })
}

fn create_file(path: &Path) -> IoResult<File> {
    Ok(File::create(path)?)
}

/// Refuse to write a mesh whose faces point past the vertex list.
fn check_indices(mesh: &IndexedMesh) -> IoResult<()> {
    match mesh.first_out_of_range_index() {
        Some((face, index)) => Err(IoError::InvalidMesh {
            face,
            index,
            vertex_count: mesh.vertices.len(),
        }),
        None => Ok(()),
    }
}
