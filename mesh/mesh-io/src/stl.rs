//! STL (Stereolithography) file format support.
//!
//! Supports both ASCII and binary STL formats.
//!
//! STL stores a triangle soup: every facet carries its own three corners.
//! The loader welds corners with identical coordinates back into shared
//! vertices, so a sphere written and read back keeps its topology.
//!
//! # Format Detection
//!
//! A file is binary when its size is exactly `84 + 50 * n`, where `n` is
//! the face count stored after the 80-byte header. Otherwise it must start
//! with `solid` and is parsed as ASCII.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```

use std::io::{BufWriter, Write};
use std::path::Path;

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, MeshTopology, Point3, Vector3, Vertex};
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::{check_indices, create_file, read_file};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Header plus the face count.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

const HEADER_TEXT: &[u8] = b"binary STL written by mesh-io";

/// Load a mesh from an STL file.
///
/// Detects ASCII vs binary format and welds coincident corners.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file content is not valid STL
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let mesh = load_stl("sphere.stl")?;
/// println!("Loaded {} faces", mesh.faces.len());
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let bytes = read_file(path.as_ref())?;
    let mesh = parse_stl(&bytes)?;
    debug!(
        "Loaded STL {}: {} vertices, {} faces",
        path.as_ref().display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Parse STL data held in memory.
fn parse_stl(bytes: &[u8]) -> IoResult<IndexedMesh> {
    if let Some(face_count) = binary_face_count(bytes) {
        return parse_binary(bytes, face_count);
    }

    let text = String::from_utf8_lossy(bytes);
    if text.trim_start().starts_with("solid") {
        parse_ascii(&text)
    } else if bytes.len() < PREAMBLE_SIZE {
        Err(IoError::InvalidHeader {
            expected: PREAMBLE_SIZE,
            got: bytes.len(),
        })
    } else {
        let declared = read_u32(bytes, HEADER_SIZE);
        let available = (bytes.len() - PREAMBLE_SIZE) / TRIANGLE_SIZE;
        Err(IoError::InvalidFaceCount {
            expected: declared,
            got: u32::try_from(available).unwrap_or(u32::MAX),
        })
    }
}

/// Face count of a well-formed binary file, or `None`.
fn binary_face_count(bytes: &[u8]) -> Option<u32> {
    if bytes.len() < PREAMBLE_SIZE {
        return None;
    }
    let count = read_u32(bytes, HEADER_SIZE);
    let expected = (count as usize)
        .checked_mul(TRIANGLE_SIZE)?
        .checked_add(PREAMBLE_SIZE)?;
    (expected == bytes.len()).then_some(count)
}

fn parse_binary(bytes: &[u8], face_count: u32) -> IoResult<IndexedMesh> {
    let mut welder = Welder::with_capacity(face_count as usize);

    for facet in bytes[PREAMBLE_SIZE..].chunks_exact(TRIANGLE_SIZE) {
        // Skip the stored normal; it is recomputed from the winding.
        welder.push_face([
            read_point(facet, 12),
            read_point(facet, 24),
            read_point(facet, 36),
        ])?;
    }

    Ok(welder.finish())
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_bits(read_u32(bytes, offset))
}

fn read_point(facet: &[u8], offset: usize) -> Point3<f64> {
    Point3::new(
        f64::from(read_f32(facet, offset)),
        f64::from(read_f32(facet, offset + 4)),
        f64::from(read_f32(facet, offset + 8)),
    )
}

fn parse_ascii(text: &str) -> IoResult<IndexedMesh> {
    let mut welder = Welder::with_capacity(0);
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);
    let mut in_loop = false;

    for (line_idx, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "outer" => {
                in_loop = true;
                corners.clear();
            }
            "vertex" if in_loop => {
                let coords: Vec<f64> = parts.map(str::parse).collect::<Result<_, _>>()?;
                let [x, y, z] = coords[..] else {
                    return Err(IoError::parse(line_idx + 1, "vertex needs 3 coordinates"));
                };
                corners.push(Point3::new(x, y, z));
            }
            "endloop" => in_loop = false,
            "endfacet" => {
                let [a, b, c] = corners[..] else {
                    return Err(IoError::parse(
                        line_idx + 1,
                        format!("facet has {} vertices, expected 3", corners.len()),
                    ));
                };
                welder.push_face([a, b, c])?;
                corners.clear();
            }
            "endsolid" => break,
            _ => {}
        }
    }

    Ok(welder.finish())
}

/// Merges corners with bit-identical coordinates into shared vertices.
struct Welder {
    lookup: HashMap<[u64; 3], u32>,
    mesh: IndexedMesh,
}

impl Welder {
    fn with_capacity(faces: usize) -> Self {
        Self {
            // A closed mesh has about half as many vertices as faces.
            lookup: HashMap::with_capacity(faces / 2 + 3),
            mesh: IndexedMesh::with_capacity(faces / 2 + 3, faces),
        }
    }

    fn vertex(&mut self, p: Point3<f64>) -> IoResult<u32> {
        // +0.0 folds -0.0 onto 0.0 so both weld together.
        let key = [(p.x + 0.0).to_bits(), (p.y + 0.0).to_bits(), (p.z + 0.0).to_bits()];
        if let Some(&index) = self.lookup.get(&key) {
            return Ok(index);
        }

        let index = u32::try_from(self.mesh.vertices.len())
            .map_err(|_| IoError::invalid_content("more vertices than a u32 index can address"))?;
        self.mesh.vertices.push(Vertex::new(p));
        self.lookup.insert(key, index);
        Ok(index)
    }

    fn push_face(&mut self, corners: [Point3<f64>; 3]) -> IoResult<()> {
        let [a, b, c] = corners;
        let face = [self.vertex(a)?, self.vertex(b)?, self.vertex(c)?];
        self.mesh.faces.push(face);
        Ok(())
    }

    fn finish(self) -> IndexedMesh {
        self.mesh
    }
}

/// Save a mesh to an STL file.
///
/// Facet normals are computed from the winding; degenerate faces get a
/// zero normal.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `binary` - If true, save as binary STL; if false, save as ASCII
///
/// # Errors
///
/// Returns an error if a face references a missing vertex or the file
/// cannot be written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::save_stl;
/// use mesh_types::icosahedron;
///
/// save_stl(&icosahedron(), "ico.stl", true)?;
/// save_stl(&icosahedron(), "ico_ascii.stl", false)?;
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn save_stl<P: AsRef<Path>>(mesh: &IndexedMesh, path: P, binary: bool) -> IoResult<()> {
    check_indices(mesh)?;

    let mut writer = BufWriter::new(create_file(path.as_ref())?);
    if binary {
        write_binary(mesh, &mut writer)?;
    } else {
        write_ascii(mesh, &mut writer)?;
    }
    writer.flush()?;

    debug!(
        "Saved {} STL {}: {} faces",
        if binary { "binary" } else { "ASCII" },
        path.as_ref().display(),
        mesh.face_count()
    );
    Ok(())
}

/// Facet corners and unit normal (zero for degenerate faces).
fn facets(mesh: &IndexedMesh) -> impl Iterator<Item = ([f64; 3], [Point3<f64>; 3])> + '_ {
    (0..mesh.face_count()).filter_map(|fi| {
        let tri = mesh.triangle(fi)?;
        let n = tri.normal().unwrap_or_else(Vector3::zeros);
        Some(([n.x, n.y, n.z], tri.vertices()))
    })
}

// Truncation: STL stores f32
#[allow(clippy::cast_possible_truncation)]
fn write_binary<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    let face_count = u32::try_from(mesh.faces.len())
        .map_err(|_| IoError::invalid_content("binary STL holds at most u32::MAX faces"))?;

    let mut header = [b' '; HEADER_SIZE];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;
    writer.write_all(&face_count.to_le_bytes())?;

    for (normal, corners) in facets(mesh) {
        for value in normal {
            writer.write_all(&(value as f32).to_le_bytes())?;
        }
        for p in corners {
            for value in [p.x, p.y, p.z] {
                writer.write_all(&(value as f32).to_le_bytes())?;
            }
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

fn write_ascii<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "solid icosphere")?;

    for ([nx, ny, nz], corners) in facets(mesh) {
        writeln!(writer, "  facet normal {nx:.9e} {ny:.9e} {nz:.9e}")?;
        writeln!(writer, "    outer loop")?;
        for p in corners {
            writeln!(writer, "      vertex {:.17e} {:.17e} {:.17e}", p.x, p.y, p.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid icosphere")?;
    Ok(())
}
