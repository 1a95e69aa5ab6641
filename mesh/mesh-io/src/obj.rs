//! Wavefront OBJ file format support.
//!
//! The writer emits positions, one `vn` per face for flat shading, and
//! triangles that pair each corner with its face normal:
//!
//! ```text
//! v  x y z          (one per vertex)
//! vn nx ny nz       (one per face)
//! f  a//n b//n c//n (1-based)
//! ```
//!
//! The reader keeps positions and faces only. Face corners may be written
//! as `i`, `i/t`, `i//n` or `i/t/n`, and negative indices count back from
//! the most recent vertex. Polygons with more than three corners are split
//! into a triangle fan.

use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, MeshTopology, Vector3, Vertex};
use tracing::{debug, warn};

use crate::error::{IoError, IoResult};
use crate::{check_indices, create_file, read_file};

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not UTF-8, or contains
/// a malformed `v` or `f` line.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_obj;
///
/// let mesh = load_obj("sphere.obj")?;
/// println!("{} vertices", mesh.vertices.len());
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let bytes = read_file(path.as_ref())?;
    let text = std::str::from_utf8(&bytes)
        .map_err(|e| IoError::invalid_content(format!("OBJ is not UTF-8: {e}")))?;
    let mesh = parse_obj(text)?;
    debug!(
        "Loaded OBJ {}: {} vertices, {} faces",
        path.as_ref().display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

fn parse_obj(text: &str) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut skipped_polygons = 0_usize;

    for (line_idx, line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("v") => {
                let coords: Vec<f64> = parts.map(str::parse).collect::<Result<_, _>>()?;
                // An optional fourth weight component is ignored.
                let (Some(&x), Some(&y), Some(&z)) = (coords.first(), coords.get(1), coords.get(2))
                else {
                    return Err(IoError::parse(line_no, "vertex needs 3 coordinates"));
                };
                mesh.vertices.push(Vertex::from_coords(x, y, z));
            }
            Some("f") => {
                let corners = parts
                    .map(|token| resolve_index(token, mesh.vertices.len(), line_no))
                    .collect::<IoResult<Vec<u32>>>()?;
                if corners.len() < 3 {
                    skipped_polygons += 1;
                    continue;
                }
                for pair in corners[1..].windows(2) {
                    mesh.faces.push([corners[0], pair[0], pair[1]]);
                }
            }
            _ => {}
        }
    }

    if skipped_polygons > 0 {
        warn!("Skipped {skipped_polygons} OBJ faces with fewer than 3 corners");
    }

    Ok(mesh)
}

/// Turn a face corner token into a 0-based vertex index.
fn resolve_index(token: &str, vertex_count: usize, line_no: usize) -> IoResult<u32> {
    let position = token.split('/').next().unwrap_or(token);
    let raw: i64 = position
        .parse()
        .map_err(|_| IoError::parse(line_no, format!("bad face index `{token}`")))?;

    let count = i64::try_from(vertex_count).unwrap_or(i64::MAX);
    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => Some(count + r),
    };

    resolved
        .filter(|&i| (0..count).contains(&i))
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| {
            IoError::parse(
                line_no,
                format!("face index {raw} out of range for {vertex_count} vertices"),
            )
        })
}

/// Save a mesh to an OBJ file with per-face normals.
///
/// # Errors
///
/// Returns an error if a face references a missing vertex or the file
/// cannot be written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::save_obj;
/// use mesh_types::icosahedron;
///
/// save_obj(&icosahedron(), "ico.obj")?;
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn save_obj<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    check_indices(mesh)?;

    let mut writer = BufWriter::new(create_file(path.as_ref())?);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;

    debug!(
        "Saved OBJ {}: {} vertices, {} faces",
        path.as_ref().display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(())
}

fn write_obj<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "# written by mesh-io")?;
    writeln!(
        writer,
        "# {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    )?;

    for v in &mesh.vertices {
        let p = v.position;
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    for fi in 0..mesh.face_count() {
        let n = mesh
            .triangle(fi)
            .and_then(|tri| tri.normal())
            .unwrap_or_else(Vector3::zeros);
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    for (fi, &[a, b, c]) in mesh.faces.iter().enumerate() {
        let n = fi + 1;
        writeln!(writer, "f {}//{n} {}//{n} {}//{n}", a + 1, b + 1, c + 1)?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::icosahedron;

    fn to_text(mesh: &IndexedMesh) -> String {
        let mut out = Vec::new();
        write_obj(mesh, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writer_layout() {
        let text = to_text(&icosahedron());
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 12);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 20);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 20);
        // First face [0, 1, 4] with normal 1
        assert!(text.contains("\nf 1//1 2//1 5//1\n"));
    }

    #[test]
    fn roundtrip_is_exact() {
        let original = icosahedron();
        let loaded = parse_obj(&to_text(&original)).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn corner_forms() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n\
                    f 1 2 3\nf 2/1 4/2 3/3\nf 1//1 2//1 3//1\nf 1/1/1 2/2/2 3/3/3\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.faces[1], [1, 3, 2]);
        assert_eq!(mesh.faces[3], [0, 1, 2]);
    }

    #[test]
    fn negative_indices_and_fans() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf -4 -3 -2 -1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn ignores_other_statements() {
        let text = "# comment\no sphere\nv 0 0 0 1\nv 1 0 0\nv 0 1 0\nvt 0 0\ns off\nf 1 2 3\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn out_of_range_index() {
        let result = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2 3\n");
        assert!(matches!(result, Err(IoError::Parse { line: 3, .. })));

        let result = parse_obj("v 0 0 0\nf 0 1 1\n");
        assert!(matches!(result, Err(IoError::Parse { line: 2, .. })));
    }

    #[test]
    fn short_vertex() {
        let result = parse_obj("v 1 2\n");
        assert!(matches!(result, Err(IoError::Parse { line: 1, .. })));
    }

    #[test]
    fn roundtrip_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("ico.obj");

        save_obj(&icosahedron(), &path).unwrap();
        let loaded = load_obj(&path).unwrap();
        assert_eq!(loaded, icosahedron());
    }
}
