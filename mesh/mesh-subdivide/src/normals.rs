//! Face and vertex normals.
//!
//! Flat shading uses one normal per face; smooth shading averages the face
//! normals around each vertex, weighted by face area.

use mesh_types::{IndexedMesh, MeshTopology, Vector3};

use crate::error::{MeshDefect, SubdivideError, SubdivideResult};

/// Unit normal of face `face`: `normalize((B - A) x (C - A))`.
///
/// # Errors
///
/// - [`SubdivideError::InvalidMesh`] if the face does not exist or
///   references a missing vertex
/// - [`SubdivideError::DegenerateFace`] if the face has zero area
///
/// # Example
///
/// ```
/// use mesh_types::icosahedron;
/// use mesh_subdivide::face_normal;
///
/// let ico = icosahedron();
/// let n = face_normal(&ico, 0)?;
/// assert!((n.norm() - 1.0).abs() < 1e-12);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn face_normal(mesh: &IndexedMesh, face: usize) -> SubdivideResult<Vector3<f64>> {
    let Some(&[a, b, c]) = mesh.faces.get(face) else {
        return Err(SubdivideError::InvalidMesh(MeshDefect::MissingFace {
            face,
            face_count: mesh.faces.len(),
        }));
    };

    let vertex_count = mesh.vertices.len();
    for index in [a, b, c] {
        if index as usize >= vertex_count {
            return Err(SubdivideError::InvalidMesh(MeshDefect::IndexOutOfRange {
                face,
                index,
                vertex_count,
            }));
        }
    }

    mesh.triangle(face)
        .and_then(|tri| tri.normal())
        .ok_or(SubdivideError::DegenerateFace { face })
}

/// Unit normals for every face, in face order.
///
/// # Errors
///
/// Fails on the first face that [`face_normal`] rejects.
pub fn face_normals(mesh: &IndexedMesh) -> SubdivideResult<Vec<Vector3<f64>>> {
    (0..mesh.faces.len())
        .map(|face| face_normal(mesh, face))
        .collect()
}

/// Copy of `mesh` with an area-weighted vertex normal attached to every
/// vertex.
///
/// Vertices that no face references get their radial direction, or no
/// normal if they sit at the origin.
///
/// # Errors
///
/// As [`face_normals`]; degenerate faces are rejected rather than skipped.
///
/// # Example
///
/// ```
/// use mesh_types::icosahedron;
/// use mesh_subdivide::{subdivide, with_vertex_normals};
///
/// let sphere = with_vertex_normals(&subdivide(&icosahedron())?)?;
/// for v in &sphere.vertices {
///     let n = v.normal.expect("every vertex has a normal");
///     // On a sphere the smooth normal is close to the radial direction.
///     assert!(n.dot(&v.position.coords) > 0.95);
/// }
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn with_vertex_normals(mesh: &IndexedMesh) -> SubdivideResult<IndexedMesh> {
    let mut sums = vec![Vector3::zeros(); mesh.vertices.len()];

    for (face, &[a, b, c]) in mesh.faces.iter().enumerate() {
        // Validates indices and rejects zero-area faces.
        face_normal(mesh, face)?;

        let Some(tri) = mesh.triangle(face) else {
            continue;
        };
        // Magnitude is twice the area, which gives the weighting.
        let weighted = tri.normal_unnormalized();
        for index in [a, b, c] {
            sums[index as usize] += weighted;
        }
    }

    let mut out = mesh.clone();
    for (vertex, sum) in out.vertices.iter_mut().zip(sums) {
        vertex.normal = sum
            .try_normalize(f64::EPSILON)
            .or_else(|| vertex.position.coords.try_normalize(f64::EPSILON));
    }

    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{Vertex, icosahedron};

    #[test]
    fn test_face_normal_follows_winding() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 1.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 1.0));
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([0, 2, 1]);

        let up = face_normal(&mesh, 0).unwrap();
        let down = face_normal(&mesh, 1).unwrap();
        assert_relative_eq!(up.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(down.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_icosahedron_normals_outward() {
        let ico = icosahedron();
        let normals = face_normals(&ico).unwrap();
        assert_eq!(normals.len(), 20);

        for (face, n) in normals.iter().enumerate() {
            let [a, _, _] = ico.faces[face];
            assert!(n.dot(&ico.vertices[a as usize].position.coords) > 0.0);
        }
    }

    #[test]
    fn test_degenerate_face() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(2.0, 0.0, 0.0));
        mesh.faces.push([0, 1, 2]);

        assert!(matches!(
            face_normals(&mesh),
            Err(SubdivideError::DegenerateFace { face: 0 })
        ));
    }

    #[test]
    fn test_bad_indices() {
        let mut mesh = icosahedron();
        mesh.faces.push([0, 1, 40]);

        assert!(matches!(
            face_normal(&mesh, 20),
            Err(SubdivideError::InvalidMesh(MeshDefect::IndexOutOfRange {
                face: 20,
                index: 40,
                vertex_count: 12
            }))
        ));
        assert!(matches!(
            face_normal(&mesh, 21),
            Err(SubdivideError::InvalidMesh(MeshDefect::MissingFace {
                face: 21,
                face_count: 21
            }))
        ));
        assert!(with_vertex_normals(&mesh).is_err());
    }

    #[test]
    fn test_vertex_normals_radial_on_icosahedron() {
        // Every vertex of a regular icosahedron is surrounded symmetrically,
        // so the averaged normal is exactly radial.
        let ico = with_vertex_normals(&icosahedron()).unwrap();
        for v in &ico.vertices {
            let n = v.normal.unwrap();
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(n.dot(&v.position.coords), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_unreferenced_vertex_gets_radial_normal() {
        let mut mesh = icosahedron();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 2.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));

        let out = with_vertex_normals(&mesh).unwrap();
        let n = out.vertices[12].normal.unwrap();
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
        assert!(out.vertices[13].normal.is_none());
    }
}
