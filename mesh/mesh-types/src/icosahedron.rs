//! The base icosahedron, the coarsest sphere approximation.

use crate::{IndexedMesh, Vertex};

/// `1 / sqrt(1 + phi^2)`, with `phi` the golden ratio.
pub const ICOSAHEDRON_X: f64 = 0.525_731_112_119_133_6;

/// `phi / sqrt(1 + phi^2)`, with `phi` the golden ratio.
pub const ICOSAHEDRON_Z: f64 = 0.850_650_808_352_039_9;

const X: f64 = ICOSAHEDRON_X;
const Z: f64 = ICOSAHEDRON_Z;

/// Unit-radius icosahedron vertex positions.
///
/// Three mutually orthogonal golden rectangles; every position satisfies
/// `X^2 + Z^2 = 1`.
pub const ICOSAHEDRON_VERTICES: [[f64; 3]; 12] = [
    [-X, 0.0, Z],
    [X, 0.0, Z],
    [-X, 0.0, -Z],
    [X, 0.0, -Z],
    [0.0, Z, X],
    [0.0, Z, -X],
    [0.0, -Z, X],
    [0.0, -Z, -X],
    [Z, X, 0.0],
    [-Z, X, 0.0],
    [Z, -X, 0.0],
    [-Z, -X, 0.0],
];

/// Icosahedron faces, counter-clockwise when viewed from outside.
pub const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 1, 4],
    [0, 4, 9],
    [9, 4, 5],
    [4, 8, 5],
    [4, 1, 8],
    [8, 1, 10],
    [8, 10, 3],
    [5, 8, 3],
    [5, 3, 2],
    [2, 3, 7],
    [7, 3, 10],
    [7, 10, 6],
    [7, 6, 11],
    [11, 6, 0],
    [0, 6, 1],
    [6, 10, 1],
    [9, 11, 0],
    [9, 2, 11],
    [9, 5, 2],
    [7, 11, 2],
];

/// Build the unit-radius icosahedron: 12 vertices, 20 faces, 30 edges.
///
/// # Example
///
/// ```
/// use mesh_types::{icosahedron, MeshTopology};
///
/// let ico = icosahedron();
/// assert_eq!(ico.vertex_count(), 12);
/// assert_eq!(ico.face_count(), 20);
/// assert!(ico.signed_volume() > 0.0);
/// ```
#[must_use]
pub fn icosahedron() -> IndexedMesh {
    icosahedron_with_radius(1.0)
}

/// Build an icosahedron whose vertices lie on a sphere of `radius`.
///
/// # Example
///
/// ```
/// use mesh_types::icosahedron_with_radius;
///
/// let ico = icosahedron_with_radius(2.5);
/// assert!(ico.max_radius_error(2.5) < 1e-12);
/// ```
#[must_use]
pub fn icosahedron_with_radius(radius: f64) -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(ICOSAHEDRON_VERTICES.len(), ICOSAHEDRON_FACES.len());

    mesh.vertices.extend(
        ICOSAHEDRON_VERTICES
            .iter()
            .map(|&[x, y, z]| Vertex::from_coords(x * radius, y * radius, z * radius)),
    );
    mesh.faces.extend_from_slice(&ICOSAHEDRON_FACES);

    mesh
}
