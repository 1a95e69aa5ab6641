//! Sphere mesh health reporting.

// Mesh sizes are far below i64::MAX
#![allow(clippy::cast_possible_wrap)]

use mesh_types::{IndexedMesh, MeshTopology};

use crate::topology::EdgeMap;

/// How closely a mesh matches a closed, outward-wound sphere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SphereReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of faces.
    pub face_count: usize,
    /// Number of distinct edges.
    pub edge_count: usize,

    /// Radius the mesh was checked against.
    pub radius: f64,
    /// Allowed radial deviation.
    pub tolerance: f64,
    /// Largest `| |v| - radius |` over all vertices.
    pub max_radius_error: f64,
    /// Vertices farther than `tolerance` from the sphere.
    pub off_sphere_vertex_count: usize,

    /// Faces whose normal points toward the origin.
    pub inward_face_count: usize,
    /// Faces with zero area.
    pub degenerate_face_count: usize,
    /// Faces referencing a vertex that does not exist.
    pub invalid_face_count: usize,

    /// Edges used by a single face.
    pub boundary_edge_count: usize,
    /// Edges used by more than two faces.
    pub non_manifold_edge_count: usize,
    /// Every edge shared by exactly two faces.
    pub is_watertight: bool,
    /// No edge shared by more than two faces.
    pub is_manifold: bool,
}

impl SphereReport {
    /// `V - E + F`; 2 for any closed genus-0 surface.
    #[must_use]
    pub const fn euler_characteristic(&self) -> i64 {
        self.vertex_count as i64 - self.edge_count as i64 + self.face_count as i64
    }

    /// Whether the mesh is a valid sphere approximation.
    ///
    /// Requires at least one face, every vertex on the sphere, every face
    /// wound outward and non-degenerate, and a closed manifold surface.
    #[must_use]
    pub const fn is_valid_sphere(&self) -> bool {
        self.face_count > 0
            && self.off_sphere_vertex_count == 0
            && self.inward_face_count == 0
            && self.degenerate_face_count == 0
            && self.invalid_face_count == 0
            && self.is_watertight
            && self.is_manifold
    }
}

impl std::fmt::Display for SphereReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let yes_no = |flag: bool| if flag { "Yes" } else { "No" };

        writeln!(f, "Sphere Report (radius {}):", self.radius)?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f, "  Euler characteristic: {}", self.euler_characteristic())?;
        writeln!(f, "  Max radius error: {:.3e}", self.max_radius_error)?;
        writeln!(f)?;
        writeln!(f, "  Status:")?;
        writeln!(f, "    Watertight: {}", yes_no(self.is_watertight))?;
        writeln!(f, "    Manifold: {}", yes_no(self.is_manifold))?;
        writeln!(f, "    Valid sphere: {}", yes_no(self.is_valid_sphere()))?;

        let issues = [
            ("Off-sphere vertices", self.off_sphere_vertex_count),
            ("Inward faces", self.inward_face_count),
            ("Degenerate faces", self.degenerate_face_count),
            ("Invalid faces", self.invalid_face_count),
            ("Boundary edges", self.boundary_edge_count),
            ("Non-manifold edges", self.non_manifold_edge_count),
        ];
        if issues.iter().any(|&(_, n)| n > 0) {
            writeln!(f)?;
            writeln!(f, "  Issues:")?;
            for (label, count) in issues {
                if count > 0 {
                    writeln!(f, "    {label}: {count}")?;
                }
            }
        }

        Ok(())
    }
}

/// Check `mesh` against the sphere of `radius` centred at the origin.
///
/// A vertex is on the sphere when its distance from the origin is within
/// `tolerance` of `radius`. Non-finite vertices are always off the sphere.
///
/// # Example
///
/// ```
/// use mesh_types::icosahedron;
/// use mesh_subdivide::{sphere_report, subdivide};
///
/// let sphere = subdivide(&icosahedron())?;
/// let report = sphere_report(&sphere, 1.0, 1e-9);
///
/// assert!(report.is_valid_sphere());
/// assert_eq!(report.edge_count, 120);
/// assert_eq!(report.euler_characteristic(), 2);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
#[must_use]
pub fn sphere_report(mesh: &IndexedMesh, radius: f64, tolerance: f64) -> SphereReport {
    let edges = EdgeMap::build(&mesh.faces);

    let mut max_radius_error: f64 = 0.0;
    let mut off_sphere_vertex_count = 0;
    for v in &mesh.vertices {
        let error = (v.radius() - radius).abs();
        // NaN compares false, so it lands in the off-sphere count.
        if error <= tolerance {
            max_radius_error = max_radius_error.max(error);
        } else if error.is_nan() {
            max_radius_error = f64::INFINITY;
            off_sphere_vertex_count += 1;
        } else {
            max_radius_error = max_radius_error.max(error);
            off_sphere_vertex_count += 1;
        }
    }

    let mut inward_face_count = 0;
    let mut degenerate_face_count = 0;
    let mut invalid_face_count = 0;
    for face in 0..mesh.face_count() {
        match mesh.triangle(face) {
            None => invalid_face_count += 1,
            Some(tri) => match tri.normal() {
                None => degenerate_face_count += 1,
                Some(n) if n.dot(&tri.centroid().coords) <= 0.0 => inward_face_count += 1,
                Some(_) => {}
            },
        }
    }

    SphereReport {
        vertex_count: mesh.vertex_count(),
        face_count: mesh.face_count(),
        edge_count: edges.edge_count(),
        radius,
        tolerance,
        max_radius_error,
        off_sphere_vertex_count,
        inward_face_count,
        degenerate_face_count,
        invalid_face_count,
        boundary_edge_count: edges.boundary_edge_count(),
        non_manifold_edge_count: edges.non_manifold_edge_count(),
        is_watertight: edges.is_watertight(),
        is_manifold: edges.non_manifold_edge_count() == 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mesh_types::{Vertex, icosahedron, icosahedron_with_radius};

    #[test]
    fn test_icosahedron_is_valid() {
        let report = sphere_report(&icosahedron(), 1.0, 1e-9);
        assert_eq!(report.vertex_count, 12);
        assert_eq!(report.face_count, 20);
        assert_eq!(report.edge_count, 30);
        assert_eq!(report.euler_characteristic(), 2);
        assert!(report.is_valid_sphere());
    }

    #[test]
    fn test_wrong_radius() {
        let report = sphere_report(&icosahedron_with_radius(2.0), 1.0, 1e-6);
        assert_eq!(report.off_sphere_vertex_count, 12);
        assert!((report.max_radius_error - 1.0).abs() < 1e-12);
        assert!(!report.is_valid_sphere());
    }

    #[test]
    fn test_flipped_mesh_is_inward() {
        let mut mesh = icosahedron();
        mesh.flip_normals();
        let report = sphere_report(&mesh, 1.0, 1e-9);
        assert_eq!(report.inward_face_count, 20);
        assert!(report.is_watertight);
        assert!(!report.is_valid_sphere());
    }

    #[test]
    fn test_open_mesh() {
        let mut mesh = icosahedron();
        mesh.faces.pop();
        let report = sphere_report(&mesh, 1.0, 1e-9);
        assert_eq!(report.boundary_edge_count, 3);
        assert!(!report.is_watertight);
        assert!(report.is_manifold);
        assert_eq!(report.euler_characteristic(), 1);
    }

    #[test]
    fn test_bad_faces_counted() {
        let mut mesh = icosahedron();
        mesh.faces.push([0, 0, 0]);
        mesh.faces.push([0, 1, 99]);
        mesh.vertices.push(Vertex::from_coords(f64::NAN, 0.0, 0.0));

        let report = sphere_report(&mesh, 1.0, 1e-9);
        assert_eq!(report.degenerate_face_count, 1);
        assert_eq!(report.invalid_face_count, 1);
        assert_eq!(report.off_sphere_vertex_count, 1);
        assert!(report.max_radius_error.is_infinite());
    }

    #[test]
    fn test_display() {
        let mut mesh = icosahedron();
        mesh.faces.pop();
        let display = format!("{}", sphere_report(&mesh, 1.0, 1e-9));
        assert!(display.contains("Faces: 19"));
        assert!(display.contains("Watertight: No"));
        assert!(display.contains("Boundary edges: 3"));
        assert!(!display.contains("Inward faces"));
    }
}
