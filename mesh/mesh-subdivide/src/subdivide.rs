//! Core subdivision algorithms.

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Vertex, icosahedron_with_radius};
use tracing::debug;

use crate::error::{MeshDefect, SubdivideError, SubdivideResult};
use crate::params::{SubdivideParams, SubdivisionMethod};
use crate::result::SubdivisionResult;
use crate::topology::normalize_edge;

/// A projected midpoint closer than this (relative to the radius) to one of
/// its edge endpoints is treated as coincident.
const COINCIDENT_EPSILON: f64 = 1e-12;

/// How far (relative to the radius) an input vertex may sit off the sphere
/// before spherical subdivision rejects it.
pub const SPHERE_TOLERANCE: f64 = 1e-6;

/// How a new edge vertex is positioned.
#[derive(Debug, Clone, Copy)]
enum Placement {
    /// Plain average of the two endpoints.
    Average,
    /// Average, then scaled onto the sphere of this radius.
    Sphere(f64),
}

impl Placement {
    fn for_params(params: &SubdivideParams) -> Self {
        match params.method {
            SubdivisionMethod::Spherical => Self::Sphere(params.radius),
            SubdivisionMethod::Midpoint => Self::Average,
        }
    }
}

/// Subdivide a mesh that approximates the unit sphere, once.
///
/// Each triangle `(A, B, C)` is replaced by `(A, AB, CA)`, `(AB, B, BC)`,
/// `(CA, BC, C)` and `(AB, BC, CA)`, where each midpoint is projected back
/// onto the sphere. Midpoints are shared between the two faces of an edge.
///
/// The input is not modified. Original vertices keep their indices; new
/// vertices are appended in the order they are first needed.
///
/// # Errors
///
/// - [`SubdivideError::InvalidMesh`] if the mesh is empty, a face index is
///   out of range, or a vertex is at the origin, non-finite, or further than
///   [`SPHERE_TOLERANCE`] from the sphere
/// - [`SubdivideError::ArithmeticDegenerate`] if a midpoint cannot be placed
///   on the sphere
///
/// # Example
///
/// ```
/// use mesh_types::{icosahedron, MeshTopology};
/// use mesh_subdivide::subdivide;
///
/// let refined = subdivide(&icosahedron())?;
///
/// assert_eq!(refined.vertex_count(), 42);
/// assert_eq!(refined.face_count(), 80);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide(mesh: &IndexedMesh) -> SubdivideResult<IndexedMesh> {
    subdivide_onto_sphere(mesh, 1.0)
}

/// Subdivide a mesh that approximates a sphere of `radius` centred at the
/// origin, once.
///
/// See [`subdivide`] for the face layout.
///
/// # Errors
///
/// As [`subdivide`], plus [`SubdivideError::InvalidRadius`] if `radius` is
/// not a positive finite number.
pub fn subdivide_onto_sphere(mesh: &IndexedMesh, radius: f64) -> SubdivideResult<IndexedMesh> {
    validate_radius(radius)?;
    validate_mesh(mesh, Some(radius))?;
    subdivide_once(mesh, Placement::Sphere(radius))
}

/// Build an icosphere: the base icosahedron of `radius` refined `levels`
/// times.
///
/// Level 0 is the icosahedron itself (12 vertices, 20 faces); every level
/// multiplies the face count by 4.
///
/// # Errors
///
/// Returns [`SubdivideError::InvalidRadius`] for a non-positive or
/// non-finite radius, or [`SubdivideError::MeshTooLarge`] if the result
/// would exceed the default face limit.
///
/// # Example
///
/// ```
/// use mesh_types::MeshTopology;
/// use mesh_subdivide::icosphere;
///
/// let sphere = icosphere(2, 1.0)?;
/// assert_eq!(sphere.vertex_count(), 162);
/// assert_eq!(sphere.face_count(), 320);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn icosphere(levels: u32, radius: f64) -> SubdivideResult<IndexedMesh> {
    validate_radius(radius)?;
    let base = icosahedron_with_radius(radius);
    if levels == 0 {
        return Ok(base);
    }

    let params = SubdivideParams::spherical(radius).with_iterations(levels);
    subdivide_mesh(&base, &params).map(|result| result.mesh)
}

/// Subdivide a mesh using the specified parameters.
///
/// Runs `params.iterations` passes. Each pass consumes the previous pass's
/// output; nothing is modified in place.
///
/// # Errors
///
/// Returns an error if:
/// - The iteration count is 0
/// - The radius is invalid (spherical method only)
/// - The mesh is malformed (see [`subdivide`])
/// - The resulting mesh would exceed `max_faces`
/// - A midpoint cannot be placed on the sphere
///
/// # Examples
///
/// ```
/// use mesh_types::icosahedron;
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let params = SubdivideParams::spherical(1.0).with_iterations(3);
/// let result = subdivide_mesh(&icosahedron(), &params)?;
///
/// // 20 * 4^3 faces after 3 passes
/// assert_eq!(result.final_faces, 1280);
/// assert_eq!(result.final_vertices, 642);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh(
    mesh: &IndexedMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    if params.iterations == 0 {
        return Err(SubdivideError::InvalidIterations(0));
    }

    let placement = Placement::for_params(params);
    if let Placement::Sphere(radius) = placement {
        validate_radius(radius)?;
    }
    validate_mesh(mesh, params.method.projects_to_sphere().then_some(params.radius))?;

    // Check projected size
    let projected = params.expected_faces(mesh.faces.len());
    if projected > params.max_faces {
        return Err(SubdivideError::MeshTooLarge {
            current: mesh.faces.len(),
            projected,
            max: params.max_faces,
        });
    }

    let original_faces = mesh.faces.len();
    let original_vertices = mesh.vertices.len();

    debug!(
        "Subdividing mesh: {} faces, {} vertices, {} iterations using {:?}",
        original_faces, original_vertices, params.iterations, params.method
    );

    let mut current = subdivide_once(mesh, placement)?;
    for _ in 1..params.iterations {
        current = subdivide_once(&current, placement)?;
    }

    Ok(SubdivisionResult {
        original_faces,
        final_faces: current.faces.len(),
        original_vertices,
        final_vertices: current.vertices.len(),
        iterations: params.iterations,
        method: params.method,
        mesh: current,
    })
}

/// Check that a mesh can be subdivided.
///
/// When `sphere` is set, every vertex must also lie on the sphere of that
/// radius, within [`SPHERE_TOLERANCE`].
fn validate_mesh(mesh: &IndexedMesh, sphere: Option<f64>) -> SubdivideResult<()> {
    if mesh.vertices.is_empty() {
        return Err(SubdivideError::InvalidMesh(MeshDefect::NoVertices));
    }
    if mesh.faces.is_empty() {
        return Err(SubdivideError::InvalidMesh(MeshDefect::NoFaces));
    }

    if let Some((face, index)) = mesh.first_out_of_range_index() {
        return Err(SubdivideError::InvalidMesh(MeshDefect::IndexOutOfRange {
            face,
            index,
            vertex_count: mesh.vertices.len(),
        }));
    }

    for (vertex, v) in mesh.vertices.iter().enumerate() {
        if !v.is_finite() {
            return Err(SubdivideError::InvalidMesh(MeshDefect::NonFiniteVertex {
                vertex,
            }));
        }
        let Some(radius) = sphere else {
            continue;
        };
        if v.radius() <= f64::EPSILON {
            return Err(SubdivideError::InvalidMesh(MeshDefect::ZeroLengthVertex {
                vertex,
            }));
        }
        if (v.radius() - radius).abs() > SPHERE_TOLERANCE * radius {
            return Err(SubdivideError::InvalidMesh(MeshDefect::OffSphereVertex {
                vertex,
                radius: v.radius(),
            }));
        }
    }

    Ok(())
}

fn validate_radius(radius: f64) -> SubdivideResult<()> {
    if radius.is_finite() && radius > f64::EPSILON {
        Ok(())
    } else {
        Err(SubdivideError::InvalidRadius(radius))
    }
}

/// One subdivision pass. The mesh must already be validated.
fn subdivide_once(mesh: &IndexedMesh, placement: Placement) -> SubdivideResult<IndexedMesh> {
    // A closed mesh has 3F/2 edges, one new vertex each.
    let edge_estimate = mesh.faces.len() * 3 / 2;
    let mut midpoints = MidpointCache::new(mesh, placement, edge_estimate);
    let mut new_faces = Vec::with_capacity(mesh.faces.len() * 4);

    for &[a, b, c] in &mesh.faces {
        let ab = midpoints.get_or_create(a, b)?;
        let bc = midpoints.get_or_create(b, c)?;
        let ca = midpoints.get_or_create(c, a)?;

        // Corner triangles
        new_faces.push([a, ab, ca]);
        new_faces.push([ab, b, bc]);
        new_faces.push([ca, bc, c]);
        // Center triangle
        new_faces.push([ab, bc, ca]);
    }

    let refined = IndexedMesh::from_parts(midpoints.into_vertices(), new_faces);
    debug!(
        "Subdivision pass: {} -> {} faces, {} -> {} vertices",
        mesh.faces.len(),
        refined.faces.len(),
        mesh.vertices.len(),
        refined.vertices.len()
    );

    Ok(refined)
}

/// Edge-to-midpoint lookup, scoped to one pass.
struct MidpointCache<'a> {
    source: &'a [Vertex],
    vertices: Vec<Vertex>,
    edge_midpoints: HashMap<(u32, u32), u32>,
    placement: Placement,
    face_count: usize,
}

impl<'a> MidpointCache<'a> {
    fn new(mesh: &'a IndexedMesh, placement: Placement, edge_estimate: usize) -> Self {
        let mut vertices = Vec::with_capacity(mesh.vertices.len() + edge_estimate);
        // Original vertices keep their index; normals are stale after refinement.
        vertices.extend(mesh.vertices.iter().map(|v| Vertex::new(v.position)));

        Self {
            source: &mesh.vertices,
            vertices,
            edge_midpoints: HashMap::with_capacity(edge_estimate),
            placement,
            face_count: mesh.faces.len(),
        }
    }

    /// Get or create the midpoint vertex for edge `(v0, v1)`.
    fn get_or_create(&mut self, v0: u32, v1: u32) -> SubdivideResult<u32> {
        let edge = normalize_edge(v0, v1);

        if let Some(&midpoint_idx) = self.edge_midpoints.get(&edge) {
            return Ok(midpoint_idx);
        }

        let p0 = self.source[v0 as usize].position;
        let p1 = self.source[v1 as usize].position;
        let midpoint = Vertex::new(nalgebra::center(&p0, &p1));

        let vertex = match self.placement {
            Placement::Average => midpoint,
            Placement::Sphere(radius) => {
                let projected = midpoint
                    .projected_onto_sphere(radius)
                    .ok_or(SubdivideError::ArithmeticDegenerate { edge })?;

                let tolerance = COINCIDENT_EPSILON * radius;
                if (projected.position - p0).norm() <= tolerance
                    || (projected.position - p1).norm() <= tolerance
                {
                    return Err(SubdivideError::ArithmeticDegenerate { edge });
                }
                projected
            }
        };

        let new_idx =
            u32::try_from(self.vertices.len()).map_err(|_| SubdivideError::MeshTooLarge {
                current: self.face_count,
                projected: self.face_count.saturating_mul(4),
                max: u32::MAX as usize,
            })?;
        self.vertices.push(vertex);
        self.edge_midpoints.insert(edge, new_idx);

        Ok(new_idx)
    }

    fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::needless_range_loop
)]
mod tests {
    use super::*;
    use crate::topology::EdgeMap;
    use approx::assert_relative_eq;
    use mesh_types::{MeshTopology, icosahedron};

    /// One octant of the unit sphere.
    fn make_octant() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0));
        mesh.faces.push([0, 1, 2]);
        mesh
    }

    /// Two octants sharing the edge (0, 2).
    fn make_two_octants() -> IndexedMesh {
        let mut mesh = make_octant();
        mesh.vertices.push(Vertex::from_coords(0.0, -1.0, 0.0));
        mesh.faces.push([0, 2, 3]);
        mesh
    }

    #[test]
    fn test_icosahedron_one_pass_counts() {
        let refined = subdivide(&icosahedron()).expect("subdivision failed");
        // 12 vertices + 30 edge midpoints
        assert_eq!(refined.vertex_count(), 42);
        assert_eq!(refined.face_count(), 80);
    }

    #[test]
    fn test_icosahedron_two_passes_counts() {
        let once = subdivide(&icosahedron()).unwrap();
        let twice = subdivide(&once).unwrap();
        // 42 vertices + 120 edge midpoints
        assert_eq!(twice.vertex_count(), 162);
        assert_eq!(twice.face_count(), 320);
    }

    #[test]
    fn test_vertex_growth_matches_edge_count() {
        let mut mesh = icosahedron();
        for _ in 0..3 {
            let edges = EdgeMap::build(&mesh.faces).edge_count();
            assert_eq!(edges, mesh.face_count() * 3 / 2);
            let next = subdivide(&mesh).unwrap();
            assert_eq!(next.vertex_count(), mesh.vertex_count() + edges);
            assert_eq!(next.face_count(), 4 * mesh.face_count());
            mesh = next;
        }
    }

    #[test]
    fn test_all_vertices_on_sphere() {
        let once = subdivide(&icosahedron()).unwrap();
        let twice = subdivide(&once).unwrap();
        for v in &twice.vertices {
            assert_relative_eq!(v.radius(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_custom_radius() {
        let base = icosahedron_with_radius(4.0);
        let refined = subdivide_onto_sphere(&base, 4.0).unwrap();
        assert!(refined.max_radius_error(4.0) < 1e-9);
    }

    #[test]
    fn test_original_vertices_preserved() {
        let base = icosahedron();
        let refined = subdivide(&base).unwrap();
        for (i, v) in base.vertices.iter().enumerate() {
            assert_eq!(refined.vertices[i].position, v.position);
        }
    }

    #[test]
    fn test_face_layout_single_triangle() {
        let refined = subdivide(&make_octant()).unwrap();
        // Midpoints appended in order AB (3), BC (4), CA (5).
        assert_eq!(
            refined.faces,
            vec![[0, 3, 5], [3, 1, 4], [5, 4, 2], [3, 4, 5]]
        );

        let ab = refined.vertices[3].position;
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(ab.x, s, epsilon = 1e-12);
        assert_relative_eq!(ab.y, s, epsilon = 1e-12);
        assert_relative_eq!(ab.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shared_edge_midpoint_reused() {
        let refined = subdivide(&make_two_octants()).unwrap();
        assert_eq!(refined.face_count(), 8);
        // 4 original + 5 edge midpoints (one shared edge)
        assert_eq!(refined.vertex_count(), 9);
    }

    #[test]
    fn test_watertight_preserved() {
        let mut mesh = icosahedron();
        for _ in 0..2 {
            mesh = subdivide(&mesh).unwrap();
            let edges = EdgeMap::build(&mesh.faces);
            assert!(edges.is_watertight());
            assert_eq!(edges.boundary_edge_count(), 0);
            assert_eq!(edges.non_manifold_edge_count(), 0);
        }
    }

    #[test]
    fn test_normals_point_outward() {
        let refined = subdivide(&subdivide(&icosahedron()).unwrap()).unwrap();
        for fi in 0..refined.face_count() {
            let tri = refined.triangle(fi).unwrap();
            let normal = tri.normal().unwrap();
            assert!(normal.dot(&tri.v0.coords) > 0.0, "face {fi} points inward");
        }
    }

    #[test]
    fn test_deterministic() {
        let base = icosahedron();
        let first = subdivide(&subdivide(&base).unwrap()).unwrap();
        let second = subdivide(&subdivide(&base).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut mesh = make_octant();
        mesh.faces.push([0, 2, 7]);
        let result = subdivide(&mesh);
        assert!(matches!(
            result,
            Err(SubdivideError::InvalidMesh(MeshDefect::IndexOutOfRange {
                face: 1,
                index: 7,
                vertex_count: 3
            }))
        ));
    }

    #[test]
    fn test_zero_length_vertex() {
        let mut mesh = make_octant();
        mesh.vertices[1] = Vertex::from_coords(0.0, 0.0, 0.0);
        let result = subdivide(&mesh);
        assert!(matches!(
            result,
            Err(SubdivideError::InvalidMesh(MeshDefect::ZeroLengthVertex {
                vertex: 1
            }))
        ));
    }

    #[test]
    fn test_non_finite_vertex() {
        let mut mesh = make_octant();
        mesh.vertices[2] = Vertex::from_coords(0.0, f64::NAN, 1.0);
        let result = subdivide(&mesh);
        assert!(matches!(
            result,
            Err(SubdivideError::InvalidMesh(MeshDefect::NonFiniteVertex {
                vertex: 2
            }))
        ));
    }

    #[test]
    fn test_off_sphere_vertex() {
        let result = subdivide(&icosahedron_with_radius(2.0));
        assert!(matches!(
            result,
            Err(SubdivideError::InvalidMesh(MeshDefect::OffSphereVertex { vertex: 0, .. }))
        ));

        let mut mesh = make_octant();
        mesh.vertices[1] = Vertex::from_coords(0.0, 1.5, 0.0);
        let result = subdivide(&mesh);
        assert!(matches!(
            result,
            Err(SubdivideError::InvalidMesh(MeshDefect::OffSphereVertex { vertex: 1, .. }))
        ));

        // Driver checks against the requested radius; midpoint ignores it
        let params = SubdivideParams::spherical(3.0);
        assert!(subdivide_mesh(&icosahedron(), &params).is_err());
        assert!(subdivide_mesh(&icosahedron_with_radius(3.0), &params).is_ok());
        let params = SubdivideParams::midpoint().with_radius(3.0);
        assert!(subdivide_mesh(&icosahedron(), &params).is_ok());
    }

    #[test]
    fn test_empty_inputs() {
        let result = subdivide(&IndexedMesh::new());
        assert!(matches!(
            result,
            Err(SubdivideError::InvalidMesh(MeshDefect::NoVertices))
        ));

        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        let result = subdivide(&mesh);
        assert!(matches!(
            result,
            Err(SubdivideError::InvalidMesh(MeshDefect::NoFaces))
        ));
    }

    #[test]
    fn test_antipodal_edge_is_degenerate() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(-1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);

        let result = subdivide(&mesh);
        assert!(matches!(
            result,
            Err(SubdivideError::ArithmeticDegenerate { edge: (0, 1) })
        ));
    }

    #[test]
    fn test_coincident_endpoints_are_degenerate() {
        let mut mesh = make_octant();
        mesh.vertices[2] = Vertex::from_coords(0.0, 1.0, 0.0);

        let result = subdivide(&mesh);
        assert!(matches!(
            result,
            Err(SubdivideError::ArithmeticDegenerate { edge: (1, 2) })
        ));
    }

    #[test]
    fn test_invalid_radius() {
        let mesh = icosahedron();
        assert!(matches!(
            subdivide_onto_sphere(&mesh, 0.0),
            Err(SubdivideError::InvalidRadius(_))
        ));
        assert!(matches!(
            subdivide_onto_sphere(&mesh, f64::INFINITY),
            Err(SubdivideError::InvalidRadius(_))
        ));
        assert!(matches!(
            icosphere(1, -1.0),
            Err(SubdivideError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_subdivide_zero_iterations() {
        let params = SubdivideParams::new().with_iterations(0);
        let result = subdivide_mesh(&icosahedron(), &params);
        assert!(matches!(result, Err(SubdivideError::InvalidIterations(0))));
    }

    #[test]
    fn test_subdivide_too_large() {
        // 20 * 4^2 = 320 > 100
        let params = SubdivideParams::new().with_iterations(2).with_max_faces(100);
        let result = subdivide_mesh(&icosahedron(), &params);
        assert!(matches!(
            result,
            Err(SubdivideError::MeshTooLarge {
                current: 20,
                projected: 320,
                max: 100
            })
        ));
    }

    #[test]
    fn test_subdivide_mesh_matches_repeated_passes() {
        let base = icosahedron();
        let params = SubdivideParams::spherical(1.0).with_iterations(2);
        let result = subdivide_mesh(&base, &params).unwrap();
        let manual = subdivide(&subdivide(&base).unwrap()).unwrap();

        assert_eq!(result.mesh, manual);
        assert_eq!(result.original_faces, 20);
        assert_eq!(result.final_faces, 320);
        assert_eq!(result.original_vertices, 12);
        assert_eq!(result.final_vertices, 162);
        assert_eq!(result.iterations, 2);
        assert!(result.was_subdivided());
    }

    #[test]
    fn test_midpoint_method_stays_inside_sphere() {
        let params = SubdivideParams::midpoint();
        let result = subdivide_mesh(&icosahedron(), &params).unwrap();
        assert_eq!(result.final_vertices, 42);

        for v in &result.mesh.vertices[12..] {
            assert!(v.radius() < 1.0);
        }
    }

    #[test]
    fn test_midpoint_method_accepts_origin_vertex() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);

        let result = subdivide_mesh(&mesh, &SubdivideParams::midpoint()).unwrap();
        assert_eq!(result.final_faces, 4);
        assert_eq!(result.final_vertices, 6);
    }

    #[test]
    fn test_input_normals_dropped() {
        let mut base = icosahedron();
        for v in &mut base.vertices {
            v.normal = Some(v.position.coords);
        }
        let refined = subdivide(&base).unwrap();
        assert!(refined.vertices.iter().all(|v| v.normal.is_none()));
    }

    #[test]
    fn test_icosphere_levels() {
        let level0 = icosphere(0, 1.0).unwrap();
        assert_eq!(level0, icosahedron());

        let level3 = icosphere(3, 2.0).unwrap();
        assert_eq!(level3.face_count(), 1280);
        assert_eq!(level3.vertex_count(), 642);
        assert!(level3.max_radius_error(2.0) < 1e-9);
    }
}
