//! Edge bookkeeping for closed triangle meshes.

use hashbrown::HashMap;

/// Normalize edge direction so the smaller index comes first.
///
/// Both faces sharing an edge traverse it in opposite directions; the
/// normalized key lets them find the same entry.
#[inline]
#[must_use]
pub const fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}

/// Undirected edges of a face list, with the faces that use each one.
///
/// # Example
///
/// ```
/// use mesh_types::ICOSAHEDRON_FACES;
/// use mesh_subdivide::EdgeMap;
///
/// let edges = EdgeMap::build(&ICOSAHEDRON_FACES);
/// assert_eq!(edges.edge_count(), 30);
/// assert!(edges.is_watertight());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeMap {
    /// Keyed by normalized edge.
    edge_faces: HashMap<(u32, u32), Vec<usize>>,
}

impl EdgeMap {
    /// Collect the edges of `faces`.
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut edge_faces: HashMap<(u32, u32), Vec<usize>> =
            HashMap::with_capacity(faces.len() * 3 / 2);

        for (face_idx, &[a, b, c]) in faces.iter().enumerate() {
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                edge_faces
                    .entry(normalize_edge(v0, v1))
                    .or_default()
                    .push(face_idx);
            }
        }

        Self { edge_faces }
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }

    /// Faces using edge `(v0, v1)` in either direction.
    ///
    /// Empty if the edge does not exist.
    #[must_use]
    pub fn faces_for_edge(&self, v0: u32, v1: u32) -> &[usize] {
        self.edge_faces
            .get(&normalize_edge(v0, v1))
            .map_or(&[], Vec::as_slice)
    }

    /// Edges used by exactly one face (holes in the surface).
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|f| f.len() == 1).count()
    }

    /// Edges used by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|f| f.len() > 2).count()
    }

    /// Every edge is shared by exactly two faces.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        !self.edge_faces.is_empty() && self.edge_faces.values().all(|f| f.len() == 2)
    }

    /// All edges in ascending order.
    #[must_use]
    pub fn sorted_edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<_> = self.edge_faces.keys().copied().collect();
        edges.sort_unstable();
        edges
    }
}
