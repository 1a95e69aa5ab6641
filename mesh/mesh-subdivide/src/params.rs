//! Subdivision parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where new edge vertices are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SubdivisionMethod {
    /// Midpoints are projected back onto the sphere of the configured radius.
    /// Every output vertex lies on the sphere.
    #[default]
    Spherical,

    /// Plain midpoint averaging. Increases face count without changing the
    /// surface; new vertices sit inside the sphere.
    Midpoint,
}

impl SubdivisionMethod {
    /// Check if this method keeps vertices on the sphere.
    #[must_use]
    pub const fn projects_to_sphere(&self) -> bool {
        matches!(self, Self::Spherical)
    }
}

/// Parameters for mesh subdivision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubdivideParams {
    /// Subdivision method to use.
    pub method: SubdivisionMethod,

    /// Number of subdivision passes.
    pub iterations: u32,

    /// Maximum faces allowed in result (prevents runaway growth).
    pub max_faces: usize,

    /// Sphere radius used by [`SubdivisionMethod::Spherical`].
    pub radius: f64,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            method: SubdivisionMethod::default(),
            iterations: 1,
            max_faces: 10_000_000, // 10M faces max
            radius: 1.0,
        }
    }
}

impl SubdivideParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters for spherical subdivision of a sphere of `radius`.
    #[must_use]
    pub fn spherical(radius: f64) -> Self {
        Self {
            method: SubdivisionMethod::Spherical,
            radius,
            ..Self::default()
        }
    }

    /// Create parameters for plain midpoint subdivision.
    #[must_use]
    pub fn midpoint() -> Self {
        Self {
            method: SubdivisionMethod::Midpoint,
            ..Self::default()
        }
    }

    /// Set subdivision method.
    #[must_use]
    pub const fn with_method(mut self, method: SubdivisionMethod) -> Self {
        self.method = method;
        self
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set maximum faces allowed.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Set the sphere radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Calculate expected face count after subdivision.
    ///
    /// Each pass multiplies face count by 4. Saturates at `usize::MAX`.
    #[must_use]
    pub const fn expected_faces(&self, current_faces: usize) -> usize {
        let mut faces = current_faces;
        let mut i = 0;
        // Stops early once the count can no longer change
        while i < self.iterations && faces != 0 && faces != usize::MAX {
            faces = faces.saturating_mul(4);
            i += 1;
        }
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SubdivideParams::default();
        assert_eq!(params.method, SubdivisionMethod::Spherical);
        assert_eq!(params.iterations, 1);
        assert!((params.radius - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder() {
        let params = SubdivideParams::new()
            .with_method(SubdivisionMethod::Midpoint)
            .with_iterations(3)
            .with_max_faces(1_000_000)
            .with_radius(2.0);

        assert_eq!(params.method, SubdivisionMethod::Midpoint);
        assert_eq!(params.iterations, 3);
        assert_eq!(params.max_faces, 1_000_000);
        assert!((params.radius - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_expected_faces() {
        let params = SubdivideParams::new().with_iterations(1);
        assert_eq!(params.expected_faces(20), 80);

        let params = SubdivideParams::new().with_iterations(4);
        assert_eq!(params.expected_faces(20), 5120);

        let params = SubdivideParams::new().with_iterations(64);
        assert_eq!(params.expected_faces(20), usize::MAX);

        let params = SubdivideParams::new().with_iterations(u32::MAX);
        assert_eq!(params.expected_faces(20), usize::MAX);
        assert_eq!(params.expected_faces(0), 0);
    }

    #[test]
    fn test_projects_to_sphere() {
        assert!(SubdivisionMethod::Spherical.projects_to_sphere());
        assert!(!SubdivisionMethod::Midpoint.projects_to_sphere());
        assert!(SubdivideParams::spherical(3.0).method.projects_to_sphere());
    }
}
