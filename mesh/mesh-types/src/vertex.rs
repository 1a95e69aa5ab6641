//! Vertex type.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vertex in 3D space with an optional unit normal.
///
/// The position is stored as a `Point3<f64>` so that repeated sphere
/// projections do not drift. Normals are only present once a shading pass
/// has attached them.
///
/// # Example
///
/// ```
/// use mesh_types::{Vertex, Point3};
///
/// let v1 = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// let v2 = Vertex::from_coords(1.0, 2.0, 3.0);
///
/// assert_eq!(v1.position, v2.position);
/// assert!(v1.normal.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Unit normal, if one has been computed.
    pub normal: Option<Vector3<f64>>,
}

impl Vertex {
    /// Create a new vertex with only position set.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: None,
        }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let v = Vertex::from_coords(1.0, 2.0, 3.0);
    /// assert_eq!(v.position.x, 1.0);
    /// assert_eq!(v.position.z, 3.0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Create a vertex with position and normal.
    #[inline]
    #[must_use]
    pub const fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            normal: Some(normal),
        }
    }

    /// Distance from the origin.
    ///
    /// For a vertex of a sphere mesh centred at the origin this is the
    /// sphere radius.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let v = Vertex::from_coords(3.0, 4.0, 0.0);
    /// assert!((v.radius() - 5.0).abs() < 1e-12);
    /// ```
    #[inline]
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.position.coords.norm()
    }

    /// Whether all three coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite() && self.position.z.is_finite()
    }

    /// Return this vertex scaled along its direction from the origin so that
    /// it lies at distance `radius`.
    ///
    /// Returns `None` if the vertex sits at the origin (no direction) or is
    /// not finite. Any normal is dropped, since the position changed.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let v = Vertex::from_coords(0.0, 0.0, 0.5);
    /// let p = v.projected_onto_sphere(2.0).unwrap();
    /// assert!((p.position.z - 2.0).abs() < 1e-12);
    ///
    /// assert!(Vertex::from_coords(0.0, 0.0, 0.0).projected_onto_sphere(1.0).is_none());
    /// ```
    #[must_use]
    pub fn projected_onto_sphere(&self, radius: f64) -> Option<Self> {
        if !self.is_finite() {
            return None;
        }
        let len = self.radius();
        if len <= f64::EPSILON {
            return None;
        }
        Some(Self::new(Point3::from(self.position.coords * (radius / len))))
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vertex {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::from_coords(x, y, z)
    }
}
