//! Perspective camera.

use nalgebra::{Matrix4, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A perspective camera looking at a target point.
///
/// The default looks from `(0, 0, 10)` at the origin with +Y up, using a
/// 70° vertical field of view, a square aspect ratio and clip planes at
/// 0.1 and 100.
///
/// # Example
///
/// ```
/// use mesh_scene::Camera;
///
/// let camera = Camera::default().with_aspect(16.0 / 9.0);
/// let view = camera.view_matrix();
/// // The eye sits at the view-space origin.
/// let eye = view.transform_point(&camera.eye);
/// assert!(eye.coords.norm() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fovy_degrees: f32,
    /// Width over height.
    pub aspect: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Camera position.
    pub eye: Point3<f32>,
    /// Point the camera looks at.
    pub target: Point3<f32>,
    /// Up direction.
    pub up: Vector3<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fovy_degrees: 70.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
            eye: Point3::new(0.0, 0.0, 10.0),
            target: Point3::origin(),
            up: Vector3::y(),
        }
    }
}

impl Camera {
    /// Set the vertical field of view in degrees.
    #[must_use]
    pub const fn with_fovy_degrees(mut self, fovy_degrees: f32) -> Self {
        self.fovy_degrees = fovy_degrees;
        self
    }

    /// Set the aspect ratio (width over height).
    #[must_use]
    pub const fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Set the near and far clip distances.
    #[must_use]
    pub const fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Set the eye position.
    #[must_use]
    pub const fn with_eye(mut self, eye: Point3<f32>) -> Self {
        self.eye = eye;
        self
    }

    /// World to view space.
    #[must_use]
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye, &self.target, &self.up)
    }

    /// View to clip space.
    #[must_use]
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(
            self.aspect,
            self.fovy_degrees.to_radians(),
            self.near,
            self.far,
        )
    }
}
