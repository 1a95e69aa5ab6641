//! Model transform driven by keyboard and mouse input.

use nalgebra::{Matrix3, Matrix4, Vector3};

/// Model matrix split into the parts input can change.
///
/// The composed matrix is `translation * rotation * initial`. `initial`
/// places the mesh once; input only touches `translation` and `rotation`.
///
/// # Example
///
/// ```
/// use mesh_scene::ModelTransform;
/// use nalgebra::{Point3, Vector3};
///
/// let mut model = ModelTransform::default();
/// model.translate(Vector3::new(0.0, 0.1, 0.0));
/// model.rotate_y(std::f32::consts::FRAC_PI_2);
///
/// let p = model.matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
/// assert!((p.z + 1.0).abs() < 1e-6);
/// assert!((p.y - 0.1).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    /// Accumulated translation.
    pub translation: Matrix4<f32>,
    /// Accumulated rotation.
    pub rotation: Matrix4<f32>,
    /// Fixed placement applied before everything else.
    pub initial: Matrix4<f32>,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            translation: Matrix4::identity(),
            rotation: Matrix4::identity(),
            initial: Matrix4::identity(),
        }
    }
}

impl ModelTransform {
    /// Set the fixed initial placement.
    #[must_use]
    pub const fn with_initial(mut self, initial: Matrix4<f32>) -> Self {
        self.initial = initial;
        self
    }

    /// Append a translation.
    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.translation *= Matrix4::new_translation(&offset);
    }

    /// Append a rotation of `angle` radians about +Y.
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation *= rotation_y(angle);
    }

    /// Drop accumulated translation and rotation; keep the initial placement.
    pub fn reset(&mut self) {
        self.translation = Matrix4::identity();
        self.rotation = Matrix4::identity();
    }

    /// Composed model matrix.
    #[must_use]
    pub fn matrix(&self) -> Matrix4<f32> {
        self.translation * self.rotation * self.initial
    }

    /// Linear part applied to normals.
    ///
    /// Translation does not affect normals, and rotations are orthonormal,
    /// so this is the upper-left 3x3 of `rotation * initial` as long as
    /// `initial` has no non-uniform scale.
    #[must_use]
    pub fn normal_matrix(&self) -> Matrix3<f32> {
        (self.rotation * self.initial).fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Current translation offset.
    #[must_use]
    pub fn offset(&self) -> Vector3<f32> {
        self.translation.fixed_view::<3, 1>(0, 3).into_owned()
    }
}

#[rustfmt::skip]
fn rotation_y(angle: f32) -> Matrix4<f32> {
    let (sin_a, cos_a) = angle.sin_cos();
    Matrix4::new(
         cos_a, 0.0, sin_a, 0.0,
           0.0, 1.0,   0.0, 0.0,
        -sin_a, 0.0, cos_a, 0.0,
           0.0, 0.0,   0.0, 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn translations_accumulate() {
        let mut model = ModelTransform::default();
        model.translate(Vector3::new(0.1, 0.0, 0.0));
        model.translate(Vector3::new(0.1, 0.2, -0.3));

        let offset = model.offset();
        assert_relative_eq!(offset.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(offset.y, 0.2, epsilon = 1e-6);
        assert_relative_eq!(offset.z, -0.3, epsilon = 1e-6);
    }

    #[test]
    fn rotation_then_translation_order() {
        let mut model = ModelTransform::default();
        model.rotate_y(std::f32::consts::FRAC_PI_2);
        model.translate(Vector3::new(1.0, 0.0, 0.0));

        // Rotation applies first, so the translation is not rotated.
        let p = model.matrix().transform_point(&Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn initial_applies_first_and_survives_reset() {
        let initial = Matrix4::new_translation(&Vector3::new(-0.25, -0.25, -0.25));
        let mut model = ModelTransform::default().with_initial(initial);
        model.rotate_y(1.0);
        model.translate(Vector3::new(0.0, 1.0, 0.0));
        model.reset();

        assert_eq!(model.matrix(), initial);
        assert_eq!(model.normal_matrix(), Matrix3::identity());
    }

    #[test]
    fn normal_matrix_ignores_translation() {
        let mut model = ModelTransform::default();
        model.translate(Vector3::new(3.0, 4.0, 5.0));
        model.rotate_y(std::f32::consts::PI);

        let n = model.normal_matrix() * Vector3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(n.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);
    }
}
