//! Point light, material and the Lambert shading model.
//!
//! [`Lighting::intensity`] is the CPU reference for the fragment shader:
//!
//! ```text
//! color = ambient + diffuse * max(0, n . l)
//! ```
//!
//! where `n` is the unit surface normal and `l` the unit vector from the
//! surface point to the light, both in world space.

use mesh_subdivide::{SubdivideResult, face_normals};
use mesh_types::{IndexedMesh, MeshTopology};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::context::RenderContext;

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Light {
    /// World-space position.
    pub position: Point3<f32>,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Point3::new(5.0, 0.0, 0.0),
        }
    }
}

impl Light {
    /// Create a light at `position`.
    #[must_use]
    pub const fn new(position: Point3<f32>) -> Self {
        Self { position }
    }

    /// Move the light by `offset`.
    pub fn nudge(&mut self, offset: Vector3<f32>) {
        self.position += offset;
    }
}

/// Surface reflectance, RGBA.
///
/// Only the RGB channels take part in shading; alpha is passed through.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Ambient term.
    pub ambient: [f32; 4],
    /// Diffuse term.
    pub diffuse: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.2, 0.2, 0.2, 1.0],
            diffuse: [0.8, 0.8, 0.8, 1.0],
        }
    }
}

impl Material {
    /// Set the ambient RGB to a single grey level.
    #[must_use]
    pub fn with_ambient(mut self, level: f32) -> Self {
        set_rgb(&mut self.ambient, level);
        self
    }

    /// Set the diffuse RGB to a single grey level.
    #[must_use]
    pub fn with_diffuse(mut self, level: f32) -> Self {
        set_rgb(&mut self.diffuse, level);
        self
    }

    /// Add `delta` to each ambient RGB channel, clamped to `[0, 1]`.
    pub fn adjust_ambient(&mut self, delta: f32) {
        adjust_rgb(&mut self.ambient, delta);
    }

    /// Add `delta` to each diffuse RGB channel, clamped to `[0, 1]`.
    pub fn adjust_diffuse(&mut self, delta: f32) {
        adjust_rgb(&mut self.diffuse, delta);
    }
}

fn set_rgb(channels: &mut [f32; 4], level: f32) {
    let level = level.clamp(0.0, 1.0);
    channels[..3].fill(level);
}

fn adjust_rgb(channels: &mut [f32; 4], delta: f32) {
    for c in &mut channels[..3] {
        *c = (*c + delta).clamp(0.0, 1.0);
    }
}

/// A light and the material it shines on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lighting {
    /// The point light.
    pub light: Light,
    /// Surface material.
    pub material: Material,
}

impl Lighting {
    /// Set the light.
    #[must_use]
    pub const fn with_light(mut self, light: Light) -> Self {
        self.light = light;
        self
    }

    /// Set the material.
    #[must_use]
    pub const fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Lambert factor `max(0, n . l)` for a world-space normal and point.
    ///
    /// Zero when the normal is zero or the point coincides with the light.
    #[must_use]
    pub fn lambert(&self, normal: &Vector3<f32>, position: &Point3<f32>) -> f32 {
        let (Some(n), Some(l)) = (
            normal.try_normalize(f32::EPSILON),
            (self.light.position - position).try_normalize(f32::EPSILON),
        ) else {
            return 0.0;
        };
        n.dot(&l).max(0.0)
    }

    /// Shaded RGB for a world-space normal and point.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_scene::Lighting;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let lighting = Lighting::default(); // light at (5, 0, 0)
    /// let lit = lighting.intensity(&Vector3::x(), &Point3::new(1.0, 0.0, 0.0));
    /// let unlit = lighting.intensity(&-Vector3::x(), &Point3::new(-1.0, 0.0, 0.0));
    ///
    /// assert!((lit[0] - 1.0).abs() < 1e-6); // 0.2 + 0.8
    /// assert!((unlit[0] - 0.2).abs() < 1e-6); // ambient only
    /// ```
    #[must_use]
    pub fn intensity(&self, normal: &Vector3<f32>, position: &Point3<f32>) -> [f32; 3] {
        let lambert = self.lambert(normal, position);
        let Material { ambient, diffuse } = self.material;
        [
            diffuse[0].mul_add(lambert, ambient[0]),
            diffuse[1].mul_add(lambert, ambient[1]),
            diffuse[2].mul_add(lambert, ambient[2]),
        ]
    }
}

/// One flat-shaded RGB color per face of `mesh`, as placed by `ctx`.
///
/// Face normals are rotated by the model's normal matrix and face
/// centroids moved by the full model matrix before lighting.
///
/// # Errors
///
/// Returns an error if a face is degenerate or references a missing vertex.
// Truncation: f64 to f32 conversion is intentional for rendering
#[allow(clippy::cast_possible_truncation)]
pub fn shade_faces(mesh: &IndexedMesh, ctx: &RenderContext) -> SubdivideResult<Vec<[f32; 3]>> {
    let normals = face_normals(mesh)?;
    let model = ctx.model_matrix();
    let normal_matrix = ctx.model.normal_matrix();

    let colors = normals
        .iter()
        .enumerate()
        .filter_map(|(fi, n)| {
            let centroid = mesh.triangle(fi)?.centroid();
            let local = Point3::new(centroid.x as f32, centroid.y as f32, centroid.z as f32);
            let normal = normal_matrix * Vector3::new(n.x as f32, n.y as f32, n.z as f32);
            Some(
                ctx.lighting
                    .intensity(&normal, &model.transform_point(&local)),
            )
        })
        .collect();

    Ok(colors)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::icosahedron;

    #[test]
    fn default_values() {
        let lighting = Lighting::default();
        assert_eq!(lighting.light.position, Point3::new(5.0, 0.0, 0.0));
        assert_eq!(lighting.material.ambient, [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(lighting.material.diffuse, [0.8, 0.8, 0.8, 1.0]);
    }

    #[test]
    fn grazing_light_is_ambient_only() {
        let lighting = Lighting::default();
        let rgb = lighting.intensity(&Vector3::y(), &Point3::origin());
        assert_relative_eq!(rgb[1], 0.2, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_inputs() {
        let lighting = Lighting::default();
        assert_relative_eq!(lighting.lambert(&Vector3::zeros(), &Point3::origin()), 0.0);
        assert_relative_eq!(
            lighting.lambert(&Vector3::x(), &Point3::new(5.0, 0.0, 0.0)),
            0.0
        );
    }

    #[test]
    fn adjustments_clamp() {
        let mut material = Material::default();
        for _ in 0..5 {
            material.adjust_ambient(-0.1);
        }
        assert_eq!(material.ambient, [0.0, 0.0, 0.0, 1.0]);

        for _ in 0..5 {
            material.adjust_diffuse(0.1);
        }
        assert_eq!(material.diffuse, [1.0, 1.0, 1.0, 1.0]);

        let material = Material::default().with_ambient(2.0).with_diffuse(0.5);
        assert_eq!(material.ambient, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(material.diffuse, [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn shade_faces_lit_side_brighter() {
        let ico = icosahedron();
        let ctx = RenderContext::default();
        let colors = shade_faces(&ico, &ctx).unwrap();
        assert_eq!(colors.len(), 20);

        // Light sits on +X: faces whose centroid has positive x are brighter.
        let mut lit = 0.0;
        let mut dark = 1.0_f32;
        for (fi, rgb) in colors.iter().enumerate() {
            let x = ico.triangle(fi).unwrap().centroid().x;
            if x > 0.3 {
                lit = f32::max(lit, rgb[0]);
            } else if x < -0.3 {
                dark = dark.min(rgb[0]);
                assert_relative_eq!(rgb[0], 0.2, epsilon = 1e-6);
            }
        }
        assert!(lit > 0.9);
        assert_relative_eq!(dark, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn shade_faces_follows_rotation() {
        let ico = icosahedron();
        let mut ctx = RenderContext::default();
        let before = shade_faces(&ico, &ctx).unwrap();
        ctx.model.rotate_y(std::f32::consts::PI);
        let after = shade_faces(&ico, &ctx).unwrap();
        assert_ne!(before, after);
    }
}
