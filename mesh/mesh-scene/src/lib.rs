//! Render state for viewing a sphere mesh.
//!
//! This crate holds everything a render loop keeps between frames, with no
//! window or GPU dependency:
//!
//! - [`Camera`]: view and projection matrices
//! - [`ModelTransform`]: translation, rotation and initial placement
//! - [`Lighting`]: point light, material and the Lambert shading reference
//! - [`InputQueue`]: keyboard and mouse events collected between frames
//! - [`RenderContext`]: all of the above, updated by draining the queue
//!
//! # Controls
//!
//! | Input | Effect |
//! |-------|--------|
//! | F / H, T / V, J / L | move the light along x, y, z by 0.5 |
//! | C / B | ambient -/+ 0.1 |
//! | D / G | diffuse -/+ 0.1 |
//! | arrows, PageUp / PageDown | translate the model by `step` |
//! | left drag | rotate about Y |
//! | middle drag | move in depth |
//! | right drag | move in the view plane |
//! | Escape | request close |
//!
//! # Example
//!
//! ```
//! use mesh_scene::{shade_faces, InputEvent, InputQueue, Key, RenderContext};
//! use mesh_subdivide::icosphere;
//!
//! let sphere = icosphere(1, 1.0)?;
//! let mut ctx = RenderContext::default();
//!
//! let mut queue = InputQueue::new();
//! queue.push(InputEvent::press(Key::G));
//! ctx.apply_events(&mut queue);
//!
//! let colors = shade_faces(&sphere, &ctx)?;
//! assert_eq!(colors.len(), 80);
//! let mvp = ctx.mvp();
//! # let _ = mvp;
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod camera;
mod context;
mod input;
mod lighting;
mod transform;

pub use camera::Camera;
pub use context::{DEFAULT_STEP, LIGHT_STEP, MATERIAL_STEP, RenderContext};
pub use input::{Action, InputEvent, InputQueue, Key, MouseButton};
pub use lighting::{Light, Lighting, Material, shade_faces};
pub use transform::ModelTransform;
