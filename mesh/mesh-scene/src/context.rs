//! Render state and input handling.

use nalgebra::{Matrix4, Vector3};
use tracing::debug;

use crate::camera::Camera;
use crate::input::{Action, InputEvent, InputQueue, Key, MouseButton};
use crate::lighting::Lighting;
use crate::transform::ModelTransform;

/// Default translation step.
pub const DEFAULT_STEP: f32 = 0.1;

/// Light position change per key press.
pub const LIGHT_STEP: f32 = 0.5;

/// Ambient and diffuse change per key press.
pub const MATERIAL_STEP: f32 = 0.1;

/// Mouse drag bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DragState {
    cursor: (f64, f64),
    anchor: (f64, f64),
    left: bool,
    middle: bool,
    right: bool,
}

impl DragState {
    const fn any(&self) -> bool {
        self.left || self.middle || self.right
    }
}

/// Everything the render loop needs to draw a frame.
///
/// Owned by the render loop and handed out by reference. Input reaches it
/// only through [`RenderContext::apply_events`].
///
/// # Example
///
/// ```
/// use mesh_scene::{InputEvent, InputQueue, Key, RenderContext};
///
/// let mut ctx = RenderContext::default();
/// let mut queue = InputQueue::new();
/// queue.push(InputEvent::press(Key::H));
/// queue.push(InputEvent::press(Key::Escape));
///
/// ctx.apply_events(&mut queue);
///
/// assert!((ctx.lighting.light.position.x - 5.5).abs() < 1e-6);
/// assert!(ctx.close_requested);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    /// View and projection.
    pub camera: Camera,
    /// Model placement.
    pub model: ModelTransform,
    /// Light and material.
    pub lighting: Lighting,
    /// Translation per key press; drags move `step / 10` per pixel.
    pub step: f32,
    /// Set once Escape is pressed.
    pub close_requested: bool,
    drag: DragState,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            model: ModelTransform::default(),
            lighting: Lighting::default(),
            step: DEFAULT_STEP,
            close_requested: false,
            drag: DragState::default(),
        }
    }
}

impl RenderContext {
    /// Create a context with default camera, model and lighting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the camera.
    #[must_use]
    pub const fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    /// Set the model transform.
    #[must_use]
    pub const fn with_model(mut self, model: ModelTransform) -> Self {
        self.model = model;
        self
    }

    /// Set the lighting.
    #[must_use]
    pub const fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    /// Set the translation step.
    #[must_use]
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Model matrix.
    #[must_use]
    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.model.matrix()
    }

    /// View matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.camera.view_matrix()
    }

    /// Projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.camera.projection_matrix()
    }

    /// `projection * view * model`.
    #[must_use]
    pub fn mvp(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix() * self.model_matrix()
    }

    /// Apply and remove every queued event, oldest first.
    ///
    /// Returns the number of events applied.
    pub fn apply_events(&mut self, queue: &mut InputQueue) -> usize {
        let mut applied = 0;
        for event in queue.drain() {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    /// Apply a single event.
    pub fn apply_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, action } => self.apply_key(key, action),
            InputEvent::MouseButton { button, action } => self.apply_button(button, action),
            InputEvent::CursorMoved { x, y } => self.apply_motion(x, y),
        }
    }

    /// Light, material and close keys act on press only. Translation keys
    /// act on press and repeat; release never moves the model.
    fn apply_key(&mut self, key: Key, action: Action) {
        let step = self.step;

        if action == Action::Press {
            let light = &mut self.lighting.light;
            let material = &mut self.lighting.material;
            match key {
                Key::F => light.nudge(Vector3::new(-LIGHT_STEP, 0.0, 0.0)),
                Key::H => light.nudge(Vector3::new(LIGHT_STEP, 0.0, 0.0)),
                Key::T => light.nudge(Vector3::new(0.0, -LIGHT_STEP, 0.0)),
                Key::V => light.nudge(Vector3::new(0.0, LIGHT_STEP, 0.0)),
                Key::J => light.nudge(Vector3::new(0.0, 0.0, -LIGHT_STEP)),
                Key::L => light.nudge(Vector3::new(0.0, 0.0, LIGHT_STEP)),
                Key::C => material.adjust_ambient(-MATERIAL_STEP),
                Key::B => material.adjust_ambient(MATERIAL_STEP),
                Key::D => material.adjust_diffuse(-MATERIAL_STEP),
                Key::G => material.adjust_diffuse(MATERIAL_STEP),
                Key::Escape => {
                    debug!("Close requested");
                    self.close_requested = true;
                }
                _ => {}
            }
        }

        if action.is_down() {
            let offset = match key {
                Key::Up => Some(Vector3::new(0.0, step, 0.0)),
                Key::Down => Some(Vector3::new(0.0, -step, 0.0)),
                Key::Right => Some(Vector3::new(-step, 0.0, 0.0)),
                Key::Left => Some(Vector3::new(step, 0.0, 0.0)),
                Key::PageUp => Some(Vector3::new(0.0, 0.0, step)),
                Key::PageDown => Some(Vector3::new(0.0, 0.0, -step)),
                _ => None,
            };
            if let Some(offset) = offset {
                self.model.translate(offset);
            }
        }
    }

    fn apply_button(&mut self, button: MouseButton, action: Action) {
        let down = action.is_down();
        if down {
            self.drag.anchor = self.drag.cursor;
        }
        match button {
            MouseButton::Left => self.drag.left = down,
            MouseButton::Middle => self.drag.middle = down,
            MouseButton::Right => self.drag.right = down,
        }
    }

    /// Drag handling. The anchor follows the cursor after every motion, so
    /// each event applies only the delta since the previous one. A left drag
    /// therefore turns the model in proportion to the distance moved, not to
    /// the distance from where the button went down.
    // Truncation: pixel deltas fit comfortably in f32
    #[allow(clippy::cast_possible_truncation)]
    fn apply_motion(&mut self, x: f64, y: f64) {
        self.drag.cursor = (x, y);
        if !self.drag.any() {
            return;
        }

        let (ax, ay) = self.drag.anchor;
        let scale = self.step / 10.0;
        let dx = (x - ax) as f32 * scale;
        let dy = (y - ay) as f32 * scale;

        if self.drag.left {
            self.model.rotate_y(dx);
        }
        if self.drag.middle {
            self.model.translate(Vector3::new(0.0, 0.0, -dy));
        }
        if self.drag.right {
            self.model.translate(Vector3::new(dx, -dy, 0.0));
        }

        self.drag.anchor = (x, y);
    }
}
