//! Windowing-agnostic input events and the per-frame queue.
//!
//! A window backend translates its native events into [`InputEvent`]s and
//! pushes them onto an [`InputQueue`]. The render loop drains the queue once
//! per frame into a [`RenderContext`](crate::RenderContext).

use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keys with a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Key {
    /// Light x down.
    F,
    /// Light x up.
    H,
    /// Light y down.
    T,
    /// Light y up.
    V,
    /// Light z down.
    J,
    /// Light z up.
    L,
    /// Ambient down.
    C,
    /// Ambient up.
    B,
    /// Diffuse down.
    D,
    /// Diffuse up.
    G,
    /// Move up.
    Up,
    /// Move down.
    Down,
    /// Move towards +x.
    Left,
    /// Move towards -x.
    Right,
    /// Move towards the viewer.
    PageUp,
    /// Move away from the viewer.
    PageDown,
    /// Close the window.
    Escape,
}

/// Key or button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Went down.
    Press,
    /// Held down long enough to auto-repeat.
    Repeat,
    /// Went up.
    Release,
}

impl Action {
    /// Press or repeat.
    #[must_use]
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Press | Self::Repeat)
    }
}

/// Mouse buttons with a drag binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MouseButton {
    /// Rotates about Y.
    Left,
    /// Moves in depth.
    Middle,
    /// Moves in the view plane.
    Right,
}

/// One input event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputEvent {
    /// A keyboard transition.
    Key {
        /// Which key.
        key: Key,
        /// What happened.
        action: Action,
    },
    /// A mouse button transition.
    MouseButton {
        /// Which button.
        button: MouseButton,
        /// What happened.
        action: Action,
    },
    /// The cursor moved to window coordinates `(x, y)`, y pointing down.
    CursorMoved {
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels.
        y: f64,
    },
}

impl InputEvent {
    /// A key press.
    #[must_use]
    pub const fn press(key: Key) -> Self {
        Self::Key {
            key,
            action: Action::Press,
        }
    }

    /// A key release.
    #[must_use]
    pub const fn release(key: Key) -> Self {
        Self::Key {
            key,
            action: Action::Release,
        }
    }
}

/// FIFO buffer of input events.
///
/// # Example
///
/// ```
/// use mesh_scene::{InputEvent, InputQueue, Key};
///
/// let mut queue = InputQueue::new();
/// queue.push(InputEvent::press(Key::Up));
/// queue.push(InputEvent::release(Key::Up));
///
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.drain().count(), 2);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Remove and yield every queued event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Extend<InputEvent> for InputQueue {
    fn extend<I: IntoIterator<Item = InputEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}
