//! Player intent for a single step
//!
//! Event handlers only flip flags or overwrite the analog vector here; the
//! step reads it once and turns it into one direction.

use glam::Vec2;

/// Input commands for a single step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Last known joystick vector, components in [-1, 1]
    pub analog: Option<Vec2>,
    /// Desired vacuum state
    pub vacuum: bool,
}

impl InputState {
    /// Intended direction, each component in [-1, 1].
    ///
    /// An analog vector longer than `deadzone` wins outright; otherwise the
    /// digital flags each contribute ±1.
    pub fn direction(&self, deadzone: f32) -> Vec2 {
        if let Some(v) = self.analog {
            if v.is_finite() && v.length() > deadzone {
                return v.clamp(Vec2::NEG_ONE, Vec2::ONE);
            }
        }
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    pub fn toggle_vacuum(&mut self) {
        self.vacuum = !self.vacuum;
    }

    /// Drop all held directions (focus loss, teardown)
    pub fn release_directions(&mut self) {
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
        self.analog = None;
    }
}
