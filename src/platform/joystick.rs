//! On-screen analog joystick
//!
//! The knob is dragged inside a circular base; its offset from the base
//! center, divided by the base radius, is the analog input vector.

use glam::Vec2;

/// Joystick base geometry in client (CSS pixel) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joystick {
    pub center: Vec2,
    pub radius: f32,
}

impl Joystick {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Analog vector for a pointer at `pointer`, length at most 1.
    ///
    /// Screen axes: +x right, +y down, matching the lifter's movement.
    pub fn vector(&self, pointer: Vec2) -> Vec2 {
        if !(self.radius > 0.0) || !pointer.is_finite() {
            return Vec2::ZERO;
        }
        ((pointer - self.center) / self.radius).clamp_length_max(1.0)
    }

    /// Knob offset from the base center for drawing
    pub fn knob_offset(&self, pointer: Vec2) -> Vec2 {
        self.vector(pointer) * self.radius
    }
}
