//! Lifter motion
//!
//! Input moves an invisible target; the visible lifter chases it on a damped
//! spring so raw input jitter never shows up on screen.

use glam::Vec2;

use super::layout::LifterBounds;
use super::state::Lifter;

/// Spring constants for the lifter chase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
}

impl Spring {
    /// Acceleration pulling `pos` toward `target`
    #[inline]
    pub fn acceleration(&self, pos: Vec2, vel: Vec2, target: Vec2) -> Vec2 {
        (target - pos) * self.stiffness - vel * self.damping
    }
}

impl Lifter {
    /// Move the target by `dir × speed × dt` and keep it inside `bounds`
    pub fn steer(&mut self, dir: Vec2, dt: f32, bounds: &LifterBounds) {
        self.target = bounds.clamp(self.target + dir * self.speed * dt);
    }

    /// One explicit Euler step of the spring: velocity first, then position
    pub fn follow(&mut self, spring: &Spring, dt: f32) {
        let acc = spring.acceleration(self.pos, self.vel, self.target);
        self.vel += acc * dt;
        self.pos += self.vel * dt;
    }
}
