//! Axis-aligned rectangle helpers
//!
//! Everything in the play field is an unrotated rectangle in canvas pixel
//! space (y grows downward). Held items are drawn rotated but collide as
//! their axis-aligned bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Closed horizontal containment test (`left <= x <= right`)
    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left() && x <= self.right()
    }

    /// Closest point of the rectangle to `point`
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.top(), self.bottom()),
        )
    }

    /// Euclidean distance from `point` to the rectangle (0 when inside)
    pub fn distance_to(&self, point: Vec2) -> f32 {
        point_rect_distance(point, self)
    }
}

/// Distance from a point to a rectangle: clamp the point into the rectangle's
/// extent and measure to the clamped point
#[inline]
pub fn point_rect_distance(point: Vec2, rect: &Rect) -> f32 {
    point.distance(rect.clamp_point(point))
}
