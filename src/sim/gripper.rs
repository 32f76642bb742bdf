//! Gripper geometry
//!
//! The suction head hangs from an anchor at the top of the field on a tube
//! as long as the lifter's y. The anchor trails the lifter, so the tube leans
//! (sways) by an angle derived from the horizontal offset between the two.
//!
//! [`solve`] runs once per step; the resulting [`GripperPose`] is cached on
//! the world and read by grabbing, dropping, attachment and drawing alike.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gripper geometry for one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GripperPose {
    pub anchor_x: f32,
    pub tube_length: f32,
    /// Sway angle (radians), clamped to the configured maximum
    pub angle: f32,
    /// Suction point in world space
    pub bottom: Vec2,
}

impl GripperPose {
    /// Rotate a vector from gripper-local axes (x along the pad, y down the
    /// tube) into world space
    #[inline]
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        Vec2::from_angle(self.angle).rotate(local)
    }
}

/// Compute the gripper pose
pub fn solve(anchor_x: f32, lifter_center_x: f32, tube_length: f32, max_sway: f32) -> GripperPose {
    let angle = (lifter_center_x - anchor_x)
        .atan2(tube_length)
        .clamp(-max_sway, max_sway);
    let (sin, cos) = angle.sin_cos();
    GripperPose {
        anchor_x,
        tube_length,
        angle,
        bottom: Vec2::new(anchor_x - sin * tube_length, cos * tube_length),
    }
}

/// Ease the anchor a fraction of the way toward `desired`
#[inline]
pub fn ease_anchor(anchor_x: f32, desired: f32, follow: f32) -> f32 {
    anchor_x + (desired - anchor_x) * follow
}

/// Top-left position and rotation for an item of `size` hanging from the pad.
///
/// The item's top-center sits `gap` below the suction point and `nudge` to
/// the side, both measured along the gripper's own axes.
pub fn attach_position(pose: &GripperPose, size: Vec2, gap: f32, nudge: f32) -> (Vec2, f32) {
    let top_center = pose.bottom + pose.to_world(Vec2::new(nudge, gap));
    (
        Vec2::new(top_center.x - size.x * 0.5, top_center.y),
        pose.angle,
    )
}
