//! World to triangles
//!
//! A pure function of the simulation state; nothing here mutates the world
//! or remembers anything between frames. Output is in canvas pixel space.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::CONVEYOR_THICKNESS;
use crate::sim::{Item, World};

const RAIL_HEIGHT: f32 = 6.0;
const TUBE_WIDTH: f32 = 6.0;
const PAD_HEIGHT: f32 = 5.0;
const ROLLER_SEGMENTS: u32 = 16;

/// Build the frame's vertex list, back to front
pub fn build(world: &World) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(512 + world.items.len() * 6);
    let (w, h) = (world.layout.width, world.layout.height);

    // Anchor rail along the top
    out.extend(shapes::rect(Vec2::ZERO, Vec2::new(w, RAIL_HEIGHT), colors::RAIL));

    belt(world, &mut out);

    for target in &world.targets {
        out.extend(shapes::rect(target.rect.pos, target.rect.size, colors::bin(target.kind)));
        // Silhouette of the accepted kind
        let icon = target.kind.size(world.layout.item_base * 0.6);
        let icon_pos = target.rect.center() - icon * 0.5;
        out.extend(shapes::rect(icon_pos, icon, colors::kind(target.kind)));
    }

    // Everything not on the pad, then the gripper, then the held item on top
    for item in world.items.iter().filter(|i| !i.is_grabbed()) {
        item_quad(item, &mut out);
    }
    gripper(world, &mut out);
    if let Some(item) = world.held_item() {
        item_quad(item, &mut out);
    }

    let clock = &world.clock;
    if clock.ended {
        out.extend(shapes::rect(Vec2::ZERO, Vec2::new(w, h), colors::OVERLAY_ENDED));
    } else if clock.paused {
        out.extend(shapes::rect(Vec2::ZERO, Vec2::new(w, h), colors::OVERLAY_PAUSED));
    }

    out
}

fn belt(world: &World, out: &mut Vec<Vertex>) {
    let y = world.conveyor.y;
    let w = world.layout.width;
    let r = CONVEYOR_THICKNESS * 0.5;
    out.extend(shapes::rect(
        Vec2::new(0.0, y),
        Vec2::new(w, CONVEYOR_THICKNESS),
        colors::BELT,
    ));
    out.extend(shapes::rect(Vec2::new(0.0, y), Vec2::new(w, 2.0), colors::BELT_EDGE));
    for x in [r, w - r] {
        out.extend(shapes::circle(Vec2::new(x, y + r), r, colors::ROLLER, ROLLER_SEGMENTS));
    }
}

/// Item rectangle; held items swing about their top-center with the gripper
fn item_quad(item: &Item, out: &mut Vec<Vertex>) {
    let color = colors::kind(item.kind);
    if item.rotation == 0.0 {
        out.extend(shapes::rect(item.pos, item.size, color));
        return;
    }
    let half = item.size.x * 0.5;
    let pivot = item.pos + Vec2::new(half, 0.0);
    out.extend(shapes::rotated_rect(
        pivot,
        Vec2::new(-half, 0.0),
        Vec2::new(half, item.size.y),
        item.rotation,
        color,
    ));
}

/// Tube from the anchor, lifter body and suction pad, all from the cached pose
fn gripper(world: &World, out: &mut Vec<Vertex>) {
    let pose = &world.pose;
    let size = world.lifter.size;
    let half = size.x * 0.5;

    // Body sits above the suction point, at the end of the tube
    let body_top = pose.bottom + pose.to_world(Vec2::new(0.0, -size.y));
    out.extend(shapes::segment(
        Vec2::new(pose.anchor_x, 0.0),
        body_top,
        TUBE_WIDTH,
        colors::TUBE,
    ));
    out.extend(shapes::rotated_rect(
        pose.bottom,
        Vec2::new(-half, -size.y),
        Vec2::new(half, 0.0),
        pose.angle,
        colors::LIFTER,
    ));

    let pad = if world.lifter.vacuum {
        colors::PAD_ON
    } else {
        colors::PAD_OFF
    };
    out.extend(shapes::rotated_rect(
        pose.bottom,
        Vec2::new(-half * 0.6, -PAD_HEIGHT),
        Vec2::new(half * 0.6, 0.0),
        pose.angle,
        pad,
    ));
}
