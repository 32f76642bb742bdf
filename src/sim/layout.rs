//! Canvas-proportional layout
//!
//! Conveyor height, target bins, item and lifter sizes are all derived from
//! the canvas size. Resizing mid-round re-derives the layout and carries
//! in-flight entities over to the new geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::state::{Conveyor, ItemKind, ItemMotion, Target, World};
use crate::consts::*;

/// Allowed range for the lifter's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifterBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl LifterBounds {
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Geometry derived from one canvas size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub conveyor_y: f32,
    pub belt_speed: f32,
    /// Base item size; each kind scales it by its proportions
    pub item_base: f32,
    pub lifter_size: Vec2,
    pub lifter_speed: f32,
    pub targets: Vec<Target>,
}

impl Layout {
    /// Derive a layout, treating degenerate sizes as the minimum canvas
    pub fn for_canvas(width: f32, height: f32) -> Self {
        let width = sanitize(width, MIN_CANVAS_WIDTH);
        let height = sanitize(height, MIN_CANVAS_HEIGHT);

        let item_base =
            (width.min(height) * ITEM_SIZE_RATIO).clamp(ITEM_SIZE_MIN, ITEM_SIZE_MAX);
        let lifter_size = Vec2::new(
            item_base * LIFTER_WIDTH_SCALE,
            item_base * LIFTER_HEIGHT_SCALE,
        );

        Self {
            width,
            height,
            conveyor_y: height * CONVEYOR_Y_RATIO,
            belt_speed: (width * BELT_SPEED_RATIO).clamp(BELT_SPEED_MIN, BELT_SPEED_MAX),
            item_base,
            lifter_size,
            lifter_speed: (width * LIFTER_SPEED_RATIO).max(LIFTER_SPEED_MIN),
            targets: layout_targets(width, height),
        }
    }

    pub fn conveyor(&self) -> Conveyor {
        Conveyor {
            y: self.conveyor_y,
            speed: self.belt_speed,
        }
    }

    /// Lifter may roam the field above the belt, keeping a margin
    pub fn lifter_bounds(&self) -> LifterBounds {
        let min = Vec2::splat(LIFTER_MARGIN);
        let max = Vec2::new(
            self.width - self.lifter_size.x - LIFTER_MARGIN,
            self.conveyor_y - self.lifter_size.y - LIFTER_MARGIN,
        );
        LifterBounds {
            min,
            max: max.max(min),
        }
    }
}

fn sanitize(v: f32, min: f32) -> f32 {
    if v.is_finite() { v.max(min) } else { min }
}

/// One bin per item kind, evenly spaced along the bottom of the canvas
fn layout_targets(width: f32, height: f32) -> Vec<Target> {
    let slot = width / ItemKind::ALL.len() as f32;
    let bin_w = slot * TARGET_FILL;
    let top = height * TARGET_TOP_RATIO;
    let bin_h = height * TARGET_HEIGHT_RATIO;

    ItemKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| Target {
            id: i as u32,
            kind,
            rect: Rect::new(
                Vec2::new(slot * i as f32 + (slot - bin_w) * 0.5, top),
                Vec2::new(bin_w, bin_h),
            ),
        })
        .collect()
}

impl World {
    /// Re-derive layout for a new canvas size and carry entities over
    pub fn resize(&mut self, width: f32, height: f32) {
        let layout = Layout::for_canvas(width, height);
        if layout.width == self.layout.width && layout.height == self.layout.height {
            return;
        }
        let scale = Vec2::new(
            layout.width / self.layout.width,
            layout.height / self.layout.height,
        );
        log::info!(
            "Resize {}x{} -> {}x{}",
            self.layout.width,
            self.layout.height,
            layout.width,
            layout.height
        );

        self.conveyor = layout.conveyor();
        self.targets = layout.targets.clone();

        // Lifter keeps its relative place in the field
        self.lifter.size = layout.lifter_size;
        self.lifter.speed = layout.lifter_speed;
        self.lifter.pos *= scale;
        self.lifter.vel *= scale;
        let bounds = layout.lifter_bounds();
        self.lifter.target = bounds.clamp(self.lifter.target * scale);
        self.anchor_x *= scale.x;

        for item in &mut self.items {
            item.pos.x *= scale.x;
            match item.motion {
                ItemMotion::Sliding => {
                    item.pos.y = self.conveyor.y - item.size.y;
                    item.vel = Vec2::new(self.conveyor.speed, 0.0);
                }
                ItemMotion::Grabbed => {
                    // Re-attached from the new pose below
                    item.pos.y *= scale.y;
                }
                ItemMotion::Falling { target, .. } => {
                    item.pos.y *= scale.y;
                    item.vel.y *= scale.y;
                    let surface = target
                        .and_then(|id| self.targets.iter().find(|t| t.id == id))
                        .map(|t| t.rect.top())
                        .unwrap_or(self.conveyor.y);
                    item.motion = ItemMotion::Falling {
                        landing_y: surface - item.size.y,
                        target,
                    };
                }
            }
        }

        self.layout = layout;
        self.refresh_pose();
        super::handling::attach_held(self);
    }
}
