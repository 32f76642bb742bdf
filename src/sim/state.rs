//! Simulation world and entity types
//!
//! All state that one round of play mutates lives in [`World`]. Entities are
//! plain records; the step functions in `tick`/`handling` mutate them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::gripper::{self, GripperPose};
use super::layout::Layout;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Item types. Each has its own aspect ratio and a matching target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Bottle,
    CircuitBoard,
    Glass,
    Box,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Bottle,
        ItemKind::CircuitBoard,
        ItemKind::Glass,
        ItemKind::Box,
    ];

    /// Width/height as multiples of the base item size
    pub fn proportions(self) -> Vec2 {
        match self {
            ItemKind::Bottle => Vec2::new(0.45, 1.0),
            ItemKind::CircuitBoard => Vec2::new(1.2, 0.35),
            ItemKind::Glass => Vec2::new(0.6, 0.8),
            ItemKind::Box => Vec2::new(1.0, 0.8),
        }
    }

    /// Pixel size for a given base size
    pub fn size(self, base: f32) -> Vec2 {
        self.proportions() * base
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Bottle => "Bottle",
            ItemKind::CircuitBoard => "Circuit Board",
            ItemKind::Glass => "Glass",
            ItemKind::Box => "Box",
        }
    }
}

/// How an item is currently moving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemMotion {
    /// Riding the belt at belt speed
    Sliding,
    /// Attached to the suction pad; position owned by the gripper
    Grabbed,
    /// Dropping straight down toward `landing_y` (top edge of the item).
    /// `target` is the id of the catching target, or `None` for the belt.
    Falling { landing_y: f32, target: Option<u32> },
}

/// A pickable item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub motion: ItemMotion,
    /// Visual tilt while held (radians)
    pub rotation: f32,
}

impl Item {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.motion, ItemMotion::Sliding)
    }

    pub fn is_grabbed(&self) -> bool {
        matches!(self.motion, ItemMotion::Grabbed)
    }

    pub fn is_falling(&self) -> bool {
        matches!(self.motion, ItemMotion::Falling { .. })
    }
}

/// A drop zone that accepts one item kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub kind: ItemKind,
    pub rect: Rect,
}

/// The player's suction lifter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lifter {
    /// Rendered (smoothed) top-left position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Position the spring pulls toward, driven by input
    pub target: Vec2,
    pub size: Vec2,
    /// Target travel speed (px/s at full input)
    pub speed: f32,
    pub vacuum: bool,
    /// Id of the item on the pad
    pub holding: Option<u32>,
}

impl Lifter {
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x * 0.5
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Place the lifter at rest at `pos`
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.target = pos;
        self.vel = Vec2::ZERO;
    }
}

/// The belt
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Conveyor {
    /// Surface line (item bottoms rest here)
    pub y: f32,
    /// Belt speed in px/s (left to right)
    pub speed: f32,
}

/// Score and time for the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundClock {
    pub score: i64,
    pub time_left: f32,
    pub paused: bool,
    /// Latched once the round-ended notification has fired
    pub ended: bool,
}

impl RoundClock {
    pub fn new(round_seconds: f32) -> Self {
        Self {
            score: 0,
            time_left: round_seconds,
            paused: false,
            ended: false,
        }
    }

    /// Whether a simulation step should run this frame
    pub fn is_running(&self) -> bool {
        !self.paused && self.time_left > 0.0
    }

    /// Time remaining as shown on the HUD
    pub fn seconds_display(&self) -> u32 {
        self.time_left.max(0.0).ceil() as u32
    }
}

/// Round counters, for the end screen and for tests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundStats {
    pub spawned: u32,
    pub grabs: u32,
    pub matches: u32,
    pub mismatches: u32,
    pub returned_to_belt: u32,
    pub despawned: u32,
}

/// Complete simulation state for one round
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    /// Larger grab reach in fullscreen
    pub fullscreen: bool,
    pub layout: Layout,
    pub conveyor: Conveyor,
    pub targets: Vec<Target>,
    pub lifter: Lifter,
    /// Horizontal anchor of the gripper tube at the top of the field
    pub anchor_x: f32,
    /// Gripper geometry computed once per step
    pub pose: GripperPose,
    /// Active items (in spawn order)
    pub items: Vec<Item>,
    pub clock: RoundClock,
    pub spawner: Spawner,
    pub stats: RoundStats,
    next_id: u32,
}

impl World {
    /// Start a round on a canvas of the given size
    pub fn new(tuning: Tuning, width: f32, height: f32, seed: u64) -> Self {
        let layout = Layout::for_canvas(width, height);
        let clock = RoundClock::new(tuning.round_seconds);

        let start = Vec2::new(
            (layout.width - layout.lifter_size.x) * 0.5,
            layout.lifter_bounds().max.y * 0.5,
        );
        let lifter = Lifter {
            pos: start,
            vel: Vec2::ZERO,
            target: start,
            size: layout.lifter_size,
            speed: layout.lifter_speed,
            vacuum: false,
            holding: None,
        };
        let anchor_x = lifter.center_x();
        let pose = gripper::solve(anchor_x, lifter.center_x(), lifter.pos.y, tuning.max_sway);

        log::info!(
            "Round start: canvas {}x{}, {} targets, seed {}",
            layout.width,
            layout.height,
            layout.targets.len(),
            seed
        );

        Self {
            spawner: Spawner::new(seed, &tuning),
            fullscreen: false,
            conveyor: layout.conveyor(),
            targets: layout.targets.clone(),
            layout,
            lifter,
            anchor_x,
            pose,
            items: Vec::new(),
            clock,
            stats: RoundStats::default(),
            tuning,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: u32) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn target(&self, id: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Item currently on the pad
    pub fn held_item(&self) -> Option<&Item> {
        self.lifter.holding.and_then(|id| self.item(id))
    }

    /// Maximum pad-to-item distance for a grab
    pub fn reach(&self) -> f32 {
        let factor = self.tuning.reach_factor_for(self.fullscreen);
        self.tuning
            .min_reach
            .max(self.lifter.size.min_element() * factor)
    }

    /// Gravity for the current canvas (px/s²)
    pub fn gravity(&self) -> f32 {
        self.tuning
            .gravity_min
            .max(self.layout.height * self.tuning.gravity_scale)
    }

    /// Insert an item resting on the belt with its left edge at `x`
    pub fn place_item_on_belt(&mut self, kind: ItemKind, x: f32) -> u32 {
        let id = self.next_entity_id();
        let size = kind.size(self.layout.item_base);
        self.items.push(Item {
            id,
            kind,
            pos: Vec2::new(x, self.conveyor.y - size.y),
            size,
            vel: Vec2::new(self.conveyor.speed, 0.0),
            motion: ItemMotion::Sliding,
            rotation: 0.0,
        });
        id
    }

    /// Recompute the cached gripper pose from the current lifter and anchor
    pub fn refresh_pose(&mut self) {
        self.pose = gripper::solve(
            self.anchor_x,
            self.lifter.center_x(),
            self.lifter.pos.y,
            self.tuning.max_sway,
        );
    }
}
