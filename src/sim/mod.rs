//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Wall-clock time is passed in, never read
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod geom;
pub mod gripper;
pub mod handling;
pub mod input;
pub mod layout;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod tick;

pub use geom::{Rect, point_rect_distance};
pub use gripper::GripperPose;
pub use handling::Landing;
pub use input::InputState;
pub use layout::{Layout, LifterBounds};
pub use motion::Spring;
pub use spawner::Spawner;
pub use state::{
    Conveyor, Item, ItemKind, ItemMotion, Lifter, RoundClock, RoundStats, Target, World,
};
pub use tick::tick;
