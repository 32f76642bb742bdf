//! Lifter Arcade - a conveyor-belt pick-and-place arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lifter, gripper, items, scoring)
//! - `game_loop`: Frame driver (delta clamping, round clock, round-end latch)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input helpers (keyboard mapping, joystick)
//! - `leaderboard`: Score records and the submission sink
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod game_loop;
pub mod leaderboard;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game_loop::{GameEvent, GameLoop, Hud};
pub use leaderboard::{LocalLeaderboard, ScoreRecord, ScoreSink, SubmitError};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Nominal frame time used for the first frame and in headless runs
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Ceiling for a single frame's delta time (tab resume, long frames)
    pub const MAX_FRAME_DT: f32 = 0.04;

    /// Canvas dimensions below these are treated as these
    pub const MIN_CANVAS_WIDTH: f32 = 320.0;
    pub const MIN_CANVAS_HEIGHT: f32 = 240.0;

    /// Conveyor surface as a fraction of canvas height
    pub const CONVEYOR_Y_RATIO: f32 = 0.62;
    /// Belt thickness (drawn below the surface line)
    pub const CONVEYOR_THICKNESS: f32 = 14.0;

    /// Target bins: top edge and height as fractions of canvas height
    pub const TARGET_TOP_RATIO: f32 = 0.80;
    pub const TARGET_HEIGHT_RATIO: f32 = 0.14;
    /// Fraction of each target slot the bin occupies horizontally
    pub const TARGET_FILL: f32 = 0.7;

    /// Base item size as a fraction of min(width, height), then clamped
    pub const ITEM_SIZE_RATIO: f32 = 0.07;
    pub const ITEM_SIZE_MIN: f32 = 26.0;
    pub const ITEM_SIZE_MAX: f32 = 64.0;

    /// Lifter size relative to the base item size
    pub const LIFTER_WIDTH_SCALE: f32 = 1.6;
    pub const LIFTER_HEIGHT_SCALE: f32 = 0.9;
    /// Gap between the lifter and the play field edges / conveyor
    pub const LIFTER_MARGIN: f32 = 10.0;

    /// Belt speed as a fraction of canvas width per second, clamped
    pub const BELT_SPEED_RATIO: f32 = 0.1;
    pub const BELT_SPEED_MIN: f32 = 60.0;
    pub const BELT_SPEED_MAX: f32 = 180.0;

    /// Lifter travel speed as a fraction of canvas width per second, floored
    pub const LIFTER_SPEED_RATIO: f32 = 0.5;
    pub const LIFTER_SPEED_MIN: f32 = 240.0;
}

/// Uniform random value in `[min, max)`; returns `min` for an empty range
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}
