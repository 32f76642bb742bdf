//! Frame driver
//!
//! Turns display-refresh timestamps into simulation steps: clamps the frame
//! delta, runs at most one step per frame, counts the round clock down and
//! reports the end of the round exactly once. Platform code owns the actual
//! scheduling and drawing; this type holds no platform handles.

use crate::consts::{FRAME_DT, MAX_FRAME_DT};
use crate::sim::{ItemKind, World, autopilot, tick};
use crate::sim::input::InputState;

/// Notifications for the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Time ran out; carries the final score
    RoundEnded { score: i64 },
}

/// Round state for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: i64,
    pub seconds_left: u32,
    pub held: Option<ItemKind>,
    pub paused: bool,
    pub ended: bool,
}

/// One round's simulation plus its frame timing
pub struct GameLoop {
    pub world: World,
    /// Live input, written by event handlers between frames
    pub input: InputState,
    /// Let the autopilot play
    pub demo: bool,
    last_time: Option<f64>,
}

impl GameLoop {
    pub fn new(world: World) -> Self {
        Self {
            world,
            input: InputState::default(),
            demo: false,
            last_time: None,
        }
    }

    /// Start a fresh round on the same canvas and settings
    pub fn restart(&mut self, seed: u64) {
        let mut world = World::new(
            self.world.tuning.clone(),
            self.world.layout.width,
            self.world.layout.height,
            seed,
        );
        world.fullscreen = self.world.fullscreen;
        self.world = world;
        self.input = InputState::default();
        self.last_time = None;
    }

    /// Delta time for a frame at `time_ms`, clamped to a sane ceiling
    fn frame_dt(&mut self, time_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => (((time_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => FRAME_DT,
        };
        self.last_time = Some(time_ms);
        dt
    }

    /// Advance one display frame. Returns the round-ended notification on
    /// the first frame where the clock has run out, and never again.
    pub fn frame(&mut self, time_ms: f64) -> Option<GameEvent> {
        let dt = self.frame_dt(time_ms);

        if self.world.clock.is_running() {
            let input = if self.demo {
                autopilot::drive(&self.world)
            } else {
                self.input.clone()
            };
            tick(&mut self.world, &input, dt, time_ms);
            self.world.clock.time_left -= dt;
        }

        let clock = &mut self.world.clock;
        if clock.time_left <= 0.0 && !clock.ended {
            clock.ended = true;
            clock.time_left = 0.0;
            log::info!(
                "Round over: score {} ({} matched, {} mismatched, {} spawned)",
                clock.score,
                self.world.stats.matches,
                self.world.stats.mismatches,
                self.world.stats.spawned
            );
            return Some(GameEvent::RoundEnded { score: clock.score });
        }
        None
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.world.clock.paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.world.clock.ended || self.world.clock.paused == paused {
            return;
        }
        self.world.clock.paused = paused;
        // Keys released while paused would otherwise stick
        self.input.release_directions();
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
    }

    pub fn toggle_demo(&mut self) {
        self.demo = !self.demo;
        if !self.demo {
            // Hand control back without an unexpected vacuum flip
            self.input.release_directions();
            self.input.vacuum = self.world.lifter.vacuum;
        }
        log::info!("Demo mode: {}", self.demo);
    }

    pub fn hud(&self) -> Hud {
        let clock = &self.world.clock;
        Hud {
            score: clock.score,
            seconds_left: clock.seconds_display(),
            held: self.world.held_item().map(|i| i.kind),
            paused: clock.paused,
            ended: clock.ended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn game() -> GameLoop {
        GameLoop::new(World::new(Tuning::default(), 800.0, 600.0, 7))
    }

    #[test]
    fn test_idle_round_ends_once() {
        let mut game = game();
        let mut events = Vec::new();
        for i in 0..3700 {
            if let Some(e) = game.frame(i as f64 * FRAME_MS) {
                events.push(e);
            }
        }
        assert_eq!(events, vec![GameEvent::RoundEnded { score: 0 }]);
        assert_eq!(game.world.stats.grabs, 0);
        assert!(game.world.stats.spawned >= 1);
        assert!(game.hud().ended);
        assert_eq!(game.hud().seconds_left, 0);
    }

    #[test]
    fn test_latch_holds_after_end() {
        let mut game = game();
        game.world.clock.time_left = 0.05;
        let mut fired = 0;
        for i in 0..100 {
            fired += game.frame(i as f64 * FRAME_MS).is_some() as u32;
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_no_steps_after_end() {
        let mut game = game();
        game.world.clock.time_left = 0.01;
        game.frame(0.0);
        game.frame(FRAME_MS);
        let lifter = game.world.lifter.target;
        game.input.right = true;
        for i in 2..30 {
            game.frame(i as f64 * FRAME_MS);
        }
        assert_eq!(game.world.lifter.target, lifter);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut game = game();
        game.frame(0.0);
        let before = game.world.clock.time_left;
        // Tab resumed after five seconds in the background
        game.frame(5000.0);
        let spent = before - game.world.clock.time_left;
        assert!((spent - MAX_FRAME_DT).abs() < 1e-4);
    }

    #[test]
    fn test_backwards_timestamp_is_zero_dt() {
        let mut game = game();
        game.frame(1000.0);
        let before = game.world.clock.time_left;
        game.frame(900.0);
        assert_eq!(game.world.clock.time_left, before);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut game = game();
        game.frame(0.0);
        game.toggle_pause();
        let before = game.world.clock.time_left;
        for i in 1..120 {
            game.frame(i as f64 * FRAME_MS);
        }
        assert_eq!(game.world.clock.time_left, before);
        assert!(game.hud().paused);

        game.toggle_pause();
        game.frame(120.0 * FRAME_MS);
        assert!(game.world.clock.time_left < before);
    }

    #[test]
    fn test_pause_drops_held_keys() {
        let mut game = game();
        game.input.left = true;
        game.input.vacuum = true;
        game.set_paused(true);
        assert!(!game.input.left);
        assert!(game.input.vacuum);
    }

    #[test]
    fn test_hud_reports_held_item() {
        let mut game = game();
        let id = game.world.place_item_on_belt(ItemKind::Bottle, 100.0);
        game.world.item_mut(id).unwrap().motion = crate::sim::ItemMotion::Grabbed;
        game.world.lifter.holding = Some(id);
        assert_eq!(game.hud().held, Some(ItemKind::Bottle));
    }

    #[test]
    fn test_restart_resets_round() {
        let mut game = game();
        game.world.clock.score = 300;
        game.world.clock.time_left = 0.0;
        game.frame(0.0);
        game.world.fullscreen = true;
        game.restart(8);
        assert_eq!(game.world.clock.score, 0);
        assert!(!game.world.clock.ended);
        assert!(game.world.fullscreen);
        assert!(game.world.items.is_empty());
    }

    #[test]
    fn test_demo_plays_without_player_input() {
        let mut game = game();
        game.toggle_demo();
        for i in 0..(60 * 30) {
            game.frame(i as f64 * FRAME_MS);
        }
        assert!(game.world.stats.grabs > 0);
        game.toggle_demo();
        assert_eq!(game.input.vacuum, game.world.lifter.vacuum);
    }
}
