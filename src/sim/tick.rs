//! Simulation step
//!
//! Advances the world by one frame. Called at most once per animation frame
//! with that frame's (already clamped) delta time.

use super::gripper;
use super::handling::{self, Landing};
use super::input::InputState;
use super::motion::Spring;
use super::state::World;

/// Advance the world by one frame.
///
/// `now_ms` is the frame's wall-clock timestamp; spawning is paced by it
/// rather than by frame count.
pub fn tick(world: &mut World, input: &InputState, dt: f32, now_ms: f64) {
    // Vacuum changes requested since the last frame
    if input.vacuum != world.lifter.vacuum {
        world.lifter.vacuum = input.vacuum;
        if !input.vacuum {
            // Drop where the pad was last drawn
            handling::release(world);
        }
    }

    // Lifter: input moves the target, the spring moves the body
    let dir = input.direction(world.tuning.analog_deadzone);
    let bounds = world.layout.lifter_bounds();
    world.lifter.steer(dir, dt, &bounds);
    let spring = Spring {
        stiffness: world.tuning.spring_stiffness,
        damping: world.tuning.spring_damping,
    };
    world.lifter.follow(&spring, dt);

    // Gripper: anchor trails the lifter, pose is solved once for the frame
    world.anchor_x = gripper::ease_anchor(
        world.anchor_x,
        world.lifter.center_x(),
        world.tuning.anchor_follow,
    );
    world.refresh_pose();

    if world.spawner.due(now_ms) {
        world.spawn();
        world.spawner.mark_spawned(now_ms, &world.tuning);
    }

    for landing in handling::advance_items(world, dt) {
        if !matches!(landing, Landing::Belt) {
            log::info!("Scored {:?}, score now {}", landing, world.clock.score);
        }
    }

    if world.lifter.vacuum && world.lifter.holding.is_none() {
        handling::try_grab(world);
    }
    handling::attach_held(world);

    handling::despawn(world);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::state::{ItemKind, ItemMotion};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn world() -> World {
        World::new(Tuning::default(), 800.0, 600.0, 12345)
    }

    /// Park the lifter at rest with the pad plumb over `x`, as low as it goes
    fn park_low(world: &mut World, x: f32) {
        let bounds = world.layout.lifter_bounds();
        let pos = bounds.clamp(Vec2::new(x - world.lifter.size.x * 0.5, bounds.max.y));
        world.lifter.place(pos);
        world.anchor_x = world.lifter.center_x();
        world.refresh_pose();
    }

    /// Step with a frame clock that starts at `t0` ms
    fn run(world: &mut World, input: &InputState, frames: usize, t0: &mut f64) {
        for _ in 0..frames {
            *t0 += FRAME_DT as f64 * 1000.0;
            tick(world, input, FRAME_DT, *t0);
        }
    }

    /// Hold a box on the pad over `x`; returns its id
    fn grab_box_at(world: &mut World, x: f32, t: &mut f64) -> u32 {
        park_low(world, x);
        let id = world.place_item_on_belt(ItemKind::Box, x - 20.0);
        let input = InputState {
            vacuum: true,
            ..Default::default()
        };
        run(world, &input, 1, t);
        assert_eq!(world.lifter.holding, Some(id));
        id
    }

    #[test]
    fn test_idle_steps_keep_lifter_still() {
        let mut world = world();
        let start = world.lifter.pos;
        let mut t = 0.0;
        run(&mut world, &InputState::default(), 30, &mut t);
        assert!((world.lifter.pos - start).length() < 1e-3);
    }

    #[test]
    fn test_input_moves_lifter_smoothly() {
        let mut world = world();
        let start = world.lifter.pos;
        let input = InputState {
            right: true,
            ..Default::default()
        };
        let mut t = 0.0;
        run(&mut world, &input, 1, &mut t);
        // Target jumps by speed*dt, body lags behind it
        assert!(world.lifter.target.x > start.x);
        assert!(world.lifter.pos.x > start.x);
        assert!(world.lifter.pos.x < world.lifter.target.x);
        // Anchor lags the body, so the tube leans
        assert!(world.anchor_x < world.lifter.center_x());
        assert!(world.pose.angle > 0.0);
    }

    #[test]
    fn test_lifter_never_reaches_belt() {
        let mut world = world();
        let input = InputState {
            down: true,
            ..Default::default()
        };
        let mut t = 0.0;
        run(&mut world, &input, 600, &mut t);
        let bottom = world.lifter.pos.y + world.lifter.size.y;
        assert!(bottom <= world.conveyor.y - 10.0 + 0.5);
    }

    #[test]
    fn test_spawns_follow_wall_clock_not_frames() {
        let mut world = world();
        // First frame arms the timer
        tick(&mut world, &InputState::default(), FRAME_DT, 0.0);
        assert_eq!(world.stats.spawned, 0);
        // Many frames, no wall-clock progress: nothing spawns
        for _ in 0..200 {
            tick(&mut world, &InputState::default(), FRAME_DT, 10.0);
        }
        assert_eq!(world.stats.spawned, 0);
        // One frame with a big jump in wall-clock time spawns
        tick(&mut world, &InputState::default(), FRAME_DT, 1500.0);
        assert!(world.stats.spawned >= 1);
    }

    #[test]
    fn test_scenario_grab_in_same_step() {
        let mut world = world();
        let mut t = 0.0;
        let id = grab_box_at(&mut world, 400.0, &mut t);
        let item = world.item(id).unwrap();
        assert_eq!(item.motion, ItemMotion::Grabbed);
        // Already hanging under the pad
        let top_center = item.pos + Vec2::new(item.size.x * 0.5, 0.0);
        assert!((top_center - world.pose.bottom).length() <= world.tuning.grip_gap + 1e-3);
    }

    #[test]
    fn test_held_item_follows_lifter() {
        let mut world = world();
        let mut t = 0.0;
        let id = grab_box_at(&mut world, 400.0, &mut t);
        let input = InputState {
            vacuum: true,
            up: true,
            left: true,
            ..Default::default()
        };
        run(&mut world, &input, 30, &mut t);
        let item = world.item(id).unwrap();
        assert!(item.is_grabbed());
        assert_eq!(item.rotation, world.pose.angle);
        let (expected, _) = gripper::attach_position(
            &world.pose,
            item.size,
            world.tuning.grip_gap,
            world.tuning.side_nudge,
        );
        assert!((item.pos - expected).length() < 1e-3);
    }

    fn drop_over(kind: ItemKind) -> (World, u32) {
        let mut world = world();
        let mut t = 0.0;
        let x = world
            .targets
            .iter()
            .find(|tg| tg.kind == kind)
            .unwrap()
            .rect
            .center()
            .x;
        let id = grab_box_at(&mut world, x, &mut t);
        run(&mut world, &InputState::default(), 1, &mut t);
        (world, id)
    }

    #[test]
    fn test_scenario_matching_drop() {
        let (mut world, id) = drop_over(ItemKind::Box);
        let box_target = world.targets.iter().find(|tg| tg.kind == ItemKind::Box).unwrap().id;
        assert!(world.lifter.holding.is_none());
        assert!(matches!(
            world.item(id).unwrap().motion,
            ItemMotion::Falling { target: Some(t), .. } if t == box_target
        ));

        let mut t = 1000.0;
        run(&mut world, &InputState::default(), 120, &mut t);
        assert_eq!(world.clock.score, 100);
        assert!(world.item(id).is_none());
    }

    #[test]
    fn test_scenario_mismatched_drop() {
        let (mut world, id) = drop_over(ItemKind::Glass);
        let mut t = 1000.0;
        run(&mut world, &InputState::default(), 120, &mut t);
        assert_eq!(world.clock.score, -50);
        assert!(world.item(id).is_none());
        assert_eq!(world.stats.mismatches, 1);
    }

    #[test]
    fn test_scenario_drop_onto_belt() {
        let mut world = world();
        let mut t = 0.0;
        let gap_x = (world.targets[0].rect.right() + world.targets[1].rect.left()) * 0.5;
        let id = grab_box_at(&mut world, gap_x, &mut t);
        run(&mut world, &InputState::default(), 1, &mut t);
        assert!(matches!(
            world.item(id).unwrap().motion,
            ItemMotion::Falling { target: None, .. }
        ));

        run(&mut world, &InputState::default(), 60, &mut t);
        let item = world.item(id).unwrap();
        assert!(item.is_sliding());
        assert_eq!(item.vel.x, world.conveyor.speed);
        assert!((item.rect().bottom() - world.conveyor.y).abs() < 1e-3);
        assert_eq!(world.clock.score, 0);
    }

    #[test]
    fn test_every_item_in_exactly_one_mode() {
        let mut world = world();
        let mut t = 0.0;
        let inputs = [
            InputState {
                down: true,
                vacuum: true,
                ..Default::default()
            },
            InputState {
                right: true,
                vacuum: true,
                ..Default::default()
            },
            InputState {
                up: true,
                ..Default::default()
            },
        ];
        for round in 0..30 {
            run(&mut world, &inputs[round % inputs.len()], 20, &mut t);
            let grabbed: Vec<_> = world.items.iter().filter(|i| i.is_grabbed()).collect();
            assert!(grabbed.len() <= 1);
            match world.lifter.holding {
                Some(id) => assert_eq!(grabbed[0].id, id),
                None => assert!(grabbed.is_empty()),
            }
            for item in &world.items {
                let modes = [item.is_sliding(), item.is_grabbed(), item.is_falling()];
                assert_eq!(modes.iter().filter(|&&m| m).count(), 1);
            }
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(Tuning::default(), 800.0, 600.0, 99999);
        let mut b = World::new(Tuning::default(), 800.0, 600.0, 99999);
        let input = InputState {
            right: true,
            down: true,
            vacuum: true,
            ..Default::default()
        };
        let (mut ta, mut tb) = (0.0, 0.0);
        run(&mut a, &input, 300, &mut ta);
        run(&mut b, &input, 300, &mut tb);

        assert_eq!(a.items.len(), b.items.len());
        assert_eq!(a.stats.spawned, b.stats.spawned);
        for (x, y) in a.items.iter().zip(&b.items) {
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.pos, y.pos);
        }
        assert_eq!(a.lifter.pos, b.lifter.pos);
    }
}
