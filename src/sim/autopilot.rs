//! Demo mode: the game plays itself
//!
//! The autopilot parks the pad low over a pickup station and lets the belt
//! bring items to it. Once something is on the pad it carries it over the
//! matching bin, waits for the sway to settle and lets go.

use glam::Vec2;

use super::input::InputState;
use super::state::World;

/// Pixels of target error that map to full stick deflection
const STEER_RANGE: f32 = 40.0;
/// Fraction of a bin's width the pad must be within before releasing
const RELEASE_WINDOW: f32 = 0.3;
/// Lifter must be this slow (px/s) and this plumb (radians) to release
const RELEASE_MAX_SPEED: f32 = 20.0;
const RELEASE_MAX_SWAY: f32 = 0.02;

/// Produce this frame's input from the current world
pub fn drive(world: &World) -> InputState {
    let mut input = InputState::default();
    let pad = world.pose.bottom;

    let goal_x = match world.held_item() {
        Some(item) => {
            let Some(bin) = world.targets.iter().find(|t| t.kind == item.kind) else {
                // Nowhere to put it
                return input;
            };
            let settled = world.lifter.vel.length() < RELEASE_MAX_SPEED
                && world.pose.angle.abs() < RELEASE_MAX_SWAY;
            let over_bin = (pad.x - bin.rect.center().x).abs() < bin.rect.size.x * RELEASE_WINDOW;
            input.vacuum = !(settled && over_bin);
            bin.rect.center().x
        }
        None => {
            // Keep the vacuum off until the last drop has landed
            input.vacuum = !world.items.iter().any(|i| i.is_falling());
            station_x(world)
        }
    };

    let target_center = world.lifter.target.x + world.lifter.size.x * 0.5;
    let steer = ((goal_x - target_center) / STEER_RANGE).clamp(-1.0, 1.0);
    input.analog = Some(Vec2::new(steer, 1.0));
    input
}

/// Pickup station: over the gap between the first two bins, so nothing
/// dropped there by accident counts against the player
pub fn station_x(world: &World) -> f32 {
    match (world.targets.first(), world.targets.get(1)) {
        (Some(a), Some(b)) => (a.rect.right() + b.rect.left()) * 0.5,
        _ => world.layout.width * 0.25,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::state::ItemKind;
    use crate::sim::tick::tick;
    use crate::tuning::Tuning;

    #[test]
    fn test_heads_for_station_when_empty() {
        let world = World::new(Tuning::default(), 800.0, 600.0, 1);
        let input = drive(&world);
        let station = station_x(&world);
        assert!(station < world.lifter.center_x());
        assert!(input.analog.unwrap().x < 0.0);
        assert!(input.vacuum);
    }

    #[test]
    fn test_station_sits_between_bins() {
        let world = World::new(Tuning::default(), 800.0, 600.0, 1);
        let x = station_x(&world);
        assert!(world.targets.iter().all(|t| !t.rect.contains_x(x)));
    }

    #[test]
    fn test_vacuum_stays_off_while_something_falls() {
        let mut world = World::new(Tuning::default(), 800.0, 600.0, 1);
        let id = world.place_item_on_belt(ItemKind::Glass, 100.0);
        world.item_mut(id).unwrap().motion = crate::sim::ItemMotion::Falling {
            landing_y: 500.0,
            target: None,
        };
        assert!(!drive(&world).vacuum);
    }

    #[test]
    fn test_demo_round_scores_only_matches() {
        let mut world = World::new(Tuning::default(), 800.0, 600.0, 2024);
        let mut t = 0.0;
        for _ in 0..(60 * 60) {
            let input = drive(&world);
            t += FRAME_DT as f64 * 1000.0;
            tick(&mut world, &input, FRAME_DT, t);
        }
        assert!(world.stats.grabs > 0);
        assert!(world.stats.matches > 0);
        assert_eq!(world.stats.mismatches, 0);
        assert_eq!(world.clock.score, world.stats.matches as i64 * 100);
    }
}
