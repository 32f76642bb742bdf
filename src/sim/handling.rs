//! Pick, drop and landing
//!
//! Item lifecycle: `Sliding` → `Grabbed` → `Falling` → scored (removed) or
//! back to `Sliding`. Every transition reads the cached gripper pose so the
//! game logic and the drawn pad always agree.

use glam::Vec2;

use super::gripper;
use super::state::{ItemKind, ItemMotion, World};

/// What happened when a falling item touched down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// Dropped on the matching target
    Matched { item: ItemKind },
    /// Dropped on a target of another kind
    Mismatched { item: ItemKind, target: ItemKind },
    /// Fell back onto the belt
    Belt,
}

impl Landing {
    /// Score change for this landing
    pub fn score_delta(&self, match_points: i64, mismatch_penalty: i64) -> i64 {
        match self {
            Landing::Matched { .. } => match_points,
            Landing::Mismatched { .. } => -mismatch_penalty,
            Landing::Belt => 0,
        }
    }
}

/// Grab the item nearest the suction point if it is within reach.
///
/// Only runs with the vacuum on and an empty pad. Returns the grabbed id.
pub fn try_grab(world: &mut World) -> Option<u32> {
    if !world.lifter.vacuum || world.lifter.holding.is_some() {
        return None;
    }

    let pad = world.pose.bottom;
    let mut nearest: Option<(usize, f32)> = None;
    for (idx, item) in world.items.iter().enumerate() {
        if item.is_grabbed() {
            continue;
        }
        let d = item.rect().distance_to(pad);
        // Strict comparison keeps the first of equally near items
        if nearest.is_none_or(|(_, best)| d < best) {
            nearest = Some((idx, d));
        }
    }

    let (idx, dist) = nearest?;
    let reach = world.reach();
    if dist >= reach {
        return None;
    }

    let item = &mut world.items[idx];
    item.motion = ItemMotion::Grabbed;
    item.vel = Vec2::ZERO;
    world.lifter.holding = Some(item.id);
    world.stats.grabs += 1;
    log::debug!(
        "Grabbed {:?} #{} (distance {:.1} < reach {:.1})",
        item.kind,
        item.id,
        dist,
        reach
    );
    Some(item.id)
}

/// Pin the held item under the pad
pub fn attach_held(world: &mut World) {
    let Some(id) = world.lifter.holding else {
        return;
    };
    let pose = world.pose;
    let (gap, nudge) = (world.tuning.grip_gap, world.tuning.side_nudge);
    match world.item_mut(id) {
        Some(item) => {
            let (pos, rotation) = gripper::attach_position(&pose, item.size, gap, nudge);
            item.pos = pos;
            item.rotation = rotation;
        }
        None => {
            log::warn!("Held item #{} vanished; clearing pad", id);
            world.lifter.holding = None;
        }
    }
}

/// Let go of the held item and decide where it will land.
///
/// Only the suction point's x is tested against the targets: anything
/// released above a bin's column commits to that bin.
pub fn release(world: &mut World) -> Option<u32> {
    let id = world.lifter.holding.take()?;
    let drop_x = world.pose.bottom.x;
    let catcher = world
        .targets
        .iter()
        .find(|t| t.rect.contains_x(drop_x))
        .map(|t| (t.id, t.rect.top()));
    let belt_y = world.conveyor.y;

    let item = world.item_mut(id)?;
    let (target, surface) = match catcher {
        Some((target_id, top)) => (Some(target_id), top),
        None => (None, belt_y),
    };
    item.rotation = 0.0;
    item.vel = Vec2::ZERO;
    item.motion = ItemMotion::Falling {
        landing_y: surface - item.size.y,
        target,
    };
    log::debug!(
        "Released {:?} #{} at x={:.1} toward {}",
        item.kind,
        item.id,
        drop_x,
        match target {
            Some(t) => format!("target {t}"),
            None => "belt".to_string(),
        }
    );
    Some(id)
}

/// Move every free item one step: slide along the belt or fall, and settle
/// anything that reached its landing height
pub fn advance_items(world: &mut World, dt: f32) -> Vec<Landing> {
    let gravity = world.gravity();
    let belt_speed = world.conveyor.speed;
    let mut landed: Vec<(usize, Option<u32>)> = Vec::new();

    for (idx, item) in world.items.iter_mut().enumerate() {
        match item.motion {
            ItemMotion::Sliding => {
                item.vel = Vec2::new(belt_speed, 0.0);
                item.pos.x += item.vel.x * dt;
            }
            ItemMotion::Grabbed => {}
            ItemMotion::Falling { landing_y, target } => {
                item.vel.x = 0.0;
                item.vel.y += gravity * dt;
                item.pos.y += item.vel.y * dt;
                if item.pos.y >= landing_y {
                    item.pos.y = landing_y;
                    item.vel.y = 0.0;
                    landed.push((idx, target));
                }
            }
        }
    }

    let mut outcomes = Vec::with_capacity(landed.len());
    let mut scored = Vec::new();
    for (idx, target) in landed {
        let outcome = settle(world, idx, target);
        if !matches!(outcome, Landing::Belt) {
            scored.push(idx);
        }
        outcomes.push(outcome);
    }
    // Indices were collected in ascending order
    for idx in scored.into_iter().rev() {
        world.items.remove(idx);
    }
    outcomes
}

/// Resolve one touchdown. Leaving the `Falling` state here is what makes the
/// evaluation happen exactly once per fall.
fn settle(world: &mut World, idx: usize, target: Option<u32>) -> Landing {
    let target_kind = target.and_then(|id| world.target(id)).map(|t| t.kind);
    let belt_speed = world.conveyor.speed;
    let item = &mut world.items[idx];

    let outcome = match target_kind {
        Some(kind) if kind == item.kind => Landing::Matched { item: item.kind },
        Some(kind) => Landing::Mismatched {
            item: item.kind,
            target: kind,
        },
        None => {
            item.motion = ItemMotion::Sliding;
            item.rotation = 0.0;
            item.vel = Vec2::new(belt_speed, 0.0);
            Landing::Belt
        }
    };

    let delta = outcome.score_delta(world.tuning.match_points, world.tuning.mismatch_penalty);
    world.clock.score += delta;
    match outcome {
        Landing::Matched { .. } => world.stats.matches += 1,
        Landing::Mismatched { .. } => world.stats.mismatches += 1,
        Landing::Belt => world.stats.returned_to_belt += 1,
    }
    log::debug!("Landing {:?}: score {:+} -> {}", outcome, delta, world.clock.score);
    outcome
}

/// Remove sliding items more than the margin past either edge
pub fn despawn(world: &mut World) -> usize {
    let margin = world.tuning.despawn_margin;
    let width = world.layout.width;
    let before = world.items.len();
    world.items.retain(|item| {
        if !item.is_sliding() {
            return true;
        }
        let past_right = item.pos.x > width + margin;
        let past_left = item.pos.x < -item.size.x - margin;
        !(past_right || past_left)
    });
    let removed = before - world.items.len();
    world.stats.despawned += removed as u32;
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::state::ItemKind;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn world() -> World {
        World::new(Tuning::default(), 800.0, 600.0, 5)
    }

    /// Put the pad straight over (x, y) with the gripper hanging plumb
    fn park_pad(world: &mut World, x: f32, y: f32) {
        let pos = Vec2::new(x - world.lifter.size.x * 0.5, y);
        world.lifter.place(pos);
        world.anchor_x = x;
        world.refresh_pose();
    }

    fn held_box(world: &mut World, pad_x: f32) -> u32 {
        let id = world.place_item_on_belt(ItemKind::Box, pad_x - 20.0);
        let item_top = world.item(id).unwrap().pos.y;
        park_pad(world, pad_x, item_top - 5.0);
        world.lifter.vacuum = true;
        assert_eq!(try_grab(world), Some(id));
        attach_held(world);
        id
    }

    #[test]
    fn test_no_grab_with_vacuum_off() {
        let mut world = world();
        let id = world.place_item_on_belt(ItemKind::Box, 300.0);
        let top = world.item(id).unwrap().pos.y;
        park_pad(&mut world, 320.0, top);
        assert_eq!(try_grab(&mut world), None);
        assert!(world.item(id).unwrap().is_sliding());
    }

    #[test]
    fn test_grab_nearest_within_reach() {
        let mut world = world();
        let far = world.place_item_on_belt(ItemKind::Glass, 100.0);
        let near = world.place_item_on_belt(ItemKind::Box, 400.0);
        let top = world.item(near).unwrap().pos.y;
        park_pad(&mut world, 420.0, top - 3.0);
        world.lifter.vacuum = true;

        assert_eq!(try_grab(&mut world), Some(near));
        assert_eq!(world.lifter.holding, Some(near));
        assert!(world.item(near).unwrap().is_grabbed());
        assert!(world.item(far).unwrap().is_sliding());
    }

    #[test]
    fn test_no_grab_beyond_reach() {
        let mut world = world();
        let id = world.place_item_on_belt(ItemKind::Box, 400.0);
        let top = world.item(id).unwrap().pos.y;
        let reach = world.reach();
        park_pad(&mut world, 420.0, top - reach - 1.0);
        world.lifter.vacuum = true;

        assert_eq!(try_grab(&mut world), None);
        assert!(world.lifter.holding.is_none());
        assert!(world.item(id).unwrap().is_sliding());
    }

    #[test]
    fn test_tie_goes_to_first_item() {
        let mut world = world();
        let first = world.place_item_on_belt(ItemKind::Box, 300.0);
        let second = world.place_item_on_belt(ItemKind::Box, 300.0);
        let top = world.item(first).unwrap().pos.y;
        park_pad(&mut world, 320.0, top - 2.0);
        world.lifter.vacuum = true;
        assert_eq!(try_grab(&mut world), Some(first));
        assert!(world.item(second).unwrap().is_sliding());
    }

    #[test]
    fn test_only_one_grab_while_holding() {
        let mut world = world();
        let id = held_box(&mut world, 400.0);
        world.place_item_on_belt(ItemKind::Glass, 390.0);
        assert_eq!(try_grab(&mut world), None);
        assert_eq!(world.lifter.holding, Some(id));
        assert_eq!(world.stats.grabs, 1);
    }

    #[test]
    fn test_held_item_hangs_under_pad() {
        let mut world = world();
        let id = held_box(&mut world, 400.0);
        let item = world.item(id).unwrap();
        let top_center = item.pos + Vec2::new(item.size.x * 0.5, 0.0);
        let expected = world.pose.bottom + Vec2::new(0.0, world.tuning.grip_gap);
        assert!((top_center - expected).length() < 1e-3);
    }

    #[test]
    fn test_held_item_ignores_belt() {
        let mut world = world();
        let id = held_box(&mut world, 400.0);
        let before = world.item(id).unwrap().pos;
        advance_items(&mut world, FRAME_DT);
        assert_eq!(world.item(id).unwrap().pos, before);
    }

    #[test]
    fn test_release_over_target_commits_to_it() {
        let mut world = world();
        let target = world.targets[2].clone();
        let id = held_box(&mut world, target.rect.center().x);
        assert_eq!(release(&mut world), Some(id));
        assert!(world.lifter.holding.is_none());

        let item = world.item(id).unwrap();
        assert_eq!(
            item.motion,
            ItemMotion::Falling {
                landing_y: target.rect.top() - item.size.y,
                target: Some(target.id),
            }
        );
        assert_eq!(item.vel, Vec2::ZERO);
        assert_eq!(item.rotation, 0.0);
    }

    #[test]
    fn test_release_between_targets_falls_to_belt() {
        let mut world = world();
        // Gap between the first two bins
        let gap_x = (world.targets[0].rect.right() + world.targets[1].rect.left()) * 0.5;
        let id = held_box(&mut world, gap_x);
        release(&mut world);
        let item = world.item(id).unwrap();
        assert_eq!(
            item.motion,
            ItemMotion::Falling {
                landing_y: world.conveyor.y - item.size.y,
                target: None,
            }
        );
    }

    #[test]
    fn test_release_with_empty_pad_is_noop() {
        let mut world = world();
        assert_eq!(release(&mut world), None);
    }

    #[test]
    fn test_falling_drops_straight_down() {
        let mut world = world();
        let target = world.targets[3].clone();
        let id = held_box(&mut world, target.rect.center().x);
        release(&mut world);
        let x = world.item(id).unwrap().pos.x;
        advance_items(&mut world, FRAME_DT);
        let item = world.item(id).unwrap();
        assert_eq!(item.pos.x, x);
        assert_eq!(item.vel.x, 0.0);
        assert!(item.vel.y > 0.0);
    }

    fn drop_until_landed(world: &mut World) -> Vec<Landing> {
        let mut all = Vec::new();
        for _ in 0..600 {
            all.extend(advance_items(world, FRAME_DT));
        }
        all
    }

    #[test]
    fn test_matching_target_scores_and_removes() {
        let mut world = world();
        let target = world.targets.iter().find(|t| t.kind == ItemKind::Box).unwrap().clone();
        let id = held_box(&mut world, target.rect.center().x);
        release(&mut world);
        let landings = drop_until_landed(&mut world);
        assert_eq!(landings, vec![Landing::Matched { item: ItemKind::Box }]);
        assert_eq!(world.clock.score, 100);
        assert!(world.item(id).is_none());
    }

    #[test]
    fn test_wrong_target_penalizes_and_removes() {
        let mut world = world();
        let target = world.targets.iter().find(|t| t.kind == ItemKind::Glass).unwrap().clone();
        let id = held_box(&mut world, target.rect.center().x);
        release(&mut world);
        let landings = drop_until_landed(&mut world);
        assert_eq!(
            landings,
            vec![Landing::Mismatched {
                item: ItemKind::Box,
                target: ItemKind::Glass
            }]
        );
        assert_eq!(world.clock.score, -50);
        assert!(world.item(id).is_none());
    }

    #[test]
    fn test_belt_landing_resumes_sliding() {
        let mut world = world();
        let gap_x = (world.targets[1].rect.right() + world.targets[2].rect.left()) * 0.5;
        let id = held_box(&mut world, gap_x);
        release(&mut world);

        let mut landings = Vec::new();
        while landings.is_empty() {
            landings = advance_items(&mut world, FRAME_DT);
        }
        assert_eq!(landings, vec![Landing::Belt]);
        let item = world.item(id).unwrap();
        assert!(item.is_sliding());
        assert!((item.rect().bottom() - world.conveyor.y).abs() < 1e-3);
        assert_eq!(item.vel, Vec2::new(world.conveyor.speed, 0.0));
        assert_eq!(world.clock.score, 0);

        // Next step it rides the belt again
        let x = item.pos.x;
        advance_items(&mut world, FRAME_DT);
        assert!(world.item(id).unwrap().pos.x > x);
    }

    #[test]
    fn test_despawn_past_right_edge() {
        let mut world = world();
        let gone = world.place_item_on_belt(ItemKind::Bottle, 800.0 + 41.0);
        let edge = world.place_item_on_belt(ItemKind::Bottle, 800.0 + 39.0);
        assert_eq!(despawn(&mut world), 1);
        assert!(world.item(gone).is_none());
        assert!(world.item(edge).is_some());
    }

    #[test]
    fn test_despawn_past_left_edge() {
        let mut world = world();
        let gone = world.place_item_on_belt(ItemKind::Box, -200.0);
        let w = world.item(gone).unwrap().size.x;
        let edge = world.place_item_on_belt(ItemKind::Box, -w - 39.0);
        // Belt direction does not matter
        assert!(world.item(gone).unwrap().vel.x > 0.0);
        assert_eq!(despawn(&mut world), 1);
        assert!(world.item(gone).is_none());
        assert!(world.item(edge).is_some());
    }

    #[test]
    fn test_despawn_skips_held_items() {
        let mut world = world();
        let id = held_box(&mut world, 400.0);
        world.item_mut(id).unwrap().pos.x = 5000.0;
        assert_eq!(despawn(&mut world), 0);
    }

    proptest! {
        #[test]
        fn prop_landing_scores_once(extra_steps in 1usize..300, kind_idx in 0usize..4) {
            let mut world = world();
            let target = world.targets[kind_idx].clone();
            held_box(&mut world, target.rect.center().x);
            release(&mut world);

            let mut landings = 0;
            while landings == 0 {
                landings += advance_items(&mut world, FRAME_DT).len();
            }
            let score = world.clock.score;
            for _ in 0..extra_steps {
                landings += advance_items(&mut world, FRAME_DT).len();
            }
            prop_assert_eq!(landings, 1);
            prop_assert_eq!(world.clock.score, score);
            let expected = if target.kind == ItemKind::Box { 100 } else { -50 };
            prop_assert_eq!(score, expected);
        }
    }
}
