//! Item spawning
//!
//! Items enter off the left edge of the belt on a jittered wall-clock
//! interval. New items queue up behind the leftmost item already on the belt
//! so they never overlap or tailgate. A spawn that would start past the
//! left despawn line is dropped, so the off-screen queue never grows.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Item, ItemKind, ItemMotion, World};
use crate::random_range;
use crate::tuning::Tuning;

/// Spawn timing and randomness
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    /// Timestamp (ms) of the previous spawn; `None` until the first one
    last_spawn_ms: Option<f64>,
    /// Delay before the next spawn, redrawn after every spawn
    next_delay_ms: f64,
}

impl Spawner {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let next_delay_ms = draw_delay(&mut rng, tuning);
        Self {
            rng,
            last_spawn_ms: None,
            next_delay_ms,
        }
    }

    /// Whether enough wall-clock time has passed since the last spawn.
    /// The very first check arms the timer instead of spawning.
    pub fn due(&mut self, now_ms: f64) -> bool {
        match self.last_spawn_ms {
            Some(last) => now_ms - last >= self.next_delay_ms,
            None => {
                self.last_spawn_ms = Some(now_ms);
                false
            }
        }
    }

    /// Record a spawn at `now_ms` and draw a fresh delay
    pub fn mark_spawned(&mut self, now_ms: f64, tuning: &Tuning) {
        self.last_spawn_ms = Some(now_ms);
        self.next_delay_ms = draw_delay(&mut self.rng, tuning);
    }

    pub fn next_delay_ms(&self) -> f64 {
        self.next_delay_ms
    }

    fn random_kind(&mut self) -> ItemKind {
        ItemKind::ALL[self.rng.random_range(0..ItemKind::ALL.len())]
    }
}

fn draw_delay(rng: &mut Pcg32, tuning: &Tuning) -> f64 {
    random_range(rng, tuning.spawn_min_ms as f32, tuning.spawn_max_ms as f32) as f64
}

impl World {
    /// Roll one item, sometimes two. Returns how many were created.
    pub fn spawn(&mut self) -> usize {
        let count = if self
            .spawner
            .rng
            .random_bool(self.tuning.double_spawn_chance)
        {
            2
        } else {
            1
        };
        let mut created = 0;
        for _ in 0..count {
            let kind = self.spawner.random_kind();
            if self.spawn_kind(kind).is_some() {
                created += 1;
            }
        }
        created
    }

    /// Spawn one item of `kind` behind everything on the belt.
    /// Returns `None` when the belt is backed up past the despawn line.
    pub fn spawn_kind(&mut self, kind: ItemKind) -> Option<u32> {
        let size = kind.size(self.layout.item_base);
        let gap = self
            .tuning
            .min_spawn_gap
            .max(size.x * self.tuning.spawn_gap_factor);

        let leftmost = self
            .items
            .iter()
            .filter(|i| i.is_sliding())
            .map(|i| i.pos.x)
            .reduce(f32::min);
        let x = match leftmost {
            Some(left) => (left - gap - size.x).min(-size.x),
            None => -size.x,
        };
        if x < -size.x - self.tuning.despawn_margin {
            log::debug!("Belt backed up, skipped {:?}", kind);
            return None;
        }

        let id = self.next_entity_id();
        self.items.push(Item {
            id,
            kind,
            pos: Vec2::new(x, self.conveyor.y - size.y),
            size,
            vel: Vec2::new(self.conveyor.speed, 0.0),
            motion: ItemMotion::Sliding,
            rotation: 0.0,
        });
        self.stats.spawned += 1;
        log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, x);
        Some(id)
    }
}
