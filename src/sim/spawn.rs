//! Enemy and heart creation
//!
//! Spawning only builds one entity; when to spawn is the tick loop's call.
//! All randomness goes through [`SpawnRng`] so tests can script the draws.

use glam::Vec2;
use rand::Rng;

use super::entity::{EnemyVariant, Entity, EntityKind, palette};
use crate::tuning::Tuning;

/// Source of the random choices a spawn makes
pub trait SpawnRng {
    /// Uniform lane in `0..lane_count`
    fn lane(&mut self, lane_count: usize) -> usize;
    /// Uniform speed in `[min, max)`
    fn enemy_speed(&mut self, min: f32, max: f32) -> f32;
    /// Uniform paint job
    fn variant(&mut self) -> EnemyVariant;
}

impl<R: Rng> SpawnRng for R {
    fn lane(&mut self, lane_count: usize) -> usize {
        self.random_range(0..lane_count.max(1))
    }

    fn enemy_speed(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.random_range(min..max)
        } else {
            min
        }
    }

    fn variant(&mut self) -> EnemyVariant {
        EnemyVariant::ALL[self.random_range(0..EnemyVariant::ALL.len())]
    }
}

/// An enemy car centered in a random lane, above the visible field
pub fn enemy<R: SpawnRng + ?Sized>(rng: &mut R, tuning: &Tuning, id: u32) -> Entity {
    let lane = rng.lane(tuning.lane_count).min(tuning.last_lane());
    let speed = rng.enemy_speed(tuning.enemy_min_speed, tuning.enemy_max_speed);
    let variant = rng.variant();

    let pos = Vec2::new(tuning.lane_x(lane, tuning.player_width), tuning.spawn_y);
    let size = Vec2::new(tuning.player_width, tuning.player_height);
    let mut entity = Entity::new(id, EntityKind::Enemy, pos, size, variant.color());
    entity.speed = speed;
    entity.lane = Some(lane);
    entity
}

/// A heart pickup in a random lane. Hearts have no speed of their own.
pub fn heart<R: SpawnRng + ?Sized>(rng: &mut R, tuning: &Tuning, id: u32) -> Entity {
    let lane = rng.lane(tuning.lane_count).min(tuning.last_lane());

    let pos = Vec2::new(tuning.lane_x(lane, tuning.heart_size), tuning.spawn_y);
    let mut entity = Entity::new(id, EntityKind::Heart, pos, Vec2::splat(tuning.heart_size), palette::HEART);
    entity.lane = Some(lane);
    entity
}

/// Replays fixed choices; for tests that need a known spawn
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    pub lane: usize,
    pub speed: f32,
    pub variant: EnemyVariant,
}

impl ScriptedRng {
    pub fn new(lane: usize, speed: f32, variant: EnemyVariant) -> Self {
        Self { lane, speed, variant }
    }
}

impl SpawnRng for ScriptedRng {
    fn lane(&mut self, lane_count: usize) -> usize {
        self.lane.min(lane_count.saturating_sub(1))
    }

    fn enemy_speed(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.speed.clamp(min, max)
        } else {
            min
        }
    }

    fn variant(&mut self) -> EnemyVariant {
        self.variant
    }
}
