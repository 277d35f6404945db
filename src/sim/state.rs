//! Run state and end-of-run stats
//!
//! One `RaceState` lives for the whole session and is reset between runs.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, palette};
use super::spawn::{self, SpawnRng};
use crate::tuning::Tuning;

/// Entity id reserved for the player car
pub const PLAYER_ID: u32 = 0;

/// Summary handed out once when a run ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceStats {
    pub score: u64,
    pub distance: f32,
    /// Speed at the moment of the crash
    pub top_speed: f32,
    pub cause_of_death: String,
}

impl RaceStats {
    /// Distance in whole meters, as shown on the game-over screen
    pub fn meters(&self) -> u64 {
        self.distance.max(0.0).floor() as u64
    }
}

/// Mutable simulation state for one run.
///
/// Only the tick loop writes to it; renderers read it once per frame.
#[derive(Debug, Clone)]
pub struct RaceState<R = Pcg32> {
    /// Seed of the spawn RNG (for logging and replays)
    pub seed: u64,
    pub tuning: Tuning,
    pub player: Entity,
    /// Enemies and hearts. Order carries no meaning.
    pub entities: Vec<Entity>,
    /// Lane the player is steering toward
    pub lane: usize,
    pub score: u64,
    pub distance: f32,
    pub speed: f32,
    pub time_ticks: u64,
    pub lives: u8,
    pub next_heart_distance: f32,
    /// Lane-marking scroll, wraps at `road_dash_period`
    pub road_offset: f32,
    rng: R,
    next_id: u32,
}

impl RaceState<Pcg32> {
    /// Create a fresh run with default tuning and a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Tuning::default(), seed, Pcg32::seed_from_u64(seed))
    }
}

impl<R: SpawnRng> RaceState<R> {
    /// Create a fresh run drawing spawns from `rng`
    pub fn with_rng(tuning: Tuning, seed: u64, rng: R) -> Self {
        let player = Self::fresh_player(&tuning);
        Self {
            seed,
            lane: tuning.center_lane(),
            lives: tuning.start_lives,
            next_heart_distance: tuning.heart_distance_interval,
            tuning,
            player,
            entities: Vec::new(),
            score: 0,
            distance: 0.0,
            speed: 0.0,
            time_ticks: 0,
            road_offset: 0.0,
            rng,
            next_id: PLAYER_ID + 1,
        }
    }

    fn fresh_player(tuning: &Tuning) -> Entity {
        let lane = tuning.center_lane();
        let pos = Vec2::new(tuning.lane_x(lane, tuning.player_width), tuning.player_y());
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        let mut player = Entity::new(PLAYER_ID, EntityKind::Player, pos, size, palette::PLAYER);
        player.lane = Some(lane);
        player
    }

    /// Back to the start of a run: centered, stopped, one life, empty road.
    ///
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn reset(&mut self) {
        self.player = Self::fresh_player(&self.tuning);
        self.entities.clear();
        self.lane = self.tuning.center_lane();
        self.score = 0;
        self.distance = 0.0;
        self.speed = 0.0;
        self.time_ticks = 0;
        self.lives = self.tuning.start_lives;
        self.next_heart_distance = self.tuning.heart_distance_interval;
        self.road_offset = 0.0;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(PLAYER_ID + 1);
        id
    }

    /// Append one enemy car above the field
    pub fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_entity_id();
        let enemy = spawn::enemy(&mut self.rng, &self.tuning, id);
        log::debug!(
            "spawned enemy {} in lane {:?} at speed {:.2}",
            id,
            enemy.lane,
            enemy.speed
        );
        self.entities.push(enemy);
        id
    }

    /// Append one heart pickup above the field
    pub fn spawn_heart(&mut self) -> u32 {
        let id = self.next_entity_id();
        let heart = spawn::heart(&mut self.rng, &self.tuning, id);
        log::debug!("spawned heart {} in lane {:?}", id, heart.lane);
        self.entities.push(heart);
        id
    }

    /// Insert a prebuilt entity (scripted scenarios), assigning it a fresh id
    pub fn insert(&mut self, mut entity: Entity) -> u32 {
        let id = self.next_entity_id();
        entity.id = id;
        self.entities.push(entity);
        id
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EnemyVariant;
    use crate::sim::spawn::ScriptedRng;

    #[test]
    fn test_fresh_run() {
        let state = RaceState::new(1);
        assert_eq!(state.lives, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.lane, 1);
        assert_eq!(state.next_heart_distance, 1000.0);
        assert!(state.entities.is_empty());
        assert_eq!(state.player.pos, Vec2::new(180.0, 510.0));
    }

    #[test]
    fn test_reset_clears_progress() {
        let mut state = RaceState::new(5);
        state.spawn_enemy();
        state.spawn_heart();
        state.score = 1234;
        state.distance = 2222.0;
        state.speed = 17.0;
        state.lives = 4;
        state.lane = 0;
        state.time_ticks = 900;
        state.next_heart_distance = 3000.0;
        state.player.pos.x = 80.0;

        state.reset();

        assert!(state.entities.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.lives, 1);
        assert_eq!(state.lane, 1);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.next_heart_distance, 1000.0);
        assert_eq!(state.player.pos.x, 180.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut state = RaceState::with_rng(
            Tuning::default(),
            0,
            ScriptedRng::new(1, 3.0, EnemyVariant::Blue),
        );
        let a = state.spawn_enemy();
        let b = state.spawn_heart();
        let c = state.spawn_enemy();
        assert_ne!(a, PLAYER_ID);
        assert!(a != b && b != c && a != c);
        assert_eq!(state.entities.len(), 3);
    }

    #[test]
    fn test_stats_meters() {
        let stats = RaceStats {
            score: 10,
            distance: 1234.9,
            top_speed: 12.0,
            cause_of_death: "Crashed into a Blue Cruiser".to_string(),
        };
        assert_eq!(stats.meters(), 1234);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = RaceStats {
            score: 1,
            distance: 2.0,
            top_speed: 3.0,
            cause_of_death: "x".to_string(),
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"topSpeed\""));
        assert!(json.contains("\"causeOfDeath\""));
    }
}
