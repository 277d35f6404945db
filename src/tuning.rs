//! Data-driven game balance
//!
//! Every number the simulation uses lives here. `Tuning::default()` carries the
//! shipped design values from [`crate::consts`]; a JSON document may override any
//! subset of them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning document is rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or a field has the wrong type
    Parse(serde_json::Error),
    /// Parsed, but a value would break a simulation invariant
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance and field geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub lane_width: f32,
    pub lane_count: usize,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_margin: f32,
    pub lane_approach: f32,

    // === Speed ramp ===
    pub base_speed: f32,
    pub speed_step_ticks: u64,
    pub accel_per_tick: f32,
    pub max_speed: f32,

    // === Progress ===
    pub distance_divisor: f32,
    pub road_scroll_factor: f32,
    pub road_dash_period: f32,

    // === Enemies ===
    pub spawn_y: f32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    pub spawn_interval_start: u64,
    pub spawn_interval_floor: u64,
    pub spawn_score_per_tick: u64,
    pub spawn_min_speed: f32,
    pub enemy_relative_bias: f32,
    pub overtake_bonus: u64,
    pub cull_top_y: f32,

    // === Hearts ===
    pub heart_size: f32,
    pub heart_distance_interval: f32,

    // === Lives ===
    pub start_lives: u8,
    pub max_lives: u8,

    // === Collision / input ===
    pub collision_buffer: f32,
    pub swipe_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            lane_width: LANE_WIDTH,
            lane_count: LANE_COUNT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            lane_approach: LANE_APPROACH,

            base_speed: BASE_SPEED,
            speed_step_ticks: SPEED_STEP_TICKS,
            accel_per_tick: ACCEL_PER_TICK,
            max_speed: MAX_SPEED,

            distance_divisor: DISTANCE_DIVISOR,
            road_scroll_factor: ROAD_SCROLL_FACTOR,
            road_dash_period: ROAD_DASH_PERIOD,

            spawn_y: SPAWN_Y,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            spawn_interval_start: SPAWN_INTERVAL_START,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
            spawn_score_per_tick: SPAWN_SCORE_PER_TICK,
            spawn_min_speed: SPAWN_MIN_SPEED,
            enemy_relative_bias: ENEMY_RELATIVE_BIAS,
            overtake_bonus: OVERTAKE_BONUS,
            cull_top_y: CULL_TOP_Y,

            heart_size: HEART_SIZE,
            heart_distance_interval: HEART_DISTANCE_INTERVAL,

            start_lives: START_LIVES,
            max_lives: MAX_LIVES,

            collision_buffer: COLLISION_BUFFER,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot honor
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lane_count == 0 {
            return Err(TuningError::Invalid("lane_count must be at least 1"));
        }
        if self.lane_width <= 0.0 || self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(TuningError::Invalid("field dimensions must be positive"));
        }
        if self.enemy_min_speed > self.enemy_max_speed {
            return Err(TuningError::Invalid("enemy speed range is inverted"));
        }
        if self.speed_step_ticks == 0 {
            return Err(TuningError::Invalid("speed_step_ticks must be non-zero"));
        }
        if self.spawn_interval_floor == 0 || self.spawn_score_per_tick == 0 {
            return Err(TuningError::Invalid("spawn interval terms must be non-zero"));
        }
        if self.distance_divisor <= 0.0 || self.road_dash_period <= 0.0 {
            return Err(TuningError::Invalid("divisors must be positive"));
        }
        if self.start_lives == 0 || self.max_lives < self.start_lives {
            return Err(TuningError::Invalid("lives must satisfy 0 < start_lives <= max_lives"));
        }
        if !(0.0..=1.0).contains(&self.lane_approach) {
            return Err(TuningError::Invalid("lane_approach must be within [0, 1]"));
        }
        Ok(())
    }

    /// Index of the middle lane (where every run starts)
    pub fn center_lane(&self) -> usize {
        self.lane_count / 2
    }

    /// Highest valid lane index
    pub fn last_lane(&self) -> usize {
        self.lane_count.saturating_sub(1)
    }

    /// Left edge of the road
    pub fn road_x(&self) -> f32 {
        crate::road_x(self.canvas_width, self.lane_width, self.lane_count)
    }

    /// X of a body of `width` centered in `lane`
    pub fn lane_x(&self, lane: usize, width: f32) -> f32 {
        crate::lane_x(self.road_x(), self.lane_width, lane, width)
    }

    /// Fixed y of the player car
    pub fn player_y(&self) -> f32 {
        self.canvas_height - self.player_height - self.player_bottom_margin
    }

    /// Ticks between enemy spawns at the given score
    pub fn spawn_interval(&self, score: u64) -> u64 {
        self.spawn_interval_start
            .saturating_sub(score / self.spawn_score_per_tick)
            .max(self.spawn_interval_floor)
    }

    /// Speed the player is ramping toward after `ticks` ticks
    pub fn target_speed(&self, ticks: u64) -> f32 {
        self.base_speed + (ticks / self.speed_step_ticks) as f32
    }
}
