//! Retro Racer - A three-lane arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, run state)
//! - `input`: Keyboard/swipe to lane-change mapping
//! - `lifecycle`: Boot/menu/playing/game-over host state machine
//! - `renderer`: Render pass contract, WebGPU pipeline and a text-grid fallback
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod lifecycle;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use input::{InputMapper, Key};
pub use lifecycle::{AppEvent, AppPhase, Host};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (design values)
pub mod consts {
    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Road layout
    pub const LANE_WIDTH: f32 = 100.0;
    pub const LANE_COUNT: usize = 3;

    /// Player car
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 70.0;
    /// Gap between the player's rear bumper and the bottom edge
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    /// Fraction of the remaining lateral distance covered per tick
    pub const LANE_APPROACH: f32 = 0.4;

    /// Speed ramp
    pub const BASE_SPEED: f32 = 10.0;
    pub const SPEED_STEP_TICKS: u64 = 200;
    pub const ACCEL_PER_TICK: f32 = 0.05;
    pub const MAX_SPEED: f32 = 22.0; // 220 on the HUD

    /// Progress accounting
    pub const DISTANCE_DIVISOR: f32 = 10.0;
    pub const ROAD_SCROLL_FACTOR: f32 = 2.0;
    pub const ROAD_DASH_PERIOD: f32 = 40.0;

    /// Enemy spawning
    pub const SPAWN_Y: f32 = -100.0;
    pub const ENEMY_MIN_SPEED: f32 = 2.0;
    pub const ENEMY_MAX_SPEED: f32 = 5.0;
    pub const SPAWN_INTERVAL_START: u64 = 80;
    pub const SPAWN_INTERVAL_FLOOR: u64 = 20;
    /// Score needed to shave one tick off the spawn interval
    pub const SPAWN_SCORE_PER_TICK: u64 = 300;
    /// No spawns below this speed
    pub const SPAWN_MIN_SPEED: f32 = 2.0;
    /// Keeps enemies drifting toward the player even when faster
    pub const ENEMY_RELATIVE_BIAS: f32 = 2.0;
    pub const OVERTAKE_BONUS: u64 = 50;
    /// Entities above this y are stale and culled
    pub const CULL_TOP_Y: f32 = -200.0;

    /// Heart pickups
    pub const HEART_SIZE: f32 = 55.0;
    pub const HEART_DISTANCE_INTERVAL: f32 = 1000.0;

    /// Lives
    pub const START_LIVES: u8 = 1;
    pub const MAX_LIVES: u8 = 5;

    /// Collision box inset on every side
    pub const COLLISION_BUFFER: f32 = 8.0;

    /// Horizontal drag (px) per lane change
    pub const SWIPE_THRESHOLD: f32 = 40.0;
}

/// Left edge of the road for a field of `canvas_width` holding `lane_count` lanes
#[inline]
pub fn road_x(canvas_width: f32, lane_width: f32, lane_count: usize) -> f32 {
    (canvas_width - lane_width * lane_count as f32) / 2.0
}

/// X of a body of `body_width` centered in `lane`
#[inline]
pub fn lane_x(road_x: f32, lane_width: f32, lane: usize, body_width: f32) -> f32 {
    road_x + lane as f32 * lane_width + (lane_width - body_width) / 2.0
}
