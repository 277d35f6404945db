//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded (or scripted) RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, check_collision};
pub use entity::{EnemyVariant, Entity, EntityKind, palette};
pub use spawn::{ScriptedRng, SpawnRng};
pub use state::{PLAYER_ID, RaceState, RaceStats};
pub use tick::{TickInput, TickOutcome, cause_of_death, tick};
