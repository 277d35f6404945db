//! Entity records for the player, enemy cars and heart pickups

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What an entity is. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Heart,
    /// Reserved for road debris; never spawned
    Obstacle,
}

/// Packed 0xRRGGBB colors
pub mod palette {
    pub const PLAYER: u32 = 0xef4444; // Red-500
    pub const ENEMY_BLUE: u32 = 0x3b82f6; // Blue-500
    pub const ENEMY_YELLOW: u32 = 0xeab308; // Yellow-500
    pub const ENEMY_PURPLE: u32 = 0xa855f7; // Purple-500
    pub const OBSTACLE: u32 = 0x78350f; // Brown-900
    pub const HEART: u32 = 0xef4444;
}

/// Enemy paint jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    Blue,
    Yellow,
    Purple,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 3] = [EnemyVariant::Blue, EnemyVariant::Yellow, EnemyVariant::Purple];

    pub fn color(self) -> u32 {
        match self {
            EnemyVariant::Blue => palette::ENEMY_BLUE,
            EnemyVariant::Yellow => palette::ENEMY_YELLOW,
            EnemyVariant::Purple => palette::ENEMY_PURPLE,
        }
    }

    pub fn from_color(color: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.color() == color)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyVariant::Blue => "Blue",
            EnemyVariant::Yellow => "Yellow",
            EnemyVariant::Purple => "Purple",
        }
    }
}

/// Any rectangle taking part in the simulation.
///
/// `pos` is the top-left corner. Identity is the `id`; two entities with the
/// same id are the same entity regardless of where they are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EntityKind,
    /// 0xRRGGBB
    pub color: u32,
    /// Own forward speed (road units per tick)
    pub speed: f32,
    pub lane: Option<usize>,
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2, color: u32) -> Self {
        Self {
            id,
            pos,
            size,
            kind,
            color,
            speed: 0.0,
            lane: None,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Paint job if this is an enemy car
    pub fn variant(&self) -> Option<EnemyVariant> {
        match self.kind {
            EntityKind::Enemy => EnemyVariant::from_color(self.color),
            _ => None,
        }
    }
}
