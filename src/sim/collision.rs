//! Axis-aligned overlap tests
//!
//! Boxes are shrunk on every side before testing so near-misses don't count.

use glam::Vec2;

use super::entity::Entity;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn of(entity: &Entity) -> Self {
        Self::new(entity.pos, entity.max())
    }

    /// Shrink by `buffer` on every side
    pub fn inset(self, buffer: f32) -> Self {
        Self::new(self.min + Vec2::splat(buffer), self.max - Vec2::splat(buffer))
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// True if the two entities' boxes overlap after insetting each by `buffer`.
///
/// Symmetric: neither argument is assumed to be the player.
pub fn check_collision(a: &Entity, b: &Entity, buffer: f32) -> bool {
    Aabb::of(a).inset(buffer).overlaps(&Aabb::of(b).inset(buffer))
}
