//! Rendering
//!
//! The simulation hands a [`Frame`] to a [`RenderPass`] once per tick. Renderers
//! only read it. Two implementations ship: a WebGPU pipeline drawing colored
//! triangles, and a text grid for terminals and tests.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::RenderState;
pub use text::TextGrid;

use crate::lifecycle::AppPhase;
use crate::sim::{Entity, RaceState};
use crate::tuning::Tuning;

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub speed: f32,
    pub distance: f32,
    pub lives: u8,
    pub score: u64,
}

impl Hud {
    /// Speed as km/h, e.g. `SPEED: 120`
    pub fn speed_label(&self) -> String {
        format!("SPEED: {}", (self.speed * 10.0).floor() as i64)
    }

    /// Distance in kilometers, e.g. `DIST: 1.2 KM`
    pub fn distance_label(&self) -> String {
        format!("DIST: {:.1} KM", self.distance / 1000.0)
    }
}

/// Read-only view of one tick's state
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub phase: AppPhase,
    pub tuning: &'a Tuning,
    pub player: &'a Entity,
    pub entities: &'a [Entity],
    pub road_offset: f32,
    pub hud: Hud,
}

impl<'a> Frame<'a> {
    pub fn new<R>(phase: AppPhase, state: &'a RaceState<R>) -> Self {
        Self {
            phase,
            tuning: &state.tuning,
            player: &state.player,
            entities: &state.entities,
            road_offset: state.road_offset,
            hud: Hud {
                speed: state.speed,
                distance: state.distance,
                lives: state.lives,
                score: state.score,
            },
        }
    }
}

/// Something that can draw a frame
pub trait RenderPass {
    /// False when the drawing surface is unavailable; the host then skips the
    /// whole tick and tries again next frame.
    fn begin_frame(&mut self) -> bool {
        true
    }

    fn draw(&mut self, frame: &Frame<'_>);
}

/// Discards frames; for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl RenderPass for NullRenderer {
    fn draw(&mut self, _frame: &Frame<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_labels() {
        let hud = Hud {
            speed: 12.37,
            distance: 1234.0,
            lives: 2,
            score: 99,
        };
        assert_eq!(hud.speed_label(), "SPEED: 123");
        assert_eq!(hud.distance_label(), "DIST: 1.2 KM");
    }

    #[test]
    fn test_frame_reads_state() {
        let state = RaceState::new(3);
        let frame = Frame::new(AppPhase::Playing, &state);
        assert_eq!(frame.hud.lives, 1);
        assert_eq!(frame.player.pos, state.player.pos);
        assert!(frame.entities.is_empty());
    }
}
