//! Frame to vertex list
//!
//! Draw order: grass, road, lane markings, road borders, traffic and hearts,
//! player, HUD hearts.

use glam::Vec2;

use super::Frame;
use super::shapes;
use super::vertex::{Vertex, colors, rgb};
use crate::sim::palette;

const MARKING_WIDTH: f32 = 4.0;
const MARKING_DASH: f32 = 20.0;
const MARKING_GAP: f32 = 20.0;
const BORDER_WIDTH: f32 = 6.0;
const HUD_HEART_SIZE: f32 = 22.0;
const HUD_HEART_GAP: f32 = 4.0;
const HUD_TOP: f32 = 10.0;

/// Build every triangle for `frame` in field coordinates
pub fn build(frame: &Frame<'_>) -> Vec<Vertex> {
    let tuning = frame.tuning;
    let (w, h) = (tuning.canvas_width, tuning.canvas_height);
    let road_x = tuning.road_x();
    let road_width = tuning.lane_width * tuning.lane_count as f32;

    let mut out = Vec::with_capacity(1024 + frame.entities.len() * 600);

    shapes::rect(&mut out, Vec2::ZERO, Vec2::new(w, h), colors::GRASS);
    shapes::rect(&mut out, Vec2::new(road_x, 0.0), Vec2::new(road_width, h), colors::ROAD);

    for lane in 1..tuning.lane_count {
        shapes::dashed_vline(
            &mut out,
            road_x + lane as f32 * tuning.lane_width,
            0.0,
            h,
            MARKING_WIDTH,
            MARKING_DASH,
            MARKING_GAP,
            frame.road_offset,
            colors::MARKING,
        );
    }

    shapes::vline(&mut out, road_x, 0.0, h, BORDER_WIDTH, colors::BORDER);
    shapes::vline(&mut out, road_x + road_width, 0.0, h, BORDER_WIDTH, colors::BORDER);

    for entity in frame.entities {
        shapes::entity(&mut out, entity);
    }
    shapes::entity(&mut out, frame.player);

    hud_hearts(&mut out, frame.hud.lives, w);

    out
}

/// One heart per life, centered along the top edge
fn hud_hearts(out: &mut Vec<Vertex>, lives: u8, canvas_width: f32) {
    let stride = HUD_HEART_SIZE + HUD_HEART_GAP;
    let start_x = canvas_width / 2.0 - lives as f32 * stride / 2.0;
    for i in 0..lives {
        let pos = Vec2::new(start_x + i as f32 * stride, HUD_TOP);
        shapes::pixel_heart(out, pos, HUD_HEART_SIZE, rgb(palette::HEART));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::AppPhase;
    use crate::sim::RaceState;

    #[test]
    fn test_scene_grows_with_entities_and_lives() {
        let mut state = RaceState::new(11);
        let base = build(&Frame::new(AppPhase::Playing, &state)).len();

        state.spawn_enemy();
        let with_enemy = build(&Frame::new(AppPhase::Playing, &state)).len();
        assert!(with_enemy > base);

        state.lives = 3;
        let with_lives = build(&Frame::new(AppPhase::Playing, &state)).len();
        assert!(with_lives > with_enemy);
    }

    #[test]
    fn test_scene_starts_with_grass() {
        let state = RaceState::new(11);
        let vertices = build(&Frame::new(AppPhase::Playing, &state));
        assert_eq!(vertices.len() % 3, 0);
        assert_eq!(vertices[0].color, colors::GRASS);
    }
}
