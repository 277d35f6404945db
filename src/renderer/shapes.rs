//! Shape generation for 2D primitives
//!
//! Everything is built from axis-aligned quads in field coordinates
//! (origin top-left, y down).

use glam::Vec2;

use super::vertex::{Vertex, colors, rgb};
use crate::sim::{Entity, EntityKind, palette};

/// 11x10 pixel-art heart, `1` = filled
const HEART_MAP: [&str; 10] = [
    "00110001100",
    "01111011110",
    "11111111111",
    "11111111111",
    "11111111111",
    "01111111110",
    "00111111100",
    "00011111000",
    "00001110000",
    "00000100000",
];

/// Highlight pixels as (column, row)
const HEART_SHINE: [(usize, usize); 3] = [(2, 2), (2, 3), (3, 2)];

/// Push a filled rectangle (two triangles)
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let max = min + size;

    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

/// Push a vertical line of `width` centered on `x`
pub fn vline(out: &mut Vec<Vertex>, x: f32, y0: f32, y1: f32, width: f32, color: [f32; 4]) {
    rect(out, Vec2::new(x - width / 2.0, y0), Vec2::new(width, y1 - y0), color);
}

/// Push a dashed vertical line; `offset` slides the pattern downward
#[allow(clippy::too_many_arguments)]
pub fn dashed_vline(
    out: &mut Vec<Vertex>,
    x: f32,
    y0: f32,
    y1: f32,
    width: f32,
    dash: f32,
    gap: f32,
    offset: f32,
    color: [f32; 4],
) {
    let period = dash + gap;
    if period <= 0.0 {
        return;
    }

    let mut y = y0 + offset.rem_euclid(period) - period;
    while y < y1 {
        let start = y.max(y0);
        let end = (y + dash).min(y1);
        if end > start {
            vline(out, x, start, end, width, color);
        }
        y += period;
    }
}

/// Push the pixel-art heart scaled to `size` wide
pub fn pixel_heart(out: &mut Vec<Vertex>, pos: Vec2, size: f32, color: [f32; 4]) {
    let scale = size / 11.0;
    let pixel = Vec2::splat(scale.ceil());
    let cell = |col: usize, row: usize| {
        Vec2::new(
            (pos.x + col as f32 * scale).floor(),
            (pos.y + row as f32 * scale).floor(),
        )
    };

    for (row, line) in HEART_MAP.iter().enumerate() {
        for (col, c) in line.bytes().enumerate() {
            if c == b'1' {
                rect(out, cell(col, row), pixel, color);
            }
        }
    }

    for (col, row) in HEART_SHINE {
        rect(out, cell(col, row), pixel, colors::HEART_SHINE);
    }
}

/// Push an 8-bit car: body, two windows, and head or tail lights
pub fn car(out: &mut Vec<Vertex>, entity: &Entity) {
    let Entity { pos, size, .. } = *entity;
    let (w, h) = (size.x, size.y);

    rect(out, pos, size, rgb(entity.color));

    // Windshield and rear window
    rect(out, pos + Vec2::new(4.0, 10.0), Vec2::new(w - 8.0, 12.0), colors::WINDOW);
    rect(out, pos + Vec2::new(4.0, 35.0), Vec2::new(w - 8.0, 8.0), colors::WINDOW);

    // Player shows headlights at the front, traffic shows tail lights at the back
    let (light_y, light_color) = if entity.kind == EntityKind::Player {
        (2.0, colors::HEADLIGHT)
    } else {
        (h - 6.0, colors::TAILLIGHT)
    };
    let light = Vec2::new(8.0, 4.0);
    rect(out, pos + Vec2::new(2.0, light_y), light, light_color);
    rect(out, pos + Vec2::new(w - 10.0, light_y), light, light_color);
}

/// Push whatever shape represents `entity`
pub fn entity(out: &mut Vec<Vertex>, entity: &Entity) {
    match entity.kind {
        EntityKind::Heart => pixel_heart(out, entity.pos, entity.width(), rgb(entity.color)),
        EntityKind::Obstacle => rect(out, entity.pos, entity.size, rgb(palette::OBSTACLE)),
        _ => car(out, entity),
    }
}
