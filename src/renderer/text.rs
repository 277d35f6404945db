//! Character-grid renderer for terminals and tests

use super::{Frame, RenderPass};
use crate::lifecycle::AppPhase;
use crate::sim::{Entity, EntityKind};

const GRASS: char = ' ';
const ROAD: char = '.';
const MARKING: char = ':';
const BORDER: char = '|';

/// Rasterizes each frame into `cols` x `rows` characters plus a HUD line
#[derive(Debug, Clone)]
pub struct TextGrid {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
    hud: String,
    available: bool,
    frames_drawn: u64,
}

impl TextGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![GRASS; cols * rows],
            hud: String::new(),
            available: true,
            frames_drawn: 0,
        }
    }

    /// Simulate the output surface going away (or coming back)
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn hud_line(&self) -> &str {
        &self.hud
    }

    /// Character at (col, row), if in range
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// HUD line followed by the grid rows
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.hud.len() + (self.cols + 1) * self.rows + 1);
        text.push_str(&self.hud);
        text.push('\n');
        for row in self.cells.chunks(self.cols) {
            text.extend(row.iter());
            text.push('\n');
        }
        text
    }

    fn column_of(&self, x: f32, field_width: f32) -> usize {
        ((x / field_width) * self.cols as f32).floor().clamp(0.0, (self.cols - 1) as f32) as usize
    }

    fn fill(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, field: (f32, f32), c: char) {
        let (w, h) = field;
        let col_scale = self.cols as f32 / w;
        let row_scale = self.rows as f32 / h;

        let c0 = (x0 * col_scale).floor().max(0.0) as usize;
        let c1 = ((x1 * col_scale).ceil().max(0.0) as usize).min(self.cols);
        let r0 = (y0 * row_scale).floor().max(0.0) as usize;
        let r1 = ((y1 * row_scale).ceil().max(0.0) as usize).min(self.rows);

        for row in r0..r1 {
            for col in c0..c1 {
                self.cells[row * self.cols + col] = c;
            }
        }
    }

    fn glyph(entity: &Entity) -> char {
        match entity.kind {
            EntityKind::Player => 'A',
            EntityKind::Enemy => 'V',
            EntityKind::Heart => '+',
            EntityKind::Obstacle => 'x',
        }
    }
}

impl RenderPass for TextGrid {
    fn begin_frame(&mut self) -> bool {
        self.available
    }

    fn draw(&mut self, frame: &Frame<'_>) {
        let tuning = frame.tuning;
        let field = (tuning.canvas_width, tuning.canvas_height);
        let road_x = tuning.road_x();
        let road_right = road_x + tuning.lane_width * tuning.lane_count as f32;

        self.cells.fill(GRASS);
        self.fill(road_x, 0.0, road_right, field.1, field, ROAD);

        // Dashes scroll with the road; one row on, one row off
        let phase = (frame.road_offset / tuning.road_dash_period * 2.0) as usize;
        for lane in 1..tuning.lane_count {
            let col = self.column_of(road_x + lane as f32 * tuning.lane_width, field.0);
            for row in 0..self.rows {
                if (row + self.rows - phase % self.rows) % 2 == 0 {
                    self.cells[row * self.cols + col] = MARKING;
                }
            }
        }
        for x in [road_x, road_right] {
            let col = self.column_of(x, field.0);
            for row in 0..self.rows {
                self.cells[row * self.cols + col] = BORDER;
            }
        }

        for entity in frame.entities.iter().chain(std::iter::once(frame.player)) {
            let max = entity.max();
            self.fill(entity.pos.x, entity.pos.y, max.x, max.y, field, Self::glyph(entity));
        }

        let status = match frame.phase {
            AppPhase::Boot => "BOOTING",
            AppPhase::Menu => "PRESS START",
            AppPhase::Playing => "",
            AppPhase::GameOver => "CRASHED",
        };
        self.hud = format!(
            "{}  {}  LIVES: {}  SCORE: {}  {}",
            frame.hud.speed_label(),
            frame.hud.distance_label(),
            frame.hud.lives,
            frame.hud.score,
            status
        )
        .trim_end()
        .to_string();
        self.frames_drawn += 1;
    }
}
