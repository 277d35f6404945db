//! Keyboard and swipe to lane-change mapping
//!
//! The mapper owns only the desired lane. The tick loop reads it once per tick.

use crate::tuning::Tuning;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Start / retry
    Confirm,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "a" | "A" => Key::Left,
            "ArrowRight" | "d" | "D" => Key::Right,
            "Enter" | " " => Key::Confirm,
            _ => Key::Other,
        }
    }
}

/// Desired-lane tracker fed by discrete keys and drag gestures
#[derive(Debug, Clone)]
pub struct InputMapper {
    lane: usize,
    lane_count: usize,
    swipe_threshold: f32,
    /// Pointer x where the current swipe step started
    swipe_anchor: Option<f32>,
}

impl InputMapper {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lane: tuning.center_lane(),
            lane_count: tuning.lane_count.max(1),
            swipe_threshold: tuning.swipe_threshold,
            swipe_anchor: None,
        }
    }

    /// Back to the center lane, no gesture in progress
    pub fn reset(&mut self) {
        self.lane = self.lane_count / 2;
        self.swipe_anchor = None;
    }

    pub fn desired_lane(&self) -> usize {
        self.lane
    }

    pub fn swipe_anchor(&self) -> Option<f32> {
        self.swipe_anchor
    }

    /// One lane left, saturating at the leftmost lane
    pub fn shift_left(&mut self) {
        self.lane = self.lane.saturating_sub(1);
    }

    /// One lane right, saturating at the rightmost lane
    pub fn shift_right(&mut self) {
        self.lane = (self.lane + 1).min(self.lane_count - 1);
    }

    /// Apply a key press. Returns true if the lane request changed.
    pub fn key_down(&mut self, key: Key) -> bool {
        let before = self.lane;
        match key {
            Key::Left => self.shift_left(),
            Key::Right => self.shift_right(),
            Key::Confirm | Key::Other => {}
        }
        self.lane != before
    }

    /// Start tracking a drag at pointer `x`
    pub fn pointer_down(&mut self, x: f32) {
        self.swipe_anchor = Some(x);
    }

    /// Drag moved to `x`. Steps one lane once the drag passes the threshold,
    /// then re-anchors so a long drag can cross several lanes.
    pub fn pointer_move(&mut self, x: f32) -> bool {
        let Some(anchor) = self.swipe_anchor else {
            return false;
        };

        let diff = x - anchor;
        if diff.abs() <= self.swipe_threshold {
            return false;
        }

        if diff > 0.0 {
            self.shift_right();
        } else {
            self.shift_left();
        }
        self.swipe_anchor = Some(x);
        true
    }

    /// Drag ended
    pub fn pointer_up(&mut self) {
        self.swipe_anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> InputMapper {
        InputMapper::new(&Tuning::default())
    }

    #[test]
    fn test_starts_centered() {
        assert_eq!(mapper().desired_lane(), 1);
    }

    #[test]
    fn test_keys_step_one_lane_and_saturate() {
        let mut m = mapper();
        assert!(m.key_down(Key::Left));
        assert_eq!(m.desired_lane(), 0);
        assert!(!m.key_down(Key::Left));
        assert_eq!(m.desired_lane(), 0);

        m.key_down(Key::Right);
        m.key_down(Key::Right);
        assert!(!m.key_down(Key::Right));
        assert_eq!(m.desired_lane(), 2);

        assert!(!m.key_down(Key::Confirm));
        assert_eq!(m.desired_lane(), 2);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_key_name("a"), Key::Left);
        assert_eq!(Key::from_key_name("ArrowRight"), Key::Right);
        assert_eq!(Key::from_key_name("d"), Key::Right);
        assert_eq!(Key::from_key_name("Enter"), Key::Confirm);
        assert_eq!(Key::from_key_name("q"), Key::Other);
    }

    #[test]
    fn test_swipe_past_threshold_steps_and_reanchors() {
        let mut m = mapper();
        m.pointer_down(100.0);
        assert!(m.pointer_move(145.0));
        assert_eq!(m.desired_lane(), 2);
        assert_eq!(m.swipe_anchor(), Some(145.0));
    }

    #[test]
    fn test_short_swipe_does_nothing() {
        let mut m = mapper();
        m.pointer_down(100.0);
        assert!(!m.pointer_move(140.0));
        assert!(!m.pointer_move(60.0));
        assert_eq!(m.desired_lane(), 1);
        assert_eq!(m.swipe_anchor(), Some(100.0));
    }

    #[test]
    fn test_long_drag_crosses_lanes() {
        let mut m = mapper();
        m.pointer_down(300.0);
        m.pointer_move(250.0);
        m.pointer_move(200.0);
        assert_eq!(m.desired_lane(), 0);
        // Reversing direction steps back
        m.pointer_move(250.0);
        assert_eq!(m.desired_lane(), 1);
    }

    #[test]
    fn test_move_without_touch_is_ignored() {
        let mut m = mapper();
        assert!(!m.pointer_move(500.0));
        m.pointer_down(0.0);
        m.pointer_up();
        assert!(!m.pointer_move(500.0));
        assert_eq!(m.desired_lane(), 1);
    }

    #[test]
    fn test_reset() {
        let mut m = mapper();
        m.key_down(Key::Right);
        m.pointer_down(10.0);
        m.reset();
        assert_eq!(m.desired_lane(), 1);
        assert_eq!(m.swipe_anchor(), None);
    }
}
