//! Per-frame simulation tick
//!
//! Core game loop that advances a run by one frame. A run that has ended
//! stays frozen until it is reset.

use super::check_collision;
use super::entity::{Entity, EntityKind};
use super::spawn::SpawnRng;
use super::state::{RaceState, RaceStats};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Lane the player wants to be in (clamped to the road)
    pub lane: usize,
}

/// Result of a tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Running,
    /// Lives ran out this tick; the run is over
    Finished(RaceStats),
}

/// Advance the run by one tick. No-op once the run has finished.
pub fn tick<R: SpawnRng>(state: &mut RaceState<R>, input: &TickInput) -> TickOutcome {
    if state.lives == 0 {
        return TickOutcome::Running;
    }

    state.lane = input.lane.min(state.tuning.last_lane());
    state.time_ticks += 1;

    steer(state);
    accelerate(state);
    advance_progress(state);

    let interval = state.tuning.spawn_interval(state.score);
    if state.time_ticks.is_multiple_of(interval) && state.speed > state.tuning.spawn_min_speed {
        state.spawn_enemy();
    }

    advance_entities(state);
    resolve_collisions(state)
}

/// Exponential approach toward the center of the target lane
fn steer<R>(state: &mut RaceState<R>) {
    let tuning = &state.tuning;
    let target_x = tuning.lane_x(state.lane, state.player.width());
    state.player.pos.x += (target_x - state.player.pos.x) * tuning.lane_approach;
    state.player.lane = Some(state.lane);
}

/// Creep toward the stepped target speed, never past the cap
fn accelerate<R>(state: &mut RaceState<R>) {
    let tuning = &state.tuning;
    let target = tuning.target_speed(state.time_ticks);
    if state.speed < target {
        state.speed += tuning.accel_per_tick;
    }
    state.speed = state.speed.min(tuning.max_speed);
    state.player.speed = state.speed;
}

/// Distance, score, road scroll and heart drops
fn advance_progress<R: SpawnRng>(state: &mut RaceState<R>) {
    if state.speed <= 0.0 {
        return;
    }

    state.distance += state.speed / state.tuning.distance_divisor;
    state.score += state.speed.floor() as u64;
    state.road_offset += state.speed * state.tuning.road_scroll_factor;
    if state.road_offset > state.tuning.road_dash_period {
        state.road_offset = 0.0;
    }

    if state.distance >= state.next_heart_distance {
        state.spawn_heart();
        state.next_heart_distance += state.tuning.heart_distance_interval;
    }
}

/// Downward screen speed of a non-player entity
fn relative_speed<R>(state: &RaceState<R>, entity: &Entity) -> f32 {
    match entity.kind {
        EntityKind::Heart => state.speed,
        _ => state.speed - entity.speed + state.tuning.enemy_relative_bias,
    }
}

/// Scroll everything down and drop what left the field
fn advance_entities<R>(state: &mut RaceState<R>) {
    let mut bonus = 0;
    for i in 0..state.entities.len() {
        let dy = relative_speed(state, &state.entities[i]);
        state.entities[i].pos.y += dy;
    }

    let bottom = state.tuning.canvas_height;
    let top = state.tuning.cull_top_y;
    let overtake_bonus = state.tuning.overtake_bonus;
    state.entities.retain(|e| {
        if e.pos.y > bottom {
            if e.kind == EntityKind::Enemy {
                bonus += overtake_bonus;
            }
            false
        } else {
            e.pos.y >= top
        }
    });
    state.score += bonus;
}

/// Test every entity against the player; hearts heal, enemies hurt
fn resolve_collisions<R>(state: &mut RaceState<R>) -> TickOutcome {
    let buffer = state.tuning.collision_buffer;
    let mut i = 0;
    while i < state.entities.len() {
        if !check_collision(&state.player, &state.entities[i], buffer) {
            i += 1;
            continue;
        }

        let hit = state.entities.swap_remove(i);
        match hit.kind {
            EntityKind::Heart => {
                state.lives = state.lives.saturating_add(1).min(state.tuning.max_lives);
                log::debug!("picked up heart {}, lives {}", hit.id, state.lives);
            }
            _ => {
                state.lives = state.lives.saturating_sub(1);
                log::debug!("hit {:?} {}, lives {}", hit.kind, hit.id, state.lives);
                if state.lives == 0 {
                    return TickOutcome::Finished(RaceStats {
                        score: state.score,
                        distance: state.distance,
                        top_speed: state.speed,
                        cause_of_death: cause_of_death(&hit),
                    });
                }
            }
        }
    }
    TickOutcome::Running
}

/// Game-over caption for whatever ended the run
pub fn cause_of_death(entity: &Entity) -> String {
    match entity.variant() {
        Some(variant) => format!("Crashed into a {} Cruiser", variant.as_str()),
        None => "Crashed into road debris".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::entity::{EnemyVariant, palette};
    use crate::sim::spawn::ScriptedRng;
    use crate::tuning::Tuning;

    fn scripted(lane: usize) -> RaceState<ScriptedRng> {
        RaceState::with_rng(
            Tuning::default(),
            0,
            ScriptedRng::new(lane, 3.0, EnemyVariant::Blue),
        )
    }

    fn hold(lane: usize) -> TickInput {
        TickInput { lane }
    }

    fn enemy_at(pos: Vec2, variant: EnemyVariant, speed: f32) -> Entity {
        let mut e = Entity::new(0, EntityKind::Enemy, pos, Vec2::new(40.0, 70.0), variant.color());
        e.speed = speed;
        e
    }

    fn heart_at(pos: Vec2) -> Entity {
        Entity::new(0, EntityKind::Heart, pos, Vec2::splat(55.0), palette::HEART)
    }

    #[test]
    fn test_lane_change_is_exponential() {
        let mut state = scripted(0);
        let start = state.player.pos.x;
        tick(&mut state, &hold(2));
        // 40% of the 100 units to the right lane
        assert!((state.player.pos.x - (start + 40.0)).abs() < 1e-4);
        tick(&mut state, &hold(2));
        assert!((state.player.pos.x - (start + 64.0)).abs() < 1e-4);
        for _ in 0..40 {
            tick(&mut state, &hold(2));
        }
        assert!((state.player.pos.x - 280.0).abs() < 0.01);
    }

    #[test]
    fn test_lane_input_is_clamped() {
        let mut state = scripted(0);
        tick(&mut state, &hold(7));
        assert_eq!(state.lane, 2);
    }

    #[test]
    fn test_speed_ramp() {
        let mut state = scripted(0);
        tick(&mut state, &hold(1));
        assert!((state.speed - 0.05).abs() < 1e-6);

        // Enemies all go to lane 0, player stays in lane 1
        for _ in 1..200 {
            tick(&mut state, &hold(1));
        }
        assert!(state.speed > 9.9 && state.speed <= 10.1);

        let mut last = state.speed;
        for _ in 0..2600 {
            if let TickOutcome::Finished(_) = tick(&mut state, &hold(1)) {
                panic!("player in lane 1 cannot be hit by lane-0 traffic");
            }
            assert!(state.speed >= last);
            assert!(state.speed <= 22.0);
            last = state.speed;
        }
        assert_eq!(state.speed, 22.0);
    }

    #[test]
    fn test_progress_accounting() {
        let mut state = scripted(0);
        state.speed = 12.0;
        // Target is 10, so no acceleration this tick
        tick(&mut state, &hold(1));
        assert!((state.distance - 1.2).abs() < 1e-5);
        assert_eq!(state.score, 12);
        assert!((state.road_offset - 24.0).abs() < 1e-5);

        tick(&mut state, &hold(1));
        // 48 > 40 wraps to zero
        assert_eq!(state.road_offset, 0.0);
    }

    #[test]
    fn test_no_progress_when_stopped() {
        let mut state = scripted(0);
        state.tuning.accel_per_tick = 0.0;
        tick(&mut state, &hold(1));
        assert_eq!(state.distance, 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_heart_spawns_at_threshold() {
        let mut state = scripted(0);
        state.speed = 10.0;
        state.distance = 999.5;
        tick(&mut state, &hold(1));
        assert_eq!(state.next_heart_distance, 2000.0);
        let hearts = state.entities.iter().filter(|e| e.kind == EntityKind::Heart).count();
        assert_eq!(hearts, 1);
    }

    #[test]
    fn test_enemy_spawn_cadence() {
        let mut state = scripted(0);
        state.speed = 10.0;
        state.time_ticks = 78;
        tick(&mut state, &hold(1));
        assert!(state.entities.is_empty());
        tick(&mut state, &hold(1));
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.entities[0].kind, EntityKind::Enemy);
    }

    #[test]
    fn test_no_spawn_when_slow() {
        let mut state = scripted(0);
        state.time_ticks = 79;
        state.speed = 1.0;
        tick(&mut state, &hold(1));
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_relative_motion() {
        let mut state = scripted(0);
        state.speed = 10.0;
        let enemy = state.insert(enemy_at(Vec2::new(80.0, 0.0), EnemyVariant::Blue, 4.0));
        let heart = state.insert(heart_at(Vec2::new(72.5, 0.0)));
        tick(&mut state, &hold(2));
        // 10 - 4 + 2
        assert!((state.entity(enemy).unwrap().pos.y - 8.0).abs() < 1e-5);
        assert!((state.entity(heart).unwrap().pos.y - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_overtaken_enemy_awards_bonus() {
        let mut state = scripted(0);
        state.speed = 10.0;
        state.insert(enemy_at(Vec2::new(80.0, 595.0), EnemyVariant::Blue, 2.0));
        state.insert(heart_at(Vec2::new(72.5, 595.0)));
        tick(&mut state, &hold(2));
        assert!(state.entities.is_empty());
        // 10 for speed plus one overtake
        assert_eq!(state.score, 60);
    }

    #[test]
    fn test_stale_entities_above_field_are_culled() {
        let mut state = scripted(0);
        state.insert(enemy_at(Vec2::new(80.0, -199.0), EnemyVariant::Blue, 5.0));
        tick(&mut state, &hold(2));
        assert!(state.entities.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_heart_pickup() {
        let mut state = scripted(0);
        let pos = state.player.pos;
        let heart = state.insert(heart_at(pos));
        state.insert(enemy_at(Vec2::new(80.0, 0.0), EnemyVariant::Blue, 5.0));
        tick(&mut state, &hold(1));
        assert_eq!(state.lives, 2);
        assert!(state.entity(heart).is_none());
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_heart_pickup_at_cap() {
        let mut state = scripted(0);
        state.lives = 5;
        let pos = state.player.pos;
        let heart = state.insert(heart_at(pos));
        tick(&mut state, &hold(1));
        assert_eq!(state.lives, 5);
        assert!(state.entity(heart).is_none());
    }

    #[test]
    fn test_enemy_hit_with_spare_life() {
        let mut state = scripted(0);
        state.lives = 3;
        let pos = state.player.pos;
        let enemy = state.insert(enemy_at(pos, EnemyVariant::Yellow, 2.0));
        assert_eq!(tick(&mut state, &hold(1)), TickOutcome::Running);
        assert_eq!(state.lives, 2);
        assert!(state.entity(enemy).is_none());
    }

    #[test]
    fn test_fatal_crash_reports_stats() {
        let mut state = scripted(0);
        state.speed = 14.0;
        state.score = 500;
        state.distance = 321.0;
        let pos = state.player.pos;
        state.insert(enemy_at(pos, EnemyVariant::Purple, 14.0));

        let outcome = tick(&mut state, &hold(1));
        let TickOutcome::Finished(stats) = outcome else {
            panic!("expected the run to end");
        };
        assert_eq!(state.lives, 0);
        assert!(state.entities.is_empty());
        assert_eq!(stats.cause_of_death, "Crashed into a Purple Cruiser");
        assert_eq!(stats.top_speed, state.speed);
        assert_eq!(stats.score, state.score);
        assert_eq!(stats.distance, state.distance);
    }

    #[test]
    fn test_finished_run_is_frozen() {
        let mut state = scripted(0);
        let pos = state.player.pos;
        state.insert(enemy_at(pos, EnemyVariant::Blue, 3.0));
        assert!(matches!(tick(&mut state, &hold(1)), TickOutcome::Finished(_)));

        // A second car parked on the player must not end the run twice
        let yellow = state.insert(enemy_at(pos, EnemyVariant::Yellow, 3.0));
        let ticks = state.time_ticks;
        let score = state.score;
        let distance = state.distance;
        let player_x = state.player.pos.x;

        for _ in 0..5 {
            assert_eq!(tick(&mut state, &hold(2)), TickOutcome::Running);
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.score, score);
        assert_eq!(state.distance, distance);
        assert_eq!(state.player.pos.x, player_x);
        assert_eq!(state.lives, 0);
        assert_eq!(state.entities.len(), 1);
        assert!(state.entity(yellow).is_some());

        state.reset();
        assert!(matches!(tick(&mut state, &hold(1)), TickOutcome::Running));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_cause_of_death_names_variant() {
        for variant in EnemyVariant::ALL {
            let e = enemy_at(Vec2::ZERO, variant, 3.0);
            assert_eq!(
                cause_of_death(&e),
                format!("Crashed into a {} Cruiser", variant.as_str())
            );
        }
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs stay identical
        let mut a = RaceState::new(99999);
        let mut b = RaceState::new(99999);
        let lanes = [1, 0, 0, 2, 1, 2, 2, 0];
        for t in 0..1500 {
            let input = hold(lanes[(t / 97) % lanes.len()]);
            let oa = tick(&mut a, &input);
            let ob = tick(&mut b, &input);
            assert_eq!(oa, ob);
            if let TickOutcome::Finished(_) = oa {
                break;
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.entities.len(), b.entities.len());
        assert_eq!(a.player.pos, b.player.pos);
    }
}
