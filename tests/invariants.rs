//! Property tests over random seeds and steering patterns

use proptest::prelude::*;

use retro_racer::renderer::NullRenderer;
use retro_racer::sim::{RaceState, TickInput, TickOutcome, tick};
use retro_racer::{AppPhase, Host, Key, Tuning};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn run_invariants_hold(
        seed in any::<u64>(),
        // Lanes past the road edge must be clamped
        lanes in proptest::collection::vec(0usize..6, 1..40),
        hold in 5usize..120,
    ) {
        let mut state = RaceState::new(seed);
        let mut last_speed = state.speed;
        let mut last_distance = state.distance;

        for t in 0..4_000usize {
            let input = TickInput { lane: lanes[(t / hold) % lanes.len()] };
            let outcome = tick(&mut state, &input);

            prop_assert!(state.lives <= 5);
            prop_assert!(state.lane <= 2);
            prop_assert!(state.speed >= last_speed);
            prop_assert!(state.speed <= 22.0);
            prop_assert!(state.distance >= last_distance);

            last_speed = state.speed;
            last_distance = state.distance;

            if let TickOutcome::Finished(stats) = outcome {
                prop_assert_eq!(state.lives, 0);
                prop_assert_eq!(stats.score, state.score);
                prop_assert!(stats.cause_of_death.starts_with("Crashed into a "));
                break;
            }
        }
    }

    #[test]
    fn player_settles_in_requested_lane(seed in any::<u64>(), lane in 0usize..3) {
        let tuning = Tuning::default();
        let mut state = RaceState::new(seed);
        // 30 ticks is well before the first spawn
        for _ in 0..30 {
            tick(&mut state, &TickInput { lane });
        }
        let target = tuning.lane_x(lane, tuning.player_width);
        prop_assert!((state.player.pos.x - target).abs() < 0.01);
    }

    #[test]
    fn host_reports_each_run_once(seed in any::<u64>(), presses in proptest::collection::vec(0u8..3, 0..200)) {
        let mut host = Host::new(seed);
        let mut renderer = NullRenderer;
        host.key_down(Key::Confirm);
        host.key_down(Key::Confirm);
        prop_assert_eq!(host.phase(), AppPhase::Playing);

        let mut reports = 0;
        for frame in 0..20_000usize {
            if let Some(&press) = presses.get(frame / 30) {
                if frame % 30 == 0 {
                    host.key_down(match press {
                        0 => Key::Left,
                        1 => Key::Right,
                        _ => Key::Other,
                    });
                }
            }
            if host.frame(&mut renderer).is_some() {
                reports += 1;
            }
            prop_assert!(host.input().desired_lane() <= 2);
        }

        match host.phase() {
            AppPhase::GameOver => prop_assert_eq!(reports, 1),
            AppPhase::Playing => prop_assert_eq!(reports, 0),
            other => prop_assert!(false, "unexpected phase {:?}", other),
        }
    }
}
