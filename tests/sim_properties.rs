//! Property-based checks over whole simulation runs

use proptest::prelude::*;

use retro_rush::consts::*;
use retro_rush::sim::{GamePhase, GameState, TickInput, tick};
use retro_rush::vehicles::CATALOG;

fn run_session(seed: u64, vehicle: usize, steers: &[i8]) -> GameState {
    let mut state = GameState::new(seed, vehicle);
    state.start();
    state.begin_running();
    for &steer in steers {
        if state.phase != GamePhase::Running {
            break;
        }
        tick(&mut state, &TickInput { steer });
    }
    state
}

proptest! {
    #[test]
    fn score_is_monotonic_and_player_stays_on_the_road(
        seed in 0u64..500,
        steers in proptest::collection::vec(-1i8..=1, 50..400)
    ) {
        let mut state = GameState::new(seed, 0);
        state.start();
        state.begin_running();

        let mut last_score = 0u32;
        for &steer in &steers {
            if state.phase != GamePhase::Running {
                break;
            }
            tick(&mut state, &TickInput { steer });

            prop_assert!(state.score >= last_score,
                "score went backwards: {} -> {}", last_score, state.score);
            last_score = state.score;

            prop_assert!(
                state.player.pos.x >= PLAYER_MIN_X && state.player.pos.x <= PLAYER_MAX_X,
                "player left the road at x={}", state.player.pos.x
            );
            prop_assert!(state.player.pos.x.is_finite());
        }
    }

    #[test]
    fn speed_respects_vehicle_scaled_bounds(
        seed in 0u64..500,
        vehicle in 0usize..9,
        steers in proptest::collection::vec(-1i8..=1, 50..400)
    ) {
        let scale = 1.0 + CATALOG[vehicle].speed_bonus();
        let mut state = GameState::new(seed, vehicle);
        state.start();
        state.begin_running();

        for &steer in &steers {
            if state.phase != GamePhase::Running {
                break;
            }
            tick(&mut state, &TickInput { steer });

            // SLOW can push below the base floor, never below its factor
            let floor = BASE_SPEED * scale * SLOW_FACTOR - 1e-3;
            let ceil = MAX_SPEED * scale + 1e-3;
            prop_assert!(
                state.speed >= floor && state.speed <= ceil,
                "speed {} outside [{floor}, {ceil}] for vehicle {vehicle}",
                state.speed
            );
        }
    }

    #[test]
    fn enemies_sit_on_lane_centers_without_sharing(
        seed in 0u64..500,
        steers in proptest::collection::vec(-1i8..=1, 100..600)
    ) {
        let mut state = GameState::new(seed, 0);
        state.start();
        state.begin_running();

        for &steer in &steers {
            if state.phase != GamePhase::Running {
                break;
            }
            tick(&mut state, &TickInput { steer });

            for enemy in &state.enemies {
                prop_assert!(
                    LANES.contains(&enemy.pos.x),
                    "enemy off the lane grid at x={}", enemy.pos.x
                );
            }

            // Same-burst enemies share a y forever; they must never share a lane
            for (i, a) in state.enemies.iter().enumerate() {
                for b in state.enemies.iter().skip(i + 1) {
                    if a.pos.y == b.pos.y {
                        prop_assert_ne!(a.pos.x, b.pos.x,
                            "two enemies spawned into the same lane");
                    }
                }
            }
        }
    }

    #[test]
    fn identical_seed_and_inputs_replay_identically(
        seed in 0u64..500,
        steers in proptest::collection::vec(-1i8..=1, 50..300)
    ) {
        let a = run_session(seed, 0, &steers);
        let b = run_session(seed, 0, &steers);

        prop_assert_eq!(a.score, b.score);
        prop_assert_eq!(a.distance, b.distance);
        prop_assert_eq!(a.phase, b.phase);
        prop_assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            prop_assert_eq!(ea.pos, eb.pos);
            prop_assert_eq!(ea.asset, eb.asset);
        }
    }

    #[test]
    fn frozen_phases_never_mutate_session_state(
        seed in 0u64..500,
        steers in proptest::collection::vec(-1i8..=1, 1..50)
    ) {
        let mut state = GameState::new(seed, 0);
        state.start();
        state.begin_running();
        for _ in 0..120 {
            tick(&mut state, &TickInput { steer: 0 });
        }
        if state.phase != GamePhase::Running {
            return Ok(());
        }

        state.pause(false);
        let before_score = state.score;
        let before_distance = state.distance;
        let before_enemies = state.enemies.len();

        for &steer in &steers {
            tick(&mut state, &TickInput { steer });
        }

        prop_assert_eq!(state.score, before_score);
        prop_assert_eq!(state.distance, before_distance);
        prop_assert_eq!(state.enemies.len(), before_enemies);
    }
}
