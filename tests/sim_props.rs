//! Property tests for the simulation core
//!
//! The sim promises two things regardless of input: the ship stays inside
//! the arena, and identical seeds with identical inputs produce identical
//! runs.

use cookie_invaders::consts::*;
use cookie_invaders::sim::{GamePhase, GameState, TickInput, tick};
use proptest::prelude::*;

const ARENA_W: f32 = 800.0;
const ARENA_H: f32 = 600.0;

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(left, right, up, down, fire)| TickInput {
            left,
            right,
            up,
            down,
            fire,
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn player_never_leaves_arena(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(input_strategy(), 1..400),
    ) {
        let mut state = GameState::new(seed, ARENA_W, ARENA_H);
        state.start();

        for input in &inputs {
            tick(&mut state, input, SIM_DT);
            prop_assert!(state.player.pos.x >= PLAYER_MARGIN);
            prop_assert!(state.player.pos.x <= ARENA_W - PLAYER_MARGIN);
            prop_assert!(state.player.pos.y >= PLAYER_MARGIN);
            prop_assert!(state.player.pos.y <= ARENA_H - PLAYER_MARGIN);
        }
    }

    #[test]
    fn identical_runs_stay_identical(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(input_strategy(), 1..300),
    ) {
        let mut a = GameState::new(seed, ARENA_W, ARENA_H);
        let mut b = GameState::new(seed, ARENA_W, ARENA_H);
        a.start();
        b.start();

        for input in &inputs {
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }

        prop_assert_eq!(a.player.pos, b.player.pos);
        prop_assert_eq!(a.enemies.len(), b.enemies.len());
        prop_assert_eq!(a.shots.len(), b.shots.len());
        prop_assert_eq!(a.lives, b.lives);
        prop_assert_eq!(a.kills_this_level, b.kills_this_level);
        prop_assert_eq!(a.time_ticks, b.time_ticks);
    }

    #[test]
    fn lives_only_drain(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(input_strategy(), 1..500),
    ) {
        let mut state = GameState::new(seed, ARENA_W, ARENA_H);
        state.start();

        let mut prev = state.lives;
        for input in &inputs {
            tick(&mut state, input, SIM_DT);
            prop_assert!(state.lives <= prev);
            prev = state.lives;
            if state.lives == 0 {
                prop_assert_eq!(state.phase, GamePhase::GameOver);
            }
        }
    }
}
