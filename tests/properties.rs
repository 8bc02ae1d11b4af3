//! Invariants that must hold on every tick, for any seed and input sequence

use fox_adventure::consts::*;
use fox_adventure::sim::{GameEvent, GameState, SimRng, TickInput, tick};
use proptest::prelude::*;

fn arb_input() -> impl Strategy<Value = TickInput> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::bool::weighted(0.05),
    )
        .prop_map(|(move_left, move_right, jump, shoot, restart)| TickInput {
            move_left,
            move_right,
            jump,
            shoot,
            restart,
        })
}

fn check_invariants(state: &GameState) -> Result<(), TestCaseError> {
    let player = &state.world.player;
    prop_assert!(player.health <= PLAYER_MAX_HEALTH, "health {}", player.health);
    prop_assert!(state.world.boss_count() <= 1);
    prop_assert!((1..=LEVEL_COUNT).contains(&state.level));
    if state.world.boss().is_some() {
        prop_assert_eq!(state.level, LEVEL_COUNT);
    }

    let view = state.camera.view();
    prop_assert!(view.left() >= 0.0 && view.right() <= WORLD_WIDTH);
    prop_assert!(view.top() >= 0.0 && view.bottom() <= WORLD_HEIGHT);

    let body = &player.body.rect;
    prop_assert!(body.left() >= 0.0 && body.right() <= WORLD_WIDTH);
    prop_assert!(body.bottom() <= WORLD_HEIGHT);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_every_tick(
        seed in any::<u64>(),
        start_score in 0u64..1200,
        inputs in prop::collection::vec(arb_input(), 1..600),
    ) {
        let mut state = GameState::new();
        state.world.player.score = start_score;
        let mut rng = SimRng::new(seed);
        let mut prev_score = start_score;

        for input in &inputs {
            tick(&mut state, input, &mut rng);
            check_invariants(&state)?;

            let score = state.world.player.score;
            if state.events.contains(&GameEvent::Restarted) {
                prop_assert_eq!(score, 0);
            } else {
                prop_assert!(score >= prev_score, "score went {} -> {}", prev_score, score);
            }
            prev_score = score;
        }
    }

    #[test]
    fn game_over_is_sticky_without_restart(
        seed in any::<u64>(),
        won in any::<bool>(),
        inputs in prop::collection::vec(arb_input(), 1..100),
    ) {
        let mut state = GameState::new();
        state.end_run(won);
        let score = state.world.player.score;
        let mut rng = SimRng::new(seed);

        for input in &inputs {
            let input = TickInput { restart: false, ..input.clone() };
            tick(&mut state, &input, &mut rng);
            prop_assert!(state.is_game_over());
            prop_assert_eq!(state.world.player.score, score);
            prop_assert!(state.world.is_empty());
        }
    }

    #[test]
    fn same_seed_same_run(
        seed in any::<u64>(),
        inputs in prop::collection::vec(arb_input(), 1..300),
    ) {
        let mut a = GameState::new();
        let mut b = GameState::new();
        let mut rng_a = SimRng::new(seed);
        let mut rng_b = SimRng::new(seed);
        for input in &inputs {
            tick(&mut a, input, &mut rng_a);
            tick(&mut b, input, &mut rng_b);
        }
        prop_assert_eq!(a.world.player.score, b.world.player.score);
        prop_assert_eq!(a.world.player.body.rect, b.world.player.body.rect);
        prop_assert_eq!(a.world.len(), b.world.len());
        prop_assert_eq!(a.phase, b.phase);
        prop_assert_eq!(a.level, b.level);
    }
}
