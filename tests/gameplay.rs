//! Whole-run scenarios driven through the public tick API

use fox_adventure::audio::{LogAudio, SoundId};
use fox_adventure::consts::*;
use fox_adventure::platform::headless::{RecordingRenderer, ScriptedInput};
use fox_adventure::sim::{GamePhase, GameState, ScriptedRng, SimRng, TickInput, tick};
use fox_adventure::{FrameOutcome, Game, Settings};

#[test]
fn boss_fight_ends_in_victory() {
    let mut state = GameState::new();
    state.level = LEVEL_COUNT;
    state.world.player.score = 1000;
    let mut rng = ScriptedRng::new();
    let fire = TickInput {
        shoot: true,
        ..Default::default()
    };

    let mut saw_boss = false;
    for _ in 0..1000 {
        tick(&mut state, &fire, &mut rng);
        saw_boss |= state.world.boss().is_some();
        if state.is_game_over() {
            break;
        }
    }

    assert!(saw_boss);
    assert_eq!(state.phase, GamePhase::GameOver { won: true });
    assert!(state.boss_defeated);
    assert_eq!(state.world.boss_count(), 0);
    assert_eq!(state.world.player.score, 1000 + BOSS_KILL_SCORE);
    assert_eq!(state.world.player.lives, PLAYER_LIVES);
}

#[test]
fn standing_still_in_a_swarm_loses() {
    let mut state = GameState::new();
    state.spawn_rate = 1.0;
    let mut rng = SimRng::new(2024);

    for _ in 0..5000 {
        tick(&mut state, &TickInput::default(), &mut rng);
        if state.is_game_over() {
            break;
        }
    }

    assert_eq!(state.phase, GamePhase::GameOver { won: false });
    assert_eq!(state.world.player.lives, 0);
    assert_eq!(state.world.player.health, PLAYER_MAX_HEALTH);
}

#[test]
fn kills_advance_levels() {
    let mut state = GameState::new();
    state.world.player.score = SCORE_PER_LEVEL - ENEMY_KILL_SCORE;
    // One enemy spawns right past the screen edge, nothing else
    let mut rng = ScriptedRng::new().with_uniforms([0.0]).with_ints([0]);
    let fire = TickInput {
        shoot: true,
        ..Default::default()
    };

    for _ in 0..200 {
        tick(&mut state, &fire, &mut rng);
        if state.level > 1 {
            break;
        }
    }

    assert_eq!(state.level, 2);
    assert!((state.spawn_rate - (INITIAL_SPAWN_RATE + SPAWN_RATE_STEP)).abs() < 1e-6);
    assert_eq!(state.enemy_speed, ENEMY_BASE_SPEED + ENEMY_SPEED_STEP);
}

#[test]
fn headless_demo_runs_to_completion() {
    let settings = Settings {
        seed: Some(7),
        ..Settings::default()
    };
    let mut game = Game::new(
        settings,
        RecordingRenderer::new(),
        LogAudio::default(),
        ScriptedInput::demo(1200),
        SimRng::new(7),
    );

    let mut frames = 0;
    while game.frame(SIM_DT) == FrameOutcome::Continue {
        frames += 1;
    }

    assert_eq!(frames, 1200);
    assert_eq!(game.renderer().frames, 1200);
    assert_eq!(game.state.time_ticks, 1200);
    assert!(game.audio().played().contains(&SoundId::Shoot));
    let summary = game.summary();
    assert!(summary.health <= PLAYER_MAX_HEALTH);
}
