//! Fixed timestep simulation tick
//!
//! Advances the game state by exactly one tick. Order within a tick:
//! actions → physics → camera → collisions → spawner → level progression.

use glam::Vec2;

use super::collision;
use super::physics::{self, MoveIntent};
use super::rect::Rect;
use super::rng::RandomSource;
use super::spawner;
use super::state::{Body, EntityId, EntityKind, GameEvent, GameState};
use crate::consts::*;

/// Input commands for a single tick
///
/// `move_left`/`move_right` are level-triggered (held keys). `jump`, `shoot`
/// and `restart` are edge-triggered and must be set for one tick per press.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub shoot: bool,
    /// Only honoured after the run has ended
    pub restart: bool,
}

impl TickInput {
    pub fn intent(&self) -> MoveIntent {
        MoveIntent {
            left: self.move_left,
            right: self.move_right,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl RandomSource) {
    state.events.clear();
    state.time_ticks += 1;

    if state.is_game_over() {
        if input.restart {
            state.restart();
        }
        return;
    }

    if input.jump {
        physics::try_jump(&mut state.world.player);
    }
    if input.shoot {
        shoot(state);
    }

    physics::update_world(&mut state.world, input.intent());
    state.camera.update(&state.world.player.body.rect);

    collision::resolve(state);

    if state.is_playing() {
        spawner::spawn(state, rng);
        check_level_up(state);
    }

    state.enforce_invariants();
}

/// Fire a projectile from the player's centre
pub fn shoot(state: &mut GameState) -> EntityId {
    let center = state.world.player.body.rect.center();
    let rect = Rect::from_center(center, Vec2::splat(PROJECTILE_SIZE));
    let id = state.world.spawn(
        EntityKind::Projectile,
        Body::new(rect, Vec2::new(PROJECTILE_SPEED, 0.0)),
    );
    state.events.push(GameEvent::Shot);
    id
}

/// Advance to the next level once the score threshold is met
///
/// At most one level per tick; never past the final level. Speed changes only
/// apply to enemies spawned afterwards.
pub fn check_level_up(state: &mut GameState) -> bool {
    let threshold = SCORE_PER_LEVEL * state.level as u64;
    if state.world.player.score < threshold || state.level >= LEVEL_COUNT {
        return false;
    }
    state.level += 1;
    state.spawn_rate += SPAWN_RATE_STEP;
    state.enemy_speed += ENEMY_SPEED_STEP;
    state.events.push(GameEvent::LevelUp { level: state.level });
    log::info!(
        "Level {} reached: spawn_rate={:.3} enemy_speed={}",
        state.level,
        state.spawn_rate,
        state.enemy_speed
    );
    true
}
