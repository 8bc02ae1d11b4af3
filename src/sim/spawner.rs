//! Enemy, boss and collectible spawning
//!
//! Rolls are drawn from the injected `RandomSource` in a fixed order:
//! enemy, health pickup, then (only if the health roll failed) life pickup.

use glam::Vec2;

use super::physics::walking_left;
use super::rect::Rect;
use super::rng::RandomSource;
use super::state::{Body, CollectibleKind, EntityId, EntityKind, GameEvent, GameState};
use crate::consts::*;

/// Run one tick of spawn policy
pub fn spawn(state: &mut GameState, rng: &mut impl RandomSource) {
    maybe_spawn_boss(state);

    if rng.uniform() < state.spawn_rate {
        spawn_enemy(state, rng);
    }

    if rng.uniform() < HEALTH_DROP_CHANCE {
        spawn_collectible(state, CollectibleKind::Health, rng);
    } else if rng.uniform() < LIFE_DROP_CHANCE {
        spawn_collectible(state, CollectibleKind::Life, rng);
    }
}

/// Spawn the boss when the final level is reached and none is alive
///
/// Also switches spawn pacing to the boss phase rate.
pub fn maybe_spawn_boss(state: &mut GameState) -> Option<EntityId> {
    if state.level != LEVEL_COUNT || state.boss_defeated || state.world.boss().is_some() {
        return None;
    }

    let view = state.camera.view();
    let rect = Rect::new(
        view.right() - BOSS_SIZE,
        WORLD_HEIGHT - BOSS_SIZE,
        BOSS_SIZE,
        BOSS_SIZE,
    );
    let id = state.world.spawn(
        EntityKind::Boss { health: BOSS_HEALTH },
        Body::new(rect, walking_left(BOSS_SPEED)),
    );
    state.boss_health_display = BOSS_HEALTH;
    state.spawn_rate = BOSS_PHASE_SPAWN_RATE;
    state.events.push(GameEvent::BossSpawned);
    log::info!("Boss spawned at x={}", rect.pos.x);
    Some(id)
}

/// Spawn a regular enemy just past the visible right edge
pub fn spawn_enemy(state: &mut GameState, rng: &mut impl RandomSource) -> EntityId {
    let view = state.camera.view();
    let x = view.right() + rng.int_range(0, ENEMY_SPAWN_MARGIN) as f32;
    let speed = state.enemy_speed + state.level as f32;
    let rect = Rect::new(x, WORLD_HEIGHT - ENEMY_SIZE, ENEMY_SIZE, ENEMY_SIZE);
    let id = state
        .world
        .spawn(EntityKind::Enemy, Body::new(rect, walking_left(speed)));
    log::debug!("Enemy {id} spawned at x={x} speed={speed}");
    id
}

/// Spawn a collectible at a random spot inside the world
pub fn spawn_collectible(
    state: &mut GameState,
    kind: CollectibleKind,
    rng: &mut impl RandomSource,
) -> EntityId {
    let x = rng.int_range(
        COLLECTIBLE_EDGE_MARGIN,
        WORLD_WIDTH as i32 - COLLECTIBLE_EDGE_MARGIN,
    );
    let y = rng.int_range(
        COLLECTIBLE_EDGE_MARGIN,
        WORLD_HEIGHT as i32 - COLLECTIBLE_EDGE_MARGIN,
    );
    let rect = Rect::from_center(
        Vec2::new(x as f32, y as f32),
        Vec2::splat(COLLECTIBLE_SIZE),
    );
    let id = state
        .world
        .spawn(EntityKind::Collectible(kind), Body::at_rest(rect));
    log::debug!("{} collectible {id} spawned at ({x}, {y})", kind.as_str());
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;

    #[test]
    fn test_no_spawns_on_high_rolls() {
        let mut state = GameState::new();
        let mut rng = ScriptedRng::new();
        spawn(&mut state, &mut rng);
        assert!(state.world.is_empty());
    }

    #[test]
    fn test_enemy_spawns_off_screen_with_level_speed() {
        let mut state = GameState::new();
        state.level = 2;
        state.enemy_speed = 3.0;
        let mut rng = ScriptedRng::new().with_uniforms([0.0]).with_ints([40]);
        spawn(&mut state, &mut rng);

        let ids = state.world.enemy_ids();
        assert_eq!(ids.len(), 1);
        let enemy = state.world.get(ids[0]).unwrap();
        assert_eq!(enemy.kind, EntityKind::Enemy);
        assert!(enemy.body.rect.left() >= state.camera.view().right());
        assert_eq!(enemy.body.rect.left(), state.camera.view().right() + 40.0);
        assert_eq!(enemy.body.rect.bottom(), WORLD_HEIGHT);
        assert_eq!(enemy.body.vel, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_health_roll_has_priority_over_life() {
        let mut state = GameState::new();
        // enemy roll fails, health roll succeeds; the life roll is never drawn
        let mut rng = ScriptedRng::new()
            .with_uniforms([0.9, 0.001, 0.0])
            .with_ints([500, 300]);
        spawn(&mut state, &mut rng);

        assert_eq!(rng.remaining_uniforms(), 1);
        let ids = state.world.collectible_ids();
        assert_eq!(ids.len(), 1);
        let pickup = state.world.get(ids[0]).unwrap();
        assert_eq!(pickup.kind, EntityKind::Collectible(CollectibleKind::Health));
        assert_eq!(pickup.body.rect.center(), Vec2::new(500.0, 300.0));
    }

    #[test]
    fn test_life_spawns_when_health_roll_fails() {
        let mut state = GameState::new();
        let mut rng = ScriptedRng::new().with_uniforms([0.9, 0.5, 0.001]);
        spawn(&mut state, &mut rng);

        let ids = state.world.collectible_ids();
        assert_eq!(ids.len(), 1);
        let pickup = state.world.get(ids[0]).unwrap();
        assert_eq!(pickup.kind, EntityKind::Collectible(CollectibleKind::Life));
        // Exhausted int rolls fall back to the low end of the range
        assert_eq!(
            pickup.body.rect.center(),
            Vec2::new(COLLECTIBLE_EDGE_MARGIN as f32, COLLECTIBLE_EDGE_MARGIN as f32)
        );
    }

    #[test]
    fn test_boss_only_at_final_level() {
        let mut state = GameState::new();
        state.level = LEVEL_COUNT - 1;
        assert!(maybe_spawn_boss(&mut state).is_none());

        state.level = LEVEL_COUNT;
        let id = maybe_spawn_boss(&mut state);
        assert!(id.is_some());
        assert_eq!(state.spawn_rate, BOSS_PHASE_SPAWN_RATE);
        assert_eq!(state.boss_health_display, BOSS_HEALTH);
        assert!(state.events.contains(&GameEvent::BossSpawned));

        let boss = state.world.boss().unwrap();
        assert_eq!(boss.kind, EntityKind::Boss { health: BOSS_HEALTH });
        assert_eq!(boss.body.rect.size, Vec2::splat(BOSS_SIZE));
        assert!(boss.body.rect.right() <= state.camera.view().right());
    }

    #[test]
    fn test_single_boss() {
        let mut state = GameState::new();
        state.level = LEVEL_COUNT;
        let mut rng = ScriptedRng::new();
        for _ in 0..10 {
            spawn(&mut state, &mut rng);
        }
        assert_eq!(state.world.boss_count(), 1);
    }

    #[test]
    fn test_no_boss_after_defeat() {
        let mut state = GameState::new();
        state.level = LEVEL_COUNT;
        state.boss_defeated = true;
        assert!(maybe_spawn_boss(&mut state).is_none());
        assert_eq!(state.world.boss_count(), 0);
    }
}
