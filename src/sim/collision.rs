//! Collision detection and combat resolution
//!
//! Runs once per tick, in a fixed order:
//! 1. projectiles vs enemies (boss damage / knockback, kill score)
//! 2. player vs enemies (contact damage, one enemy consumed per tick)
//! 3. life loss when health is depleted
//! 4. player vs collectibles (one pickup per tick)
//!
//! When several entities overlap the same subject, the one whose centre is
//! nearest wins, ties going to the lowest ID. As soon as the run ends, the
//! remaining steps are skipped.

use super::rect::Rect;
use super::state::{CollectibleKind, EntityId, EntityKind, GameEvent, GameState, Player, World};
use crate::consts::*;

/// Resolve every collision for this tick
pub fn resolve(state: &mut GameState) {
    resolve_projectile_hits(state);
    if !state.is_playing() {
        return;
    }
    resolve_player_contact(state);
    resolve_depleted_health(state);
    if !state.is_playing() {
        return;
    }
    resolve_pickups(state);
}

/// Nearest overlapping entity among those whose kind matches `filter`
pub fn nearest_overlap(
    world: &World,
    subject: &Rect,
    filter: impl Fn(&EntityKind) -> bool,
) -> Option<EntityId> {
    let center = subject.center();
    world
        .entities()
        .filter(|e| filter(&e.kind) && subject.intersects(&e.body.rect))
        .map(|e| (e.body.rect.center().distance_squared(center), e.id))
        // Entities iterate in ascending ID order, so `min_by` keeps the lowest ID on ties
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

/// Projectiles vs enemies
fn resolve_projectile_hits(state: &mut GameState) {
    for projectile_id in state.world.projectile_ids() {
        let Some(projectile) = state.world.get(projectile_id) else {
            continue;
        };
        let rect = projectile.body.rect;
        let Some(enemy_id) = nearest_overlap(&state.world, &rect, EntityKind::is_enemy) else {
            continue;
        };

        state.world.despawn(projectile_id);
        let is_boss = matches!(
            state.world.get(enemy_id).map(|e| e.kind),
            Some(EntityKind::Boss { .. })
        );
        if is_boss {
            damage_boss(state, enemy_id);
            if !state.is_playing() {
                return;
            }
        } else {
            state.world.despawn(enemy_id);
            state.world.player.add_score(ENEMY_KILL_SCORE);
            state.events.push(GameEvent::EnemyKilled);
        }
    }
}

/// Apply one hit to the boss: knockback, or defeat when health runs out
pub fn damage_boss(state: &mut GameState, boss_id: EntityId) {
    let Some(boss) = state.world.get_mut(boss_id) else {
        return;
    };
    let EntityKind::Boss { health } = &mut boss.kind else {
        return;
    };
    *health = health.saturating_sub(1);
    let remaining = *health;

    if remaining > 0 {
        // Knocked toward the left edge, never past it
        boss.body.rect.pos.x = (boss.body.rect.pos.x - BOSS_KNOCKBACK).max(0.0);
    }

    state.boss_health_display = remaining;
    if remaining == 0 {
        state.world.despawn(boss_id);
        state.world.player.add_score(BOSS_KILL_SCORE);
        state.boss_defeated = true;
        state.events.push(GameEvent::BossDefeated);
        state.end_run(true);
    } else {
        state.events.push(GameEvent::BossHit { remaining });
    }
}

/// Player vs enemies: at most one enemy is consumed per tick
fn resolve_player_contact(state: &mut GameState) {
    let player_rect = state.world.player.body.rect;
    let Some(enemy_id) = nearest_overlap(&state.world, &player_rect, EntityKind::is_enemy) else {
        return;
    };
    state.world.despawn(enemy_id);
    let player = &mut state.world.player;
    player.take_damage(ENEMY_CONTACT_DAMAGE);
    state.events.push(GameEvent::PlayerHit {
        health: player.health,
    });
}

/// Lose a life when health hits zero; the run ends with the last life
fn resolve_depleted_health(state: &mut GameState) {
    let player = &mut state.world.player;
    if player.health > 0 {
        return;
    }
    player.lives = player.lives.saturating_sub(1);
    player.health = PLAYER_MAX_HEALTH;
    let lives = player.lives;
    state.events.push(GameEvent::LifeLost { lives });
    log::debug!("Life lost, {lives} remaining");
    if lives == 0 {
        state.end_run(false);
    }
}

/// Player vs collectibles: at most one pickup per tick
fn resolve_pickups(state: &mut GameState) {
    let player_rect = state.world.player.body.rect;
    let Some(id) = nearest_overlap(&state.world, &player_rect, |k| {
        matches!(k, EntityKind::Collectible(_))
    }) else {
        return;
    };
    let Some(EntityKind::Collectible(kind)) = state.world.despawn(id).map(|e| e.kind) else {
        return;
    };
    apply_collectible(&mut state.world.player, kind);
    state.events.push(GameEvent::CollectiblePicked(kind));
}

/// Apply a collectible's effect to the player
pub fn apply_collectible(player: &mut Player, kind: CollectibleKind) {
    match kind {
        CollectibleKind::Health => player.heal(HEALTH_PICKUP_AMOUNT),
        CollectibleKind::Life => player.lives = player.lives.saturating_add(1),
    }
}
