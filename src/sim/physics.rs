//! Movement integration
//!
//! All motion is in pixels per tick. Only the player is affected by gravity;
//! projectiles and enemies fly straight.

use glam::Vec2;

use super::state::{EntityKind, Player, World};
use crate::consts::*;

/// Held-direction input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Horizontal velocity for this intent (left wins when both are held)
    pub fn velocity_x(&self) -> f32 {
        if self.left {
            -PLAYER_SPEED
        } else if self.right {
            PLAYER_SPEED
        } else {
            0.0
        }
    }
}

/// Start a jump. Does nothing while already airborne.
///
/// Returns true if the jump started.
pub fn try_jump(player: &mut Player) -> bool {
    if player.jumping {
        return false;
    }
    player.jumping = true;
    player.body.vel.y = -JUMP_STRENGTH;
    true
}

/// Advance the player by one tick
pub fn update_player(player: &mut Player, intent: MoveIntent) {
    let body = &mut player.body;
    body.vel.x = intent.velocity_x();
    body.vel.y += GRAVITY;
    body.rect.pos += body.vel;

    let ground = WORLD_HEIGHT - body.rect.size.y;
    if body.rect.pos.y >= ground {
        body.rect.pos.y = ground;
        body.vel.y = 0.0;
        player.jumping = false;
    }

    let far_edge = (WORLD_WIDTH - body.rect.size.x).max(0.0);
    body.rect.pos.x = body.rect.pos.x.clamp(0.0, far_edge);
}

/// Advance the player and every entity by one tick, despawning entities that
/// left the world
pub fn update_world(world: &mut World, intent: MoveIntent) {
    update_player(&mut world.player, intent);

    for entity in world.entities_mut() {
        entity.body.rect.pos += entity.body.vel;
    }

    world.retain(|e| match e.kind {
        EntityKind::Projectile => e.body.rect.right() <= WORLD_WIDTH,
        EntityKind::Enemy | EntityKind::Boss { .. } => e.body.rect.right() >= 0.0,
        EntityKind::Collectible(_) => true,
    });
}

/// Velocity of a leftward-walking enemy
#[inline]
pub fn walking_left(speed: f32) -> Vec2 {
    Vec2::new(-speed, 0.0)
}
