//! Game state and core simulation types
//!
//! The `World` exclusively owns every live entity. Entities never hold
//! references to each other; the resolver looks them up by `EntityId`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::Serialize;

use super::camera::Camera;
use super::rect::Rect;
use crate::consts::*;

/// Stable entity handle, allocated monotonically
pub type EntityId = u32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; `won` is true only when the boss was destroyed
    GameOver { won: bool },
}

/// Position and velocity shared by every movable object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub rect: Rect,
    /// Pixels per tick
    pub vel: Vec2,
}

impl Body {
    pub fn new(rect: Rect, vel: Vec2) -> Self {
        Self { rect, vel }
    }

    pub fn at_rest(rect: Rect) -> Self {
        Self { rect, vel: Vec2::ZERO }
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// Airborne after a jump; cleared on landing
    pub jumping: bool,
    pub health: u32,
    pub lives: u32,
    pub score: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Body::at_rest(Self::start_rect()),
            jumping: false,
            health: PLAYER_MAX_HEALTH,
            lives: PLAYER_LIVES,
            score: 0,
        }
    }

    fn start_rect() -> Rect {
        Rect::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Heal up to the health cap
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(PLAYER_MAX_HEALTH);
    }

    /// Apply damage, saturating at zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Restores `HEALTH_PICKUP_AMOUNT` health
    Health,
    /// Grants an extra life
    Life,
}

impl CollectibleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectibleKind::Health => "health",
            CollectibleKind::Life => "life",
        }
    }
}

/// Unrecognised collectible kind name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCollectibleError(pub String);

impl fmt::Display for ParseCollectibleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown collectible kind '{}'", self.0)
    }
}

impl std::error::Error for ParseCollectibleError {}

impl FromStr for CollectibleKind {
    type Err = ParseCollectibleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "health" => Ok(CollectibleKind::Health),
            "life" => Ok(CollectibleKind::Life),
            _ => Err(ParseCollectibleError(s.to_string())),
        }
    }
}

/// Kind-specific entity data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Projectile,
    /// Regular enemy; speed is fixed at spawn time
    Enemy,
    /// The final-level boss
    Boss { health: u32 },
    Collectible(CollectibleKind),
}

impl EntityKind {
    /// Bosses are enemies too
    pub fn is_enemy(&self) -> bool {
        matches!(self, EntityKind::Enemy | EntityKind::Boss { .. })
    }
}

/// A non-player entity
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub body: Body,
}

/// Arena of live entities keyed by ID, plus the player
///
/// Iteration is always in ascending ID order, which keeps the simulation
/// deterministic.
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    entities: BTreeMap<EntityId, Entity>,
    next_id: EntityId,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            player: Player::new(),
            entities: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Insert a new entity and return its ID
    pub fn spawn(&mut self, kind: EntityKind, body: Body) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.insert(id, Entity { id, kind, body });
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity whose predicate returns false
    pub fn retain(&mut self, mut keep: impl FnMut(&Entity) -> bool) {
        self.entities.retain(|_, e| keep(e));
    }

    /// IDs of entities matching `pred`, ascending
    pub fn ids_where(&self, pred: impl Fn(&EntityKind) -> bool) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|e| pred(&e.kind))
            .map(|e| e.id)
            .collect()
    }

    pub fn projectile_ids(&self) -> Vec<EntityId> {
        self.ids_where(|k| matches!(k, EntityKind::Projectile))
    }

    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.ids_where(EntityKind::is_enemy)
    }

    pub fn collectible_ids(&self) -> Vec<EntityId> {
        self.ids_where(|k| matches!(k, EntityKind::Collectible(_)))
    }

    /// The live boss, if any
    pub fn boss(&self) -> Option<&Entity> {
        self.entities
            .values()
            .find(|e| matches!(e.kind, EntityKind::Boss { .. }))
    }

    pub fn boss_count(&self) -> usize {
        self.entities
            .values()
            .filter(|e| matches!(e.kind, EntityKind::Boss { .. }))
            .count()
    }

    /// Remove every non-player entity
    pub fn clear_entities(&mut self) {
        self.entities.clear();
    }
}

/// Things that happened during a tick, consumed by audio and the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Shot,
    EnemyKilled,
    BossSpawned,
    BossHit { remaining: u32 },
    BossDefeated,
    PlayerHit { health: u32 },
    LifeLost { lives: u32 },
    CollectiblePicked(CollectibleKind),
    LevelUp { level: u32 },
    GameOver { won: bool },
    Restarted,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub world: World,
    pub camera: Camera,
    /// Current level, 1..=LEVEL_COUNT
    pub level: u32,
    /// Per-tick enemy spawn probability
    pub spawn_rate: f32,
    /// Base enemy speed; a new enemy moves at `enemy_speed + level`
    pub enemy_speed: f32,
    pub boss_defeated: bool,
    /// Last health value reported by the boss, for the HUD
    pub boss_health_display: u32,
    pub phase: GamePhase,
    /// Simulation tick counter (not reset on restart)
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        let world = World::new();
        let camera = Camera::following(&world.player.body.rect);
        Self {
            world,
            camera,
            level: 1,
            spawn_rate: INITIAL_SPAWN_RATE,
            enemy_speed: ENEMY_BASE_SPEED,
            boss_defeated: false,
            boss_health_display: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// End the run, unless it already ended this tick
    pub fn end_run(&mut self, won: bool) {
        if self.is_playing() {
            self.phase = GamePhase::GameOver { won };
            self.events.push(GameEvent::GameOver { won });
            log::info!(
                "Game over ({}): score={} level={}",
                if won { "victory" } else { "defeat" },
                self.world.player.score,
                self.level
            );
        }
    }

    /// Reset everything to the initial constants, keeping only a fresh player
    pub fn restart(&mut self) {
        let time_ticks = self.time_ticks;
        *self = Self::new();
        self.time_ticks = time_ticks;
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted");
    }

    /// Check invariants: assert in debug builds, normalize in release
    pub fn enforce_invariants(&mut self) {
        let player = &mut self.world.player;
        debug_assert!(
            player.health <= PLAYER_MAX_HEALTH,
            "player health {} above cap",
            player.health
        );
        player.health = player.health.min(PLAYER_MAX_HEALTH);

        debug_assert!(
            (1..=LEVEL_COUNT).contains(&self.level),
            "level {} out of range",
            self.level
        );
        self.level = self.level.clamp(1, LEVEL_COUNT);

        let bosses = self.world.boss_count();
        debug_assert!(bosses <= 1, "{bosses} bosses alive");
        if bosses > 1 {
            let mut seen = false;
            self.world.retain(|e| {
                if matches!(e.kind, EntityKind::Boss { .. }) {
                    let keep = !seen;
                    seen = true;
                    keep
                } else {
                    true
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.world.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.world.player.lives, PLAYER_LIVES);
        assert_eq!(state.world.player.score, 0);
        assert!(state.world.is_empty());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut player = Player::new();
        player.health = 90;
        player.heal(HEALTH_PICKUP_AMOUNT);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_damage_saturates() {
        let mut player = Player::new();
        player.health = 40;
        player.take_damage(ENEMY_CONTACT_DAMAGE);
        assert_eq!(player.health, 0);
    }

    #[test]
    fn test_world_ids_are_stable_and_ordered() {
        let mut world = World::new();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let a = world.spawn(EntityKind::Projectile, Body::at_rest(rect));
        let b = world.spawn(EntityKind::Enemy, Body::at_rest(rect));
        let c = world.spawn(EntityKind::Boss { health: 3 }, Body::at_rest(rect));
        assert!(a < b && b < c);

        world.despawn(b);
        let d = world.spawn(EntityKind::Enemy, Body::at_rest(rect));
        assert!(d > c, "IDs are never reused");

        assert_eq!(world.projectile_ids(), vec![a]);
        assert_eq!(world.enemy_ids(), vec![c, d]);
        assert_eq!(world.boss().map(|e| e.id), Some(c));
    }

    #[test]
    fn test_collectible_kind_parse() {
        assert_eq!("health".parse::<CollectibleKind>(), Ok(CollectibleKind::Health));
        assert_eq!("LIFE".parse::<CollectibleKind>(), Ok(CollectibleKind::Life));
        let err = "shield".parse::<CollectibleKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown collectible kind 'shield'");
    }

    #[test]
    fn test_end_run_is_first_wins() {
        let mut state = GameState::new();
        state.end_run(true);
        state.end_run(false);
        assert_eq!(state.phase, GamePhase::GameOver { won: true });
        assert_eq!(state.events, vec![GameEvent::GameOver { won: true }]);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new();
        state.level = 3;
        state.spawn_rate = BOSS_PHASE_SPAWN_RATE;
        state.enemy_speed = 4.0;
        state.boss_defeated = true;
        state.world.player.score = 1520;
        state.world.player.lives = 0;
        state.world.player.health = 30;
        state.world.player.body.rect.pos = Vec2::new(900.0, 10.0);
        state.world.spawn(
            EntityKind::Enemy,
            Body::at_rest(Rect::new(0.0, 0.0, 1.0, 1.0)),
        );
        state.phase = GamePhase::GameOver { won: true };
        state.time_ticks = 77;

        state.restart();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.spawn_rate, INITIAL_SPAWN_RATE);
        assert_eq!(state.enemy_speed, ENEMY_BASE_SPEED);
        assert!(!state.boss_defeated);
        assert_eq!(state.world.player.score, 0);
        assert_eq!(state.world.player.lives, PLAYER_LIVES);
        assert_eq!(state.world.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(
            state.world.player.body.rect.pos,
            Vec2::new(PLAYER_START_X, PLAYER_START_Y)
        );
        assert!(state.world.is_empty());
        assert_eq!(state.time_ticks, 77);
        assert_eq!(state.events, vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_enforce_invariants_drops_extra_bosses_in_release() {
        // Only meaningful without debug assertions
        if cfg!(debug_assertions) {
            return;
        }
        let mut state = GameState::new();
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        let first = state
            .world
            .spawn(EntityKind::Boss { health: 1 }, Body::at_rest(rect));
        state
            .world
            .spawn(EntityKind::Boss { health: 1 }, Body::at_rest(rect));
        state.enforce_invariants();
        assert_eq!(state.world.boss_count(), 1);
        assert_eq!(state.world.boss().map(|e| e.id), Some(first));
    }
}
