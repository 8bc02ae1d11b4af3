//! Fox Adventure - a side-scrolling run-and-gun game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, camera, spawning, combat, game state)
//! - `game`: Fixed-rate frame driver wiring the simulation to its collaborators
//! - `platform`: Renderer / audio / input capability interfaces and front ends
//! - `scene`: Translates simulation state into renderer draw calls
//! - `audio`: Maps gameplay events to sound cues
//! - `settings`: User-tunable configuration

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;

pub use game::{FrameOutcome, Game};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible screen, in world pixels
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// The world scrolls horizontally across two screens
    pub const WORLD_WIDTH: f32 = SCREEN_WIDTH * 2.0;
    pub const WORLD_HEIGHT: f32 = SCREEN_HEIGHT;

    /// Per-tick motion (pixels per tick, not per second)
    pub const GRAVITY: f32 = 1.0;
    pub const PLAYER_SPEED: f32 = 7.0;
    pub const JUMP_STRENGTH: f32 = 30.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const BOSS_SPEED: f32 = 1.0;

    /// Entity sizes
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PROJECTILE_SIZE: f32 = 10.0;
    pub const ENEMY_SIZE: f32 = 50.0;
    pub const BOSS_SIZE: f32 = 150.0;
    pub const COLLECTIBLE_SIZE: f32 = 30.0;

    /// Player start position (top-left)
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT - 150.0;

    pub const PLAYER_LIVES: u32 = 3;
    pub const PLAYER_MAX_HEALTH: u32 = 100;

    /// Level progression
    pub const LEVEL_COUNT: u32 = 3;
    pub const SCORE_PER_LEVEL: u64 = 500;

    /// Boss tuning
    pub const BOSS_HEALTH: u32 = 30;
    pub const BOSS_KNOCKBACK: f32 = 10.0;

    /// Combat tuning
    pub const ENEMY_CONTACT_DAMAGE: u32 = 50;
    pub const ENEMY_KILL_SCORE: u64 = 10;
    pub const BOSS_KILL_SCORE: u64 = 1000;
    pub const HEALTH_PICKUP_AMOUNT: u32 = 20;

    /// Spawn pacing (probability per tick)
    pub const INITIAL_SPAWN_RATE: f32 = 0.02;
    pub const SPAWN_RATE_STEP: f32 = 0.01;
    pub const BOSS_PHASE_SPAWN_RATE: f32 = 0.005;
    pub const ENEMY_SPEED_STEP: f32 = 1.0;
    pub const HEALTH_DROP_CHANCE: f32 = 0.008;
    pub const LIFE_DROP_CHANCE: f32 = 0.002;
    /// Enemies appear up to this far past the visible right edge
    pub const ENEMY_SPAWN_MARGIN: i32 = 100;
    /// Collectibles keep this distance from the world edges
    pub const COLLECTIBLE_EDGE_MARGIN: i32 = 100;
}
