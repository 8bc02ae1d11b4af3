//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable randomness only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod physics;
pub mod rect;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{apply_collectible, damage_boss, nearest_overlap, resolve};
pub use physics::{MoveIntent, try_jump, update_player, update_world};
pub use rect::Rect;
pub use rng::{RandomSource, ScriptedRng, SimRng};
pub use state::{
    Body, CollectibleKind, Entity, EntityId, EntityKind, GameEvent, GamePhase, GameState,
    ParseCollectibleError, Player, World,
};
pub use tick::{TickInput, check_level_up, shoot, tick};
