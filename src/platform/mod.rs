//! Platform abstraction layer
//!
//! Capability interfaces the game core calls into:
//! - `Renderer`: filled rectangles and HUD text on a screen buffer
//! - `AudioPlayer`: fire-and-forget sound cues
//! - `Input`: held-key state and discrete key-press events
//!
//! Front ends:
//! - `terminal`: crossterm-backed renderer and input
//! - `headless`: recording renderer and scripted input for demos and tests

pub mod headless;
pub mod terminal;

use glam::Vec2;

pub use crate::audio::SoundId;

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Shoot,
    Restart,
}

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Close the game
    Quit,
    /// A key was pressed (not repeated)
    KeyDown(Key),
}

/// Draws screen-space primitives
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn draw_text(&mut self, pos: Vec2, text: &str, color: Color);
    /// Show the finished frame
    fn present(&mut self);
}

/// Plays sound cues without blocking
pub trait AudioPlayer {
    fn play_once(&mut self, sound: SoundId);
    fn play_loop(&mut self, sound: SoundId);
}

/// Reads the keyboard
pub trait Input {
    /// Drain events that arrived since the last call
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn is_key_held(&self, key: Key) -> bool;
}
