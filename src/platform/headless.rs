//! Headless front end: no terminal, no window
//!
//! `RecordingRenderer` keeps the draw calls of the last frame and
//! `ScriptedInput` plays back a fixed list of per-frame events.

use std::collections::{HashSet, VecDeque};

use glam::Vec2;

use super::{Color, Input, InputEvent, Key, Renderer};

/// A single renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Rect { pos: Vec2, size: Vec2, color: Color },
    Text { pos: Vec2, text: String, color: Color },
}

/// Renderer that records calls instead of drawing
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Frames presented so far
    pub frames: u64,
    pending: Vec<DrawCall>,
    last_frame: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls that made up the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }

    /// Text lines of the last frame
    pub fn last_texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Rectangles of the last frame drawn in `color`
    pub fn rects_with(&self, color: Color) -> usize {
        self.last_frame
            .iter()
            .filter(|call| matches!(call, DrawCall::Rect { color: c, .. } if *c == color))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Color) {
        self.pending.clear();
        self.pending.push(DrawCall::Clear(color));
    }

    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.pending.push(DrawCall::Rect { pos, size, color });
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, color: Color) {
        self.pending.push(DrawCall::Text {
            pos,
            text: text.to_string(),
            color,
        });
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
    }
}

/// One frame of scripted input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedFrame {
    pub events: Vec<InputEvent>,
    /// Keys held during this frame
    pub held: Vec<Key>,
}

/// Input that replays scripted frames, then reports `Quit`
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<ScriptedFrame>,
    held: HashSet<Key>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = ScriptedFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            held: HashSet::new(),
        }
    }

    /// Walk right, shoot every few frames and jump now and then
    pub fn demo(frames: u64) -> Self {
        Self::new((0..frames).map(|i| {
            let mut events = Vec::new();
            if i % 12 == 0 {
                events.push(InputEvent::KeyDown(Key::Shoot));
            }
            if i % 90 == 45 {
                events.push(InputEvent::KeyDown(Key::Jump));
            }
            if i % 600 == 599 {
                events.push(InputEvent::KeyDown(Key::Restart));
            }
            let held = if (i / 240) % 2 == 0 {
                vec![Key::Right]
            } else {
                vec![Key::Left]
            };
            ScriptedFrame { events, held }
        }))
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl Input for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        match self.frames.pop_front() {
            Some(frame) => {
                self.held = frame.held.into_iter().collect();
                frame.events
            }
            None => {
                self.held.clear();
                vec![InputEvent::Quit]
            }
        }
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
