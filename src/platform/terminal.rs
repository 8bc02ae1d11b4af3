//! Terminal front end - all terminal I/O lives here
//!
//! The renderer rasterises screen-space rectangles into a character grid
//! scaled to the terminal. Input derives held-key state from press/repeat
//! events, since many terminals never report key releases.

use std::collections::HashMap;
use std::io::{self, Write, stdout};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Print};
use crossterm::{QueueableCommand, cursor, execute, terminal};
use glam::Vec2;

use super::{Color, Input, InputEvent, Key, Renderer};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// A key counts as held if it was seen within this many polls. Covers
/// terminals without release events: OS key repeat refreshes it in time.
pub const HOLD_WINDOW: u64 = 8;

const BLOCK: char = '█';

/// Raw mode + alternate screen for the lifetime of the value
pub struct TerminalSession {
    enhanced: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // Restored by Drop if anything below fails
        let mut session = Self { enhanced: false };
        let mut out = stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        if matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            session.enhanced = true;
        }
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.enhanced {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, style::ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Character-grid renderer
pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Follow terminal resizes on every clear
    auto_resize: bool,
    background: Color,
    /// `None` shows the background
    cells: Vec<Option<Color>>,
    texts: Vec<(u16, u16, String, Color)>,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer sized to the current terminal
    pub fn new(out: W) -> Self {
        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        let mut renderer = Self::with_size(out, cols, rows);
        renderer.auto_resize = true;
        renderer
    }

    /// Renderer with a fixed grid size
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            out,
            cols,
            rows,
            auto_resize: false,
            background: Color::WHITE,
            cells: vec![None; cols as usize * rows as usize],
            texts: Vec::new(),
        }
    }

    /// Colour of a grid cell, `None` for background
    pub fn cell(&self, col: u16, row: u16) -> Option<Color> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cells = vec![None; self.cols as usize * self.rows as usize];
    }

    /// Screen pixels per grid cell
    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 / SCREEN_WIDTH,
            self.rows as f32 / SCREEN_HEIGHT,
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        let bg = term_color(self.background);
        self.out.queue(style::SetBackgroundColor(bg))?;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let mut current: Option<Option<Color>> = None;
            let mut run = String::new();
            for &cell in &self.cells[start..start + self.cols as usize] {
                if current != Some(cell) {
                    if !run.is_empty() {
                        self.out.queue(Print(std::mem::take(&mut run)))?;
                    }
                    if let Some(color) = cell {
                        self.out.queue(style::SetForegroundColor(term_color(color)))?;
                    }
                    current = Some(cell);
                }
                run.push(if cell.is_some() { BLOCK } else { ' ' });
            }
            if !run.is_empty() {
                self.out.queue(Print(run))?;
            }
        }

        for (col, row, text, color) in &self.texts {
            let room = self.cols.saturating_sub(*col) as usize;
            let clipped: String = text.chars().take(room).collect();
            self.out.queue(cursor::MoveTo(*col, *row))?;
            self.out.queue(style::SetForegroundColor(term_color(*color)))?;
            self.out.queue(Print(clipped))?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self, color: Color) {
        if self.auto_resize {
            if let Ok((cols, rows)) = terminal::size() {
                if cols != self.cols || rows != self.rows {
                    self.resize(cols, rows);
                }
            }
        }
        self.background = color;
        self.cells.fill(None);
        self.texts.clear();
    }

    fn draw_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        let scale = self.scale();
        let min = pos * scale;
        let max = (pos + size) * scale;

        let c0 = min.x.floor().max(0.0) as i64;
        let r0 = min.y.floor().max(0.0) as i64;
        // Anything visible covers at least one cell
        let c1 = (max.x.ceil() as i64).max(c0 + 1).min(self.cols as i64);
        let r1 = (max.y.ceil() as i64).max(r0 + 1).min(self.rows as i64);
        if max.x <= 0.0 || max.y <= 0.0 {
            return;
        }

        for row in r0..r1 {
            for col in c0..c1 {
                self.cells[row as usize * self.cols as usize + col as usize] = Some(color);
            }
        }
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, color: Color) {
        let cell = (pos * self.scale()).floor().max(Vec2::ZERO);
        let col = (cell.x as u16).min(self.cols - 1);
        let row = (cell.y as u16).min(self.rows - 1);
        self.texts.push((col, row, text.to_string(), color));
    }

    fn present(&mut self) {
        if let Err(e) = self.flush() {
            log::warn!("Terminal render error: {e}");
        }
    }
}

/// Keyboard input through crossterm events
#[derive(Debug, Default)]
pub struct TerminalInput {
    /// Poll count at which each key was last pressed or repeated
    last_seen: HashMap<Key, u64>,
    polls: u64,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn map_key(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Left | KeyCode::Char('a') => Some(Key::Left),
            KeyCode::Right | KeyCode::Char('d') => Some(Key::Right),
            KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') => Some(Key::Jump),
            KeyCode::Char('z') | KeyCode::Char('x') => Some(Key::Shoot),
            KeyCode::Char('r') => Some(Key::Restart),
            _ => None,
        }
    }

    /// Translate one key event. A press only counts as `KeyDown` when the key
    /// was not already held, so auto-repeat never re-triggers an action.
    pub fn handle_key(&mut self, event: KeyEvent) -> Option<InputEvent> {
        let quit = matches!(event.code, KeyCode::Esc | KeyCode::Char('q'))
            || (event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL));
        if quit && event.kind == KeyEventKind::Press {
            return Some(InputEvent::Quit);
        }

        let key = Self::map_key(event.code)?;
        match event.kind {
            KeyEventKind::Press => {
                let was_held = self.is_key_held(key);
                self.last_seen.insert(key, self.polls);
                (!was_held).then_some(InputEvent::KeyDown(key))
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(key, self.polls);
                None
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key);
                None
            }
        }
    }

    /// Start a new poll cycle without reading the terminal
    pub fn advance(&mut self) {
        self.polls += 1;
    }
}

impl Input for TerminalInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.advance();
        let mut events = Vec::new();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => events.extend(self.handle_key(key)),
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("Input read error: {e}");
                        break;
                    }
                },
                Ok(false) => break,
                Err(e) => {
                    log::warn!("Input poll error: {e}");
                    break;
                }
            }
        }
        events
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.last_seen
            .get(&key)
            .is_some_and(|&last| self.polls.saturating_sub(last) <= HOLD_WINDOW)
    }
}
