//! Fixed-rate frame driver
//!
//! Each frame: capture input, run as many fixed ticks as the elapsed time
//! allows, notify audio after every tick, then draw once.

use serde::Serialize;

use crate::audio::{self, SoundId};
use crate::consts::{MAX_SUBSTEPS, SIM_DT, TICK_RATE_HZ};
use crate::highscores::HighScores;
use crate::platform::{AudioPlayer, Input, InputEvent, Key, Renderer};
use crate::scene;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, RandomSource, TickInput, tick};

/// Longest frame the driver will catch up on
const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Snapshot of a session, for logs and headless runs
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub health: u32,
    pub phase: GamePhase,
    pub best_score: Option<u64>,
    pub runs_finished: usize,
}

/// Game instance holding the simulation and its collaborators
pub struct Game<R, A, I, G>
where
    R: Renderer,
    A: AudioPlayer,
    I: Input,
    G: RandomSource,
{
    pub state: GameState,
    pub high_scores: HighScores,
    settings: Settings,
    renderer: R,
    audio: A,
    input: I,
    rng: G,
    accumulator: f32,
    /// Edge-triggered actions waiting for the next tick
    pending: TickInput,
    runs_finished: usize,
}

impl<R, A, I, G> Game<R, A, I, G>
where
    R: Renderer,
    A: AudioPlayer,
    I: Input,
    G: RandomSource,
{
    pub fn new(settings: Settings, renderer: R, mut audio: A, input: I, rng: G) -> Self {
        audio.play_loop(SoundId::Music);
        log::info!("Game started at {TICK_RATE_HZ} Hz");
        Self {
            state: GameState::new(),
            high_scores: HighScores::new(),
            settings,
            renderer,
            audio,
            input,
            rng,
            accumulator: 0.0,
            pending: TickInput::default(),
            runs_finished: 0,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Poll input. Returns None when quit was requested.
    fn capture_input(&mut self) -> Option<TickInput> {
        for event in self.input.poll_events() {
            match event {
                InputEvent::Quit => return None,
                InputEvent::KeyDown(Key::Jump) => self.pending.jump = true,
                InputEvent::KeyDown(Key::Shoot) => self.pending.shoot = true,
                InputEvent::KeyDown(Key::Restart) => self.pending.restart = true,
                InputEvent::KeyDown(Key::Left | Key::Right) => {}
            }
        }
        Some(TickInput {
            move_left: self.input.is_key_held(Key::Left),
            move_right: self.input.is_key_held(Key::Right),
            ..self.pending.clone()
        })
    }

    /// Run one frame covering `elapsed` seconds of wall time
    pub fn frame(&mut self, elapsed: f32) -> FrameOutcome {
        let Some(mut input) = self.capture_input() else {
            log::info!("Quit requested");
            return FrameOutcome::Quit;
        };

        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(&input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.jump = false;
            input.shoot = false;
            input.restart = false;
            self.pending = TickInput::default();
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.draw();
        FrameOutcome::Continue
    }

    /// Advance exactly one tick and notify audio
    pub fn step(&mut self, input: &TickInput) {
        tick(&mut self.state, input, &mut self.rng);
        audio::notify(&mut self.audio, &self.state.events);

        for event in &self.state.events {
            if let GameEvent::GameOver { won } = *event {
                let score = self.state.world.player.score;
                let rank = self.high_scores.add_score(score, self.state.level, won);
                self.runs_finished += 1;
                if let Some(rank) = rank {
                    log::info!("Run finished with {score} points (rank {rank})");
                }
            }
        }
    }

    pub fn draw(&mut self) {
        scene::draw(
            &self.state,
            &mut self.renderer,
            self.settings.show_hud,
            &self.high_scores,
        );
    }

    pub fn summary(&self) -> RunSummary {
        let player = &self.state.world.player;
        RunSummary {
            ticks: self.state.time_ticks,
            score: player.score,
            level: self.state.level,
            lives: player.lives,
            health: player.health,
            phase: self.state.phase,
            best_score: self.high_scores.top().map(|e| e.score),
            runs_finished: self.runs_finished,
        }
    }
}
