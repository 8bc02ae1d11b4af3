//! Fox Adventure entry point
//!
//! Runs the game in the terminal, or headless with a scripted demo input.

use std::io::stdout;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use fox_adventure::audio::LogAudio;
use fox_adventure::consts::SIM_DT;
use fox_adventure::platform::headless::{RecordingRenderer, ScriptedInput};
use fox_adventure::platform::terminal::{TerminalInput, TerminalRenderer, TerminalSession};
use fox_adventure::sim::SimRng;
use fox_adventure::{FrameOutcome, Game, Settings};

#[derive(Parser, Debug)]
#[command(name = "fox-adventure", about = "Side-scrolling run-and-gun in your terminal")]
struct Args {
    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Run this many frames without a terminal and print a JSON summary
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    }
    .validated();
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Fox Adventure starting (seed {seed})");

    match args.headless {
        Some(frames) => run_headless(settings, seed, frames),
        None => run_terminal(settings, seed),
    }
}

fn run_headless(settings: Settings, seed: u64, frames: u64) -> Result<()> {
    let audio = LogAudio::from_settings(&settings);
    let mut game = Game::new(
        settings,
        RecordingRenderer::new(),
        audio,
        ScriptedInput::demo(frames),
        SimRng::new(seed),
    );
    while game.frame(SIM_DT) == FrameOutcome::Continue {}

    let summary = serde_json::to_string_pretty(&game.summary())
        .context("failed to serialize run summary")?;
    println!("{summary}");
    Ok(())
}

fn run_terminal(settings: Settings, seed: u64) -> Result<()> {
    let frame_time = Duration::from_secs_f32(SIM_DT);
    let audio = LogAudio::from_settings(&settings);

    let session = TerminalSession::enter().context("failed to set up terminal")?;
    let mut game = Game::new(
        settings,
        TerminalRenderer::new(stdout()),
        audio,
        TerminalInput::new(),
        SimRng::new(seed),
    );

    let mut last = Instant::now();
    loop {
        let now = Instant::now();
        let elapsed = now.duration_since(last).as_secs_f32();
        last = now;

        if game.frame(elapsed) == FrameOutcome::Quit {
            break;
        }
        thread::sleep(frame_time.saturating_sub(now.elapsed()));
    }

    let summary = game.summary();
    drop(game);
    drop(session);
    println!(
        "Final score {} at level {} (best {})",
        summary.score,
        summary.level,
        summary.best_score.unwrap_or(summary.score)
    );
    Ok(())
}
