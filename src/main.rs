//! Gravity-flip Tetris runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the term crate.
//! Logging is off unless `--log-file` is given; the terminal is in raw mode
//! on the alternate screen, so records cannot go to stderr.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use gravity_tetris::core::{GameSnapshot, GameState};
use gravity_tetris::input::{handle_key_event, should_quit};
use gravity_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use gravity_tetris::types::TICK_MS;

/// Falling-block puzzle where gravity can be flipped at will.
///
/// Arrows move, rotate and soft drop, Space hard drops, G flips gravity,
/// P pauses, R restarts, Q or Esc quits.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Seed for the piece generator [default: derived from the clock]
    #[arg(long)]
    seed: Option<u32>,

    /// Frame and input poll interval in milliseconds
    #[arg(long, default_value_t = TICK_MS, value_parser = clap::value_parser!(u32).range(1..=1000))]
    tick_ms: u32,

    /// Write log records to this file (filter with RUST_LOG, default info)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("starting with seed {seed}");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed, Duration::from_millis(u64::from(args.tick_ms)));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("couldn't create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("couldn't install logger")?;
    Ok(())
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1);
    nanos.max(1)
}

fn run(term: &mut TerminalRenderer, seed: u32, frame: Duration) -> Result<()> {
    let mut game = GameState::new(seed);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let start = Instant::now();

    loop {
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&fb)?;

        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit: score {} lines {}", game.score(), game.lines());
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        game.tick(start.elapsed().as_millis() as u64);
    }
}
