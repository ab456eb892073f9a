//! Terminal blockfall runner (default binary).
//!
//! Samples the keyboard once per frame, feeds the edge-triggered input and the
//! wall-clock time into the engine, and draws the resulting snapshot through
//! the framebuffer renderer.

use std::process::ExitCode;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::cli::Options;
use blockfall::core::{GameConfig, GameSnapshot, GameState};
use blockfall::input::{should_quit, InputSampler};
use blockfall::stats::SessionStats;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer};
use blockfall::types::SECONDS_PER_FRAME;

/// Half-period of the line-clear blink, in seconds.
const FLASH_HALF_PERIOD: f64 = 0.05;

fn main() -> ExitCode {
    let options = Options::parse();
    match try_main(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[Blockfall] error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main(options: Options) -> Result<()> {
    let config = options.into_config(clock_seed());
    let seed = config.seed;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let stats = result?;
    println!("[Blockfall] seed={}", seed);
    println!("{}", stats.summary());
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<SessionStats> {
    let mut game = GameState::with_config(config);
    let mut stats = SessionStats::new();
    for e in game.take_events() {
        stats.record(&e);
    }

    let view = GameView::default();
    let mut sampler = InputSampler::new();
    let mut snapshot = GameSnapshot::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    let epoch = Instant::now();
    let tick = Duration::from_secs_f64(SECONDS_PER_FRAME);
    let mut next_tick = epoch + tick;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        fb.resize(w, h);
        game.snapshot_into(&mut snapshot);
        let flash = (epoch.elapsed().as_secs_f64() / FLASH_HALF_PERIOD) as u64 % 2 == 0;
        view.render_into(&snapshot, flash, &mut fb);
        term.draw(&fb)?;

        // Collect key presses until the next tick is due.
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(stats);
                    }
                    sampler.record(key);
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let now = Instant::now();
        next_tick += tick;
        if next_tick < now {
            next_tick = now + tick;
        }

        let input = sampler.finish_tick();
        game.set_time(now.duration_since(epoch).as_secs_f64());
        game.update(&input);
        for e in game.take_events() {
            stats.record(&e);
        }
    }
}
