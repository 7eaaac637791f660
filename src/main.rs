//! Terminal runner (default binary).
//!
//! Wires crossterm input, the frame pacer and the session together and draws
//! through the framebuffer renderer. Logs go to a file (`--log-file`) since
//! the terminal itself is taken over by the game.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use stacker::engine::{FramePacer, Session, SessionConfig};
use stacker::input::{map_key, KeyCommand, KeyTracker, KeyTransition};
use stacker::term::{FrameBuffer, GameView, TermSurface, TerminalRenderer, Viewport};
use stacker::types::{GameMode, MAX_GRAVITY};

#[derive(Debug, Parser)]
#[command(name = "stacker", about = "Falling-block puzzle in the terminal")]
struct Cli {
    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)"
    )]
    verbose: u8,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "JSON settings file")]
    config: Option<PathBuf>,

    #[arg(
        long,
        value_parser = clap::value_parser!(u8).range(0..=MAX_GRAVITY as i64),
        help = "Starting gravity (0-29)"
    )]
    gravity: Option<u8>,

    #[arg(long, value_parser = parse_mode, help = "Game mode: marathon or infinite")]
    mode: Option<GameMode>,

    #[arg(long, help = "Seed for the piece queue")]
    seed: Option<u32>,

    #[arg(long, help = "Start with the ghost piece hidden")]
    no_ghost: bool,
}

fn parse_mode(s: &str) -> Result<GameMode, String> {
    GameMode::from_str(s).ok_or_else(|| format!("unknown mode `{}`", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = load_config(&cli)?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(?config, seed, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!("{:#}", err);
    }
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(LevelFilter::from_level(level))
        .init();
    Ok(())
}

/// Defaults, then the settings file, then `STACKER_*` variables, then flags.
fn load_config(cli: &Cli) -> Result<SessionConfig> {
    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let mut config = config.with_env();
    if let Some(gravity) = cli.gravity {
        config.set_gravity(gravity);
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.no_ghost {
        config.ghost = false;
    }
    Ok(config)
}

fn run(term: &mut TerminalRenderer, config: SessionConfig, seed: u32) -> Result<()> {
    let mut pacer = FramePacer::new(config.fps);
    let mut session = Session::new(config, seed);
    let mut surface = TermSurface::default();
    let mut keys = KeyTracker::new();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let (mut width, mut height) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut last = Instant::now();

    loop {
        if event::poll(pacer.until_next_frame())? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        match map_key(key) {
                            Some(KeyCommand::Quit) => return Ok(()),
                            Some(KeyCommand::GravityUp) => {
                                session.nudge_gravity(1);
                            }
                            Some(KeyCommand::GravityDown) => {
                                session.nudge_gravity(-1);
                            }
                            Some(KeyCommand::ToggleGhost) => session.toggle_ghost(),
                            _ => {}
                        }
                    }
                    match keys.handle(key) {
                        Some(KeyTransition::Down(control)) => {
                            session.key_down(control);
                        }
                        Some(KeyTransition::Up(control)) => session.key_up(control),
                        None => {}
                    }
                }
                Event::Resize(w, h) => {
                    width = w;
                    height = h;
                    term.invalidate();
                    surface.mark_dirty();
                }
                Event::FocusLost => {
                    keys.clear();
                    session.set_focused(false);
                }
                Event::FocusGained => session.set_focused(true),
                _ => {}
            }
        }

        let now = Instant::now();
        for _ in 0..pacer.advance(now - last) {
            for transition in keys.on_frame() {
                if let KeyTransition::Up(control) = transition {
                    session.key_up(control);
                }
            }
            session.frame();
        }
        last = now;

        session.present(&mut surface);
        if surface.take_dirty() {
            view.render_into(&surface, Viewport::new(width, height), &mut fb);
            term.draw_swap(&mut fb)?;
        }
    }
}
