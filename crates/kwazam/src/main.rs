//! Kwazam - command-line driver
//!
//! Plays Kwazam chess on the terminal and inspects saved games.

#![warn(missing_docs)]

mod cli;
mod render;
mod session;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use kwazam_engine::{EngineConfig, Game};
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play => run_play(&config),
        Command::Show { name, json } => run_show(&config, &name, json),
        Command::Moves { name, column, row } => run_moves(&config, &name, column, row),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Run an interactive game on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: &EngineConfig) -> Result<()> {
    info!(save_dir = %config.save_dir().display(), "Starting interactive game");
    let mut game = Game::with_config(config);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session::run(&mut game, stdin.lock(), &mut stdout)
}

/// Print a saved game as a board or as JSON
#[instrument(skip(config))]
fn run_show(config: &EngineConfig, name: &str, json: bool) -> Result<()> {
    let game = load_game(config, name)?;
    if json {
        println!("{}", session::pieces_json(&game)?);
    } else {
        println!("{}", render::render_board(&game));
    }
    Ok(())
}

/// List the legal destinations of one piece in a saved game
#[instrument(skip(config))]
fn run_moves(config: &EngineConfig, name: &str, column: i32, row: i32) -> Result<()> {
    let game = load_game(config, name)?;
    let piece = game
        .piece_at(column, row)
        .with_context(|| format!("No piece on ({column},{row}) in {name}"))?;

    let moves = game.legal_moves_for(piece.id());
    info!(count = moves.len(), "Legal moves listed");
    for mov in moves {
        println!("{}", mov.destination());
    }
    Ok(())
}

fn load_game(config: &EngineConfig, name: &str) -> Result<Game> {
    let mut game = Game::with_config(config);
    game.load(name)
        .with_context(|| format!("Failed to load save {name:?}"))?;
    Ok(game)
}
