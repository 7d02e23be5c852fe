//! Command-line interface for kwazam.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kwazam - a five-by-eight chess variant with a rotating board
#[derive(Parser, Debug)]
#[command(name = "kwazam")]
#[command(about = "Play and inspect Kwazam chess games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to an engine config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game, reading commands from stdin
    Play,

    /// Print a saved game
    Show {
        /// Save slot name
        name: String,

        /// Print the pieces as JSON instead of a board
        #[arg(long)]
        json: bool,
    },

    /// List the legal destinations of a piece in a saved game
    Moves {
        /// Save slot name
        name: String,

        /// Column of the piece
        column: i32,

        /// Row of the piece
        row: i32,
    },
}
