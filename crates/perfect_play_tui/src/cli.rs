//! Command-line interface for perfect_play.

use crate::preferences::Theme;
use clap::{Args, Parser, Subcommand};
use perfect_play::Mark;
use std::path::PathBuf;

/// Perfect Play - tic-tac-toe against an opponent that never loses
#[derive(Parser, Debug)]
#[command(name = "perfect_play")]
#[command(about = "Tic-tac-toe against a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play(PlayArgs),

    /// Pit a random human against the engine, headless
    Selfplay {
        /// Number of rounds to play
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed for both the random human and the engine's tie-break
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Mark the random human plays
        #[arg(long, default_value = "X")]
        human: Mark,

        /// Print the final score as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score every move on a board
    Analyze {
        /// Board in compact notation, e.g. `XX.OO....` or `XX./OO./...`
        board: String,

        /// Mark the engine plays (defaults to the side to move)
        #[arg(short, long)]
        computer: Option<Mark>,
    },
}

/// Flags for the interactive game.
#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// Path to game config
    #[arg(short, long, default_value = "perfect_play.toml")]
    pub config: PathBuf,

    /// Mark the human plays
    #[arg(long)]
    pub human: Option<Mark>,

    /// Delay before the computer moves, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the engine's tie-break
    #[arg(long)]
    pub seed: Option<u64>,

    /// Color theme
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Disable the terminal bell
    #[arg(long)]
    pub mute: bool,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from("perfect_play.toml"),
            human: None,
            delay_ms: None,
            seed: None,
            theme: None,
            mute: false,
        }
    }
}
