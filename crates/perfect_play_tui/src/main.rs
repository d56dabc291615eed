//! Perfect Play - terminal tic-tac-toe against a minimax opponent.

#![warn(missing_docs)]

mod analyze;
mod cli;
mod config;
mod preferences;
mod selfplay;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use config::GameConfig;
use perfect_play::Mark;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Command::Play(PlayArgs::default())) {
        Command::Play(args) => run_play(args).await,
        Command::Selfplay {
            games,
            seed,
            human,
            json,
        } => run_selfplay(games, seed, human, json),
        Command::Analyze { board, computer } => run_analyze(&board, computer),
    }
}

/// Run the terminal UI
async fn run_play(args: PlayArgs) -> Result<()> {
    let config = GameConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?
        .with_overrides(&args);
    tui::run_tui(config).await
}

/// Run headless random rounds and print the score
#[instrument]
fn run_selfplay(games: u32, seed: u64, human: Mark, json: bool) -> Result<()> {
    initialize_stderr_tracing();
    info!("Starting self-play");

    let report = selfplay::run(games, seed, human);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} rounds, human as {}: {}", report.games, report.human, report.score);
    }
    Ok(())
}

/// Print candidate scores for a board
fn run_analyze(board: &str, computer: Option<Mark>) -> Result<()> {
    initialize_stderr_tracing();
    let analysis = analyze::analyze(board, computer)?;
    print!("{analysis}");
    Ok(())
}

fn initialize_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}
