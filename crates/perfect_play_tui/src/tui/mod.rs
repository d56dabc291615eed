//! Terminal UI for Perfect Play.

mod app;
mod input;
mod scheduler;
mod ui;

use crate::config::GameConfig;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const LOG_FILE: &str = "perfect_play_tui.log";

/// Run the interactive game.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(?config, "Starting Perfect Play TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(score = %app.view().score, "Session over");
    res
}

#[instrument(skip_all)]
async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.pump();
        for _ in 0..app.take_cues() {
            ring_bell();
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(intent) = input::intent(key) {
                    debug!(?intent, "Key intent");
                    app.handle(intent);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        tokio::task::yield_now().await;
    }
}

fn ring_bell() {
    let mut out = io::stdout();
    if out.write_all(b"\x07").and_then(|_| out.flush()).is_err() {
        debug!("Terminal bell failed");
    }
}
