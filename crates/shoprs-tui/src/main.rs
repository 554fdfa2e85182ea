//! Shoprs TUI - a terminal storefront demo
//!
//! Built with Ratatui and crossterm.

mod app;
mod config;
mod handlers;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use app::{App, AppState};
use config::Config;

/// Shoprs TUI - browse the demo storefront from the terminal
#[derive(Parser, Debug)]
#[command(name = "shoprs-tui")]
#[command(about = "A terminal UI for the shoprs storefront demo")]
struct Args {
    /// Directory holding the demo CSV files (overrides the config file)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("shoprs_tui=info".parse()?))
        .with_writer(std::io::stderr) // Write logs to stderr to not interfere with TUI
        .init();

    let args = Args::parse();
    let mut config = Config::load(args.config)?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    tracing::info!("Starting Shoprs TUI with data dir: {:?}", config.data_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout so background loads and the
        // simulation timer keep advancing between key presses.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if handlers::handle_key(app, key) {
                    break;
                }
            }
        }

        app.on_tick(Instant::now());

        // Check if we should quit
        if matches!(app.state, AppState::Quit) {
            break;
        }
    }

    Ok(())
}
