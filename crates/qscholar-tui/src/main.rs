//! Quantum Scholar - a terminal client for AI proctored exams.
//!
//! Candidates log in with their email and birthdate, pick one of the tests
//! assigned to them, read the instructions and start the test.

mod app;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qscholar_core::{Config, Session};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written inside the cache directory
const LOG_FILE: &str = "qscholar.log";

const USAGE: &str = "\
Usage: qscholar [OPTIONS]

Options:
  --logout     Remove the stored session token and exit
  --version    Print version and exit
  --help       Print this help

Environment:
  QS_API_BASE_URL   Backend base URL (default: http://localhost:8000)
  RUST_LOG          Log filter (default: warn)";

/// Initialize the tracing subscriber for logging.
///
/// The terminal belongs to the UI, so logs go to a file in `log_dir`.
/// Falls back to stderr if the directory cannot be created.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = log_dir.filter(|dir| std::fs::create_dir_all(dir).is_ok());

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--version") => {
            println!("qscholar {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some("--logout") => return logout(),
        Some(other) => {
            eprintln!("Unknown option: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
        None => {}
    }

    // Initialize logging
    let log_dir = Config::default().cache_dir().ok();
    let _guard = init_tracing(log_dir.as_deref());
    info!("Quantum Scholar client starting");

    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Quantum Scholar client shutting down");
    Ok(())
}

/// Remove the token file without starting the UI
fn logout() -> Result<()> {
    let mut session = Session::new(Session::default_path()?);
    if let Err(e) = session.load() {
        warn!(error = %e, "Token file unreadable, removing anyway");
    }
    session.clear()?;
    println!("Logged out.");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        let mut viewport = app.viewport;
        terminal.draw(|f| {
            viewport = f.area();
            render(f, app);
        })?;
        app.viewport = viewport;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports key releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Handle input
                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
